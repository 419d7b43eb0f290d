//! Search over location codes and part numbers
//!
//! A linear filter recomputed per query; nothing is indexed.

use crate::core::location::{Location, ProjectId};
use crate::core::store::RecordStore;

/// Cap on part-number hits. A display concern, but applied here so
/// consumers can rely on it.
pub const PART_NUMBER_LIMIT: usize = 10;

/// Matches for one query term
#[derive(Debug, Default)]
pub struct SearchHits<'a> {
    /// Locations whose code contains the term
    pub locations: Vec<&'a Location>,

    /// Deduplicated part numbers containing the term, first-seen
    /// order, at most [`PART_NUMBER_LIMIT`]
    pub part_numbers: Vec<String>,
}

/// Case-insensitive substring search. An empty or all-whitespace term
/// matches nothing, not everything.
pub fn search<'a>(
    store: &'a RecordStore,
    term: &str,
    project: Option<ProjectId>,
) -> SearchHits<'a> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return SearchHits::default();
    }

    let mut hits = SearchHits::default();

    for loc in store
        .iter()
        .filter(|l| project.map_or(true, |p| l.project == p))
    {
        if loc.location.to_lowercase().contains(&term) {
            hits.locations.push(loc);
        }

        for record in loc.stages.values().flatten() {
            if hits.part_numbers.len() >= PART_NUMBER_LIMIT {
                break;
            }
            if record.part_number.to_lowercase().contains(&term)
                && !hits.part_numbers.contains(&record.part_number)
            {
                hits.part_numbers.push(record.part_number.clone());
            }
        }
    }

    hits
}
