//! Stage diff engine
//!
//! Pure classification of how a location's component set relates
//! between two stages. Only part numbers and config assignments are
//! material; description and notes edits never change the outcome.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::location::Location;
use crate::core::record::ComponentRecord;
use crate::core::stage::Stage;

/// How a location's component set changed between two stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Unchanged,
    /// Nothing at the `from` stage, something at the `to` stage
    Added,
    /// Something at the `from` stage, nothing at the `to` stage
    Removed,
    /// Populated on both sides with differing signature sets
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Unchanged => write!(f, "unchanged"),
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::Removed => write!(f, "removed"),
            ChangeKind::Modified => write!(f, "modified"),
        }
    }
}

/// The order-independent set of canonical record signatures on one side
fn signature_set(records: &[ComponentRecord]) -> BTreeSet<(String, String)> {
    records.iter().map(ComponentRecord::signature).collect()
}

/// Classify the relationship between the component sets at two stages.
///
/// Added/Removed read relative to the (from, to) tuple order given;
/// `from` does not have to chronologically precede `to`. An absent
/// stage reads as an empty list, never an error.
pub fn classify(location: &Location, from: Stage, to: Stage) -> ChangeKind {
    let side_a = location.records_at(from);
    let side_b = location.records_at(to);

    match (side_a.is_empty(), side_b.is_empty()) {
        (true, true) => ChangeKind::Unchanged,
        (true, false) => ChangeKind::Added,
        (false, true) => ChangeKind::Removed,
        (false, false) => {
            if signature_set(side_a) == signature_set(side_b) {
                ChangeKind::Unchanged
            } else {
                ChangeKind::Modified
            }
        }
    }
}
