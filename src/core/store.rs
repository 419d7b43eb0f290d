//! Record store - the single in-memory dataset
//!
//! An ordered collection of Locations keyed by (location, project).
//! Iteration order is insertion order and is what every report means
//! by "store iteration order".

use crate::core::location::{Location, ProjectId};

/// Counts produced by a bulk merge
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub replaced: usize,
    pub appended: usize,
}

/// The in-memory dataset. Entries with the same location code under
/// different projects are distinct and are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    locations: Vec<Location>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a list of locations. Later duplicates of the
    /// same (location, project) key replace earlier ones.
    pub fn from_locations(locations: Vec<Location>) -> Self {
        let mut store = Self::new();
        for loc in locations {
            store.upsert(loc);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Exact lookup by the (location, project) key
    pub fn get(&self, code: &str, project: ProjectId) -> Option<&Location> {
        self.locations
            .iter()
            .find(|l| l.location == code && l.project == project)
    }

    /// Mutable lookup by the (location, project) key
    pub fn get_mut(&mut self, code: &str, project: ProjectId) -> Option<&mut Location> {
        self.locations
            .iter_mut()
            .find(|l| l.location == code && l.project == project)
    }

    /// All entries with this location code, across projects
    pub fn find_by_code(&self, code: &str) -> Vec<&Location> {
        self.locations.iter().filter(|l| l.location == code).collect()
    }

    /// Insert or replace by key. Returns true when an existing entry
    /// was replaced.
    pub fn upsert(&mut self, location: Location) -> bool {
        if let Some(existing) = self
            .locations
            .iter_mut()
            .find(|l| l.location == location.location && l.project == location.project)
        {
            *existing = location;
            true
        } else {
            self.locations.push(location);
            false
        }
    }

    /// Remove by key, returning the removed entry
    pub fn remove(&mut self, code: &str, project: ProjectId) -> Option<Location> {
        let idx = self
            .locations
            .iter()
            .position(|l| l.location == code && l.project == project)?;
        Some(self.locations.remove(idx))
    }

    /// Import merge policy: existing keys are replaced wholesale, new
    /// keys are appended in incoming order.
    pub fn merge(&mut self, incoming: Vec<Location>) -> MergeStats {
        let mut stats = MergeStats::default();
        for loc in incoming {
            if self.upsert(loc) {
                stats.replaced += 1;
            } else {
                stats.appended += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::ComponentRecord;
    use crate::core::stage::Stage;

    fn loc(code: &str, project: ProjectId) -> Location {
        Location::new(code, project)
    }

    #[test]
    fn test_same_code_different_projects_stay_distinct() {
        let mut store = RecordStore::new();
        store.upsert(loc("RF883", ProjectId::P7lh));
        store.upsert(loc("RF883", ProjectId::P7mh));
        assert_eq!(store.len(), 2);
        assert!(store.get("RF883", ProjectId::P7lh).is_some());
        assert!(store.get("RF883", ProjectId::P7mh).is_some());
    }

    #[test]
    fn test_upsert_replaces_wholesale() {
        let mut store = RecordStore::new();
        let mut first = loc("UN400", ProjectId::P7lh);
        first
            .stages
            .insert(Stage::P1b, vec![ComponentRecord::new("338S01216", "PMU")]);
        store.upsert(first);

        let replacement = loc("UN400", ProjectId::P7lh);
        assert!(store.upsert(replacement));
        assert_eq!(store.len(), 1);
        assert!(store
            .get("UN400", ProjectId::P7lh)
            .unwrap()
            .stages
            .is_empty());
    }

    #[test]
    fn test_merge_counts() {
        let mut store = RecordStore::from_locations(vec![loc("R2110", ProjectId::P7lh)]);
        let stats = store.merge(vec![
            loc("R2110", ProjectId::P7lh),
            loc("RC305", ProjectId::P7lh),
        ]);
        assert_eq!(
            stats,
            MergeStats {
                replaced: 1,
                appended: 1
            }
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let store = RecordStore::from_locations(vec![
            loc("FP700", ProjectId::P7lh),
            loc("RC305", ProjectId::P7lh),
            loc("RF885", ProjectId::P7lh),
        ]);
        let codes: Vec<&str> = store.iter().map(|l| l.location.as_str()).collect();
        assert_eq!(codes, vec!["FP700", "RC305", "RF885"]);
    }
}
