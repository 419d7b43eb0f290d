//! Global audit - stage diff applied across the whole store

use serde::Serialize;

use crate::core::location::ProjectId;
use crate::core::stage::Stage;
use crate::core::store::RecordStore;
use crate::engine::diff::{classify, ChangeKind};

/// One changed location in an audit run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub location: String,
    pub project: ProjectId,
    pub change: ChangeKind,
}

/// Classify every location in the store between two stages, keeping
/// only the changed ones. Result order is store iteration order; the
/// store is not mutated.
pub fn audit(
    store: &RecordStore,
    from: Stage,
    to: Stage,
    project: Option<ProjectId>,
) -> Vec<AuditEntry> {
    store
        .iter()
        .filter(|loc| project.map_or(true, |p| loc.project == p))
        .filter_map(|loc| {
            let change = classify(loc, from, to);
            if change == ChangeKind::Unchanged {
                None
            } else {
                Some(AuditEntry {
                    location: loc.location.clone(),
                    project: loc.project,
                    change,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::Location;
    use crate::core::record::ComponentRecord;

    fn seeded_store() -> RecordStore {
        let mut changed = Location::new("RF885", ProjectId::P7lh);
        changed.stages.insert(
            Stage::P1b,
            vec![ComponentRecord::new("118S00373", "RES 30.1K")],
        );
        changed.stages.insert(
            Stage::Evt,
            vec![ComponentRecord::new("118S00521", "RES 30K")],
        );

        let mut stable = Location::new("R2110", ProjectId::P7lh);
        stable
            .stages
            .insert(Stage::P1b, vec![ComponentRecord::new("117S00073", "RES 0")]);
        stable
            .stages
            .insert(Stage::Evt, vec![ComponentRecord::new("117S00073", "RES 0")]);

        let mut other_project = Location::new("RF885", ProjectId::P7mh);
        other_project
            .stages
            .insert(Stage::Evt, vec![ComponentRecord::new("900S00001", "RES")]);

        RecordStore::from_locations(vec![changed, stable, other_project])
    }

    #[test]
    fn test_audit_excludes_unchanged() {
        let store = seeded_store();
        let entries = audit(&store, Stage::P1b, Stage::Evt, None);
        assert!(entries.iter().all(|e| e.change != ChangeKind::Unchanged));
        assert!(!entries.iter().any(|e| e.location == "R2110"));
    }

    #[test]
    fn test_audit_preserves_store_order() {
        let store = seeded_store();
        let entries = audit(&store, Stage::P1b, Stage::Evt, None);
        let keys: Vec<(&str, ProjectId)> = entries
            .iter()
            .map(|e| (e.location.as_str(), e.project))
            .collect();
        assert_eq!(
            keys,
            vec![("RF885", ProjectId::P7lh), ("RF885", ProjectId::P7mh)]
        );
    }

    #[test]
    fn test_audit_project_filter() {
        let store = seeded_store();
        let entries = audit(&store, Stage::P1b, Stage::Evt, Some(ProjectId::P7mh));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].change, ChangeKind::Added);
    }

    #[test]
    fn test_audit_empty_stage_pair_is_empty_report() {
        let store = seeded_store();
        let entries = audit(&store, Stage::Pvt, Stage::Mp, None);
        assert!(entries.is_empty());
    }
}
