//! Part usage aggregation
//!
//! Inverts the store to answer "where is part X used, and at which
//! stage did that usage start or stop".

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::location::{Location, ProjectId};
use crate::core::stage::Stage;
use crate::core::store::RecordStore;

/// How a location's usage of the part relates to the previous stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageStatus {
    /// In use here, not at the preceding stage (or no preceding stage)
    Added,
    /// Used at the preceding stage, gone from this one
    Removed,
    /// Used at both this stage and the preceding one
    Stable,
}

impl std::fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageStatus::Added => write!(f, "added"),
            UsageStatus::Removed => write!(f, "removed"),
            UsageStatus::Stable => write!(f, "stable"),
        }
    }
}

/// One location's usage status at one stage
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub location: String,
    pub project: ProjectId,
    pub status: UsageStatus,
}

/// Per-stage usage of one part number across the store
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub part_number: String,

    /// First matching record's description in store iteration order.
    /// A heuristic: the data does not guarantee one description per
    /// part number.
    pub description: Option<String>,

    /// Stages with at least one entry, in canonical order
    pub per_stage: BTreeMap<Stage, Vec<UsageEntry>>,
}

fn uses_part(location: &Location, stage: Stage, part_number: &str) -> bool {
    location
        .records_at(stage)
        .iter()
        .any(|r| r.part_number == part_number)
}

/// Build the usage report for a part number.
///
/// Walking stages in canonical order, each stage's users are compared
/// against the previous stage's: in both ⇒ stable, current only ⇒
/// added, previous only ⇒ removed. A drop is only reported for stages
/// the location has actually populated; a stage absent from its map
/// means the data was never captured, not that the part went away.
/// Locations that never use the part appear nowhere.
pub fn usage_report(store: &RecordStore, part_number: &str) -> UsageReport {
    let description = store
        .iter()
        .flat_map(|loc| loc.stages.values().flatten())
        .find(|r| r.part_number == part_number)
        .map(|r| r.description.clone());

    let mut per_stage: BTreeMap<Stage, Vec<UsageEntry>> = BTreeMap::new();
    let mut prev_users: Vec<&Location> = Vec::new();

    for stage in Stage::ALL {
        let current: Vec<&Location> = store
            .iter()
            .filter(|loc| uses_part(loc, stage, part_number))
            .collect();

        let mut entries: Vec<UsageEntry> = Vec::new();
        for loc in &current {
            let status = if prev_users.iter().any(|p| p.key() == loc.key()) {
                UsageStatus::Stable
            } else {
                UsageStatus::Added
            };
            entries.push(UsageEntry {
                location: loc.location.clone(),
                project: loc.project,
                status,
            });
        }
        for loc in &prev_users {
            let still_used = current.iter().any(|c| c.key() == loc.key());
            if !still_used && loc.has_stage(stage) {
                entries.push(UsageEntry {
                    location: loc.location.clone(),
                    project: loc.project,
                    status: UsageStatus::Removed,
                });
            }
        }

        if !entries.is_empty() {
            per_stage.insert(stage, entries);
        }
        prev_users = current;
    }

    UsageReport {
        part_number: part_number.to_string(),
        description,
        per_stage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::ComponentRecord;

    fn rec(pn: &str, desc: &str) -> ComponentRecord {
        ComponentRecord::new(pn, desc)
    }

    fn statuses(report: &UsageReport, stage: Stage) -> Vec<(&str, UsageStatus)> {
        report
            .per_stage
            .get(&stage)
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| (e.location.as_str(), e.status))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_first_stage_users_are_added() {
        let mut a = Location::new("A", ProjectId::P7lh);
        a.stages.insert(Stage::Evt, vec![rec("X", "widget")]);
        let mut b = Location::new("B", ProjectId::P7lh);
        b.stages.insert(Stage::Evt, vec![rec("X", "widget")]);
        b.stages.insert(Stage::Dvt, vec![rec("X", "widget")]);
        let store = RecordStore::from_locations(vec![a, b]);

        let report = usage_report(&store, "X");
        assert_eq!(
            statuses(&report, Stage::Evt),
            vec![("A", UsageStatus::Added), ("B", UsageStatus::Added)]
        );
        // A has no DVT data at all, so it is absent from every DVT
        // bucket; B carried the part forward.
        assert_eq!(statuses(&report, Stage::Dvt), vec![("B", UsageStatus::Stable)]);
    }

    #[test]
    fn test_drop_reported_when_stage_is_populated_without_the_part() {
        let mut loc = Location::new("RF885", ProjectId::P7lh);
        loc.stages.insert(Stage::P1b, vec![rec("118S00373", "RES 30.1K")]);
        loc.stages.insert(Stage::Evt, vec![rec("118S00521", "RES 30K")]);
        let store = RecordStore::from_locations(vec![loc]);

        let report = usage_report(&store, "118S00373");
        assert_eq!(
            statuses(&report, Stage::P1b),
            vec![("RF885", UsageStatus::Added)]
        );
        assert_eq!(
            statuses(&report, Stage::Evt),
            vec![("RF885", UsageStatus::Removed)]
        );
        assert!(!report.per_stage.contains_key(&Stage::Dvt));
    }

    #[test]
    fn test_one_bucket_per_location_per_stage() {
        let mut loc = Location::new("RF883", ProjectId::P7lh);
        loc.stages.insert(
            Stage::Evt,
            vec![rec("118S00495", "RES 226K"), rec("118S00495", "RES 226K")],
        );
        let store = RecordStore::from_locations(vec![loc]);

        let report = usage_report(&store, "118S00495");
        assert_eq!(statuses(&report, Stage::Evt).len(), 1);
    }

    #[test]
    fn test_unused_part_has_empty_report() {
        let mut loc = Location::new("RC305", ProjectId::P7lh);
        loc.stages.insert(Stage::P1b, vec![rec("103S00578", "RES 24.9K")]);
        let store = RecordStore::from_locations(vec![loc]);

        let report = usage_report(&store, "999S99999");
        assert!(report.per_stage.is_empty());
        assert!(report.description.is_none());
    }

    #[test]
    fn test_description_is_first_match_in_store_order() {
        let mut first = Location::new("A", ProjectId::P7lh);
        first.stages.insert(Stage::P1b, vec![rec("X", "first text")]);
        let mut second = Location::new("B", ProjectId::P7lh);
        second.stages.insert(Stage::P1a, vec![rec("X", "second text")]);
        let store = RecordStore::from_locations(vec![first, second]);

        let report = usage_report(&store, "X");
        assert_eq!(report.description.as_deref(), Some("first text"));
    }

    #[test]
    fn test_same_code_under_both_projects_tracked_separately() {
        let mut lh = Location::new("RF883", ProjectId::P7lh);
        lh.stages.insert(Stage::P1b, vec![rec("X", "res")]);
        lh.stages.insert(Stage::Evt, vec![rec("Y", "res")]);
        let mut mh = Location::new("RF883", ProjectId::P7mh);
        mh.stages.insert(Stage::Evt, vec![rec("X", "res")]);
        let store = RecordStore::from_locations(vec![lh, mh]);

        let report = usage_report(&store, "X");
        assert_eq!(
            statuses(&report, Stage::Evt),
            vec![("RF883", UsageStatus::Added), ("RF883", UsageStatus::Removed)]
        );
        let evt = &report.per_stage[&Stage::Evt];
        assert_eq!(evt[0].project, ProjectId::P7mh);
        assert_eq!(evt[1].project, ProjectId::P7lh);
    }
}
