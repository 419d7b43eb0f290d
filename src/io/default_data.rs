//! Built-in default dataset
//!
//! Seed data reflecting real engineering shifts and multi-config
//! variations. This is what the tool falls back to when persisted
//! state is missing or unreadable.

use crate::core::location::{Location, ProjectId};
use crate::core::record::ComponentRecord;
use crate::core::stage::Stage;

fn record(part_number: &str, description: &str, configs: &[&str]) -> ComponentRecord {
    ComponentRecord::new(part_number, description)
        .with_configs(configs.iter().map(|s| s.to_string()).collect())
}

fn location(
    code: &str,
    project: ProjectId,
    stages: Vec<(Stage, Vec<ComponentRecord>)>,
) -> Location {
    let mut loc = Location::new(code, project);
    loc.stages.extend(stages);
    loc
}

/// The seed locations, in canonical store order
pub fn seed_locations() -> Vec<Location> {
    vec![
        location(
            "RF883",
            ProjectId::P7lh,
            vec![
                (
                    Stage::P1b,
                    vec![record(
                        "118S00495",
                        "RES,TK,226KOHM,1%,1/20W,0201",
                        &["FBU", "Mini", "Main"],
                    )],
                ),
                (
                    Stage::Evt,
                    vec![
                        record(
                            "118S00495",
                            "RES,TK,226KOHM,1%,1/20W,0201",
                            &["FBU", "Main"],
                        ),
                        record("118S01040", "RES,TK,232K OHM,1%,1/20W,0201", &["Mini"]),
                    ],
                ),
            ],
        ),
        location(
            "RF885",
            ProjectId::P7lh,
            vec![
                (
                    Stage::P1b,
                    vec![record("118S00373", "RES,TK,30.1K OHM,1%,1/20W,0201", &["Main"])],
                ),
                (
                    Stage::Evt,
                    vec![record("118S00521", "RES,TK,30K OHM,1%,1/20W,0201", &["Main"])],
                ),
            ],
        ),
        location(
            "UN400",
            ProjectId::P7lh,
            vec![
                (
                    Stage::P1b,
                    vec![record(
                        "338S01216",
                        "IC,PMU,KAZOO,D3252,A1,OTP-BC,LTPI,WCSP56",
                        &["Build A"],
                    )],
                ),
                (
                    Stage::Evt,
                    vec![record(
                        "338S01281",
                        "IC,PMU,KAZOO,D3252,A1,OTP-BC,PBO,WLCSP56",
                        &["Build B"],
                    )],
                ),
            ],
        ),
        location(
            "R2110",
            ProjectId::P7lh,
            vec![
                (
                    Stage::P1b,
                    vec![record("117S00073", "RES,TK,0 OHM,1A MAX,1/20W,0201", &["Main"])],
                ),
                (
                    Stage::Evt,
                    vec![record("117S00073", "RES,TK,0 OHM,1A MAX,1/20W,0201", &["Main"])],
                ),
            ],
        ),
        location(
            "RC305",
            ProjectId::P7lh,
            vec![
                (
                    Stage::P1b,
                    vec![record(
                        "103S00578",
                        "RES,TF,24.9K OHM,0.1%,1/20W,50PPM,0201",
                        &["Main"],
                    )],
                ),
                (
                    Stage::Evt,
                    vec![record(
                        "103S00578",
                        "RES,TF,24.9K OHM,0.1%,1/20W,50PPM,0201",
                        &["Main"],
                    )],
                ),
            ],
        ),
        location(
            "FP700",
            ProjectId::P7lh,
            vec![
                (
                    Stage::P1b,
                    vec![record("740S00056", "FUSE,6A,32V,13MOHM,0603", &["Main"])],
                ),
                (
                    Stage::Evt,
                    vec![record("740S0146", "FUSE 32V HIGH I2T 0603 FAST 6A", &["Main"])],
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::RecordStore;
    use crate::engine::diff::{classify, ChangeKind};

    #[test]
    fn test_seed_keys_are_unique() {
        let locations = seed_locations();
        let store = RecordStore::from_locations(locations.clone());
        assert_eq!(store.len(), locations.len());
    }

    #[test]
    fn test_seed_reflects_known_changes() {
        let store = RecordStore::from_locations(seed_locations());
        let rf885 = store.get("RF885", ProjectId::P7lh).unwrap();
        assert_eq!(classify(rf885, Stage::P1b, Stage::Evt), ChangeKind::Modified);
        let r2110 = store.get("R2110", ProjectId::P7lh).unwrap();
        assert_eq!(classify(r2110, Stage::P1b, Stage::Evt), ChangeKind::Unchanged);
    }
}
