//! Location entity - a board reference designator tracked per project

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::record::ComponentRecord;
use crate::core::stage::Stage;

/// Project identifier. A closed set; the same location code may exist
/// independently under different projects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum ProjectId {
    #[serde(rename = "P7LH")]
    #[value(name = "p7lh")]
    P7lh,
    #[serde(rename = "P7MH")]
    #[value(name = "p7mh")]
    P7mh,
}

impl ProjectId {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectId::P7lh => "P7LH",
            ProjectId::P7mh => "P7MH",
        }
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ProjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "p7lh" => Ok(ProjectId::P7lh),
            "p7mh" => Ok(ProjectId::P7mh),
            _ => Err(format!("Unknown project: '{}'. Use P7LH or P7MH", s)),
        }
    }
}

/// A tracked board location. The pair (location, project) is the true
/// unique key. A stage missing from the map means "not yet populated";
/// a present stage holds the records for every build config at that
/// milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Reference designator, e.g. "RF883"
    pub location: String,

    pub project: ProjectId,

    /// Per-stage component lists, keyed in canonical stage order
    #[serde(default)]
    pub stages: BTreeMap<Stage, Vec<ComponentRecord>>,
}

impl Location {
    /// New location with an empty stage map
    pub fn new(location: impl Into<String>, project: ProjectId) -> Self {
        Self {
            location: location.into(),
            project,
            stages: BTreeMap::new(),
        }
    }

    /// The records at a stage; an absent stage reads as empty
    pub fn records_at(&self, stage: Stage) -> &[ComponentRecord] {
        self.stages.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any data was ever captured for this stage (present but
    /// empty still counts as captured)
    pub fn has_stage(&self, stage: Stage) -> bool {
        self.stages.contains_key(&stage)
    }

    /// The (location, project) key
    pub fn key(&self) -> (&str, ProjectId) {
        (&self.location, self.project)
    }
}
