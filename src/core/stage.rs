//! Project stage enumeration
//!
//! The declaration order is canonical: it defines "previous stage" for
//! every delta computation in the engine. Never infer order from map
//! iteration elsewhere.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Engineering build milestone
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum Stage {
    #[serde(rename = "P1a")]
    #[value(name = "p1a")]
    P1a,
    #[serde(rename = "P1b")]
    #[value(name = "p1b")]
    P1b,
    #[serde(rename = "EVT")]
    #[value(name = "evt")]
    Evt,
    #[serde(rename = "DVT")]
    #[value(name = "dvt")]
    Dvt,
    #[serde(rename = "PVT")]
    #[value(name = "pvt")]
    Pvt,
    #[serde(rename = "MP")]
    #[value(name = "mp")]
    Mp,
}

impl Stage {
    /// All stages in canonical order
    pub const ALL: [Stage; 6] = [
        Stage::P1a,
        Stage::P1b,
        Stage::Evt,
        Stage::Dvt,
        Stage::Pvt,
        Stage::Mp,
    ];

    /// The milestone label as it appears in data files
    pub fn label(&self) -> &'static str {
        match self {
            Stage::P1a => "P1a",
            Stage::P1b => "P1b",
            Stage::Evt => "EVT",
            Stage::Dvt => "DVT",
            Stage::Pvt => "PVT",
            Stage::Mp => "MP",
        }
    }

    /// The stage immediately before this one in canonical order
    pub fn prev(&self) -> Option<Stage> {
        let idx = Stage::ALL.iter().position(|s| s == self)?;
        idx.checked_sub(1).map(|i| Stage::ALL[i])
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    /// Case-insensitive; this is the import-boundary matcher
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "p1a" => Ok(Stage::P1a),
            "p1b" => Ok(Stage::P1b),
            "evt" => Ok(Stage::Evt),
            "dvt" => Ok(Stage::Dvt),
            "pvt" => Ok(Stage::Pvt),
            "mp" => Ok(Stage::Mp),
            _ => Err(format!(
                "Unknown stage: '{}'. Use P1a, P1b, EVT, DVT, PVT, or MP",
                s
            )),
        }
    }
}
