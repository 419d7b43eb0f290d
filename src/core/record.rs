//! Component record - one part placement at one stage

use serde::{Deserialize, Serialize};

/// A single part placement. Immutable value; edits replace the whole
/// record, never a field in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// Part number (not guaranteed globally unique on its own)
    pub part_number: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Build-variant tags this placement applies to (e.g. "Main", "Mini", "FBU")
    pub configs: Vec<String>,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ComponentRecord {
    pub fn new(part_number: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            part_number: part_number.into(),
            description: description.into(),
            configs: vec!["Main".to_string()],
            notes: None,
        }
    }

    pub fn with_configs(mut self, configs: Vec<String>) -> Self {
        self.configs = configs;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Canonical change signature: part number plus the sorted, joined
    /// config set. Description and notes are deliberately excluded so
    /// cosmetic edits never read as a material change.
    pub fn signature(&self) -> (String, String) {
        let mut configs: Vec<&str> = self.configs.iter().map(String::as_str).collect();
        configs.sort_unstable();
        (self.part_number.clone(), configs.join(","))
    }
}
