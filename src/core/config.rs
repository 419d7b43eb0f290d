//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::location::ProjectId;

/// CET configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the dataset file
    pub data_file: Option<PathBuf>,

    /// Active project context for imports and filtered reports
    pub project: Option<ProjectId>,

    /// Key required by maintenance commands. Plain string equality,
    /// not a security boundary.
    pub maintenance_key: Option<String>,

    /// External command used by `cet insight` for AI summaries
    pub insight_command: Option<String>,

    /// Default output format (auto, tsv, json, csv, md, id)
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/cet/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(path) = std::env::var("CET_DATA_FILE") {
            config.data_file = Some(PathBuf::from(path));
        }
        if let Ok(project) = std::env::var("CET_PROJECT") {
            if let Ok(p) = ProjectId::from_str(&project) {
                config.project = Some(p);
            }
        }
        if let Ok(key) = std::env::var("CET_MAINTENANCE_KEY") {
            config.maintenance_key = Some(key);
        }
        if let Ok(cmd) = std::env::var("CET_INSIGHT_COMMAND") {
            config.insight_command = Some(cmd);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cet")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.project.is_some() {
            self.project = other.project;
        }
        if other.maintenance_key.is_some() {
            self.maintenance_key = other.maintenance_key;
        }
        if other.insight_command.is_some() {
            self.insight_command = other.insight_command;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Resolve the dataset file path, falling back to the per-user
    /// data directory
    pub fn data_file(&self) -> PathBuf {
        if let Some(ref path) = self.data_file {
            return path.clone();
        }

        directories::ProjectDirs::from("", "", "cet")
            .map(|dirs| dirs.data_dir().join("dataset.json"))
            .unwrap_or_else(|| PathBuf::from("cet-dataset.json"))
    }
}
