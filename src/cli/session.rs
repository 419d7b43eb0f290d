//! Command session - config, dataset backend, and project context
//!
//! Every command opens a session: it resolves the dataset file from
//! the global flags and config, loads the store (with fallback to the
//! default dataset), and carries the active project context. Mutating
//! commands additionally pass the maintenance gate.

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::location::{Location, ProjectId};
use crate::core::store::RecordStore;
use crate::io::persist::{self, FileState};

pub struct Session {
    pub config: Config,
    pub project: Option<ProjectId>,
    backend: FileState,
}

impl Session {
    pub fn open(global: &GlobalOpts) -> Self {
        let config = Config::load();
        let path = global.data.clone().unwrap_or_else(|| config.data_file());
        let project = global.project.or(config.project);
        Self {
            backend: FileState::new(path),
            project,
            config,
        }
    }

    /// Load the store; never fails (falls back to the default dataset)
    pub fn load_store(&self) -> RecordStore {
        persist::load(&self.backend)
    }

    /// Effective output format: an explicit --format wins; `auto`
    /// defers to the config's default_format when one is set, and an
    /// unrecognized configured value reads as auto
    pub fn output_format(&self, global: &GlobalOpts) -> OutputFormat {
        if global.format != OutputFormat::Auto {
            return global.format;
        }
        self.config
            .default_format
            .as_deref()
            .and_then(|s| OutputFormat::from_str(s, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }

    /// Mirror the store back to the dataset file
    pub fn save_store(&self, store: &RecordStore) -> Result<()> {
        persist::save(&self.backend, store).into_diagnostic()
    }

    /// Maintenance gate: plain string equality against the configured
    /// key. Open when no key is configured. Not a security boundary.
    pub fn ensure_maintenance_access(&self, key: Option<&str>) -> Result<()> {
        match self.config.maintenance_key.as_deref() {
            None => Ok(()),
            Some(expected) if Some(expected) == key => Ok(()),
            Some(_) => Err(miette::miette!(
                "Maintenance key required. Pass it with --key"
            )),
        }
    }
}

/// Resolve a location by code, using the project context to
/// disambiguate codes that exist under more than one project
pub fn resolve_location<'a>(
    store: &'a RecordStore,
    code: &str,
    project: Option<ProjectId>,
) -> Result<&'a Location> {
    if let Some(project) = project {
        return store
            .get(code, project)
            .ok_or_else(|| miette::miette!("Location {} not found in project {}", code, project));
    }

    let matches = store.find_by_code(code);
    match matches.as_slice() {
        [] => Err(miette::miette!("Location {} not found", code)),
        [single] => Ok(single),
        many => Err(miette::miette!(
            "Location {} exists in {} projects ({}). Disambiguate with --project",
            code,
            many.len(),
            many.iter()
                .map(|l| l.project.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}
