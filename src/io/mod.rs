//! IO module - persistence, default data, and the import/export
//! boundary

pub mod default_data;
pub mod export;
pub mod import;
pub mod persist;

pub use import::{ImportError, ImportFormat, ImportOutcome, SkipCounts};
pub use persist::{Dataset, FileState, MemoryState, PersistError, StateStore, SCHEMA_VERSION};
