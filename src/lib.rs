//! CET: Component Evolution Tracker
//!
//! A Unix-style tool for tracking hardware component part numbers
//! across engineering build stages and detecting when a location's
//! part changed between two milestones.

pub mod cli;
pub mod core;
pub mod engine;
pub mod io;
