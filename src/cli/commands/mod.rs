//! CLI command implementations

pub mod audit;
pub mod compare;
pub mod completions;
pub mod export;
pub mod import;
pub mod insight;
pub mod loc;
pub mod rec;
pub mod reset;
pub mod search;
pub mod show;
pub mod where_used;
