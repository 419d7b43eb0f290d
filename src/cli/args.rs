//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    audit::AuditArgs,
    compare::CompareArgs,
    completions::CompletionsArgs,
    export::ExportArgs,
    import::ImportArgs,
    insight::InsightArgs,
    loc::LocCommands,
    rec::RecCommands,
    reset::ResetArgs,
    search::SearchArgs,
    show::ShowArgs,
    where_used::WhereUsedArgs,
};
use crate::core::location::ProjectId;

#[derive(Parser)]
#[command(name = "cet")]
#[command(author, version, about = "Component Evolution Tracker")]
#[command(
    long_about = "A Unix-style tool for tracking hardware component part numbers across engineering build stages and auditing changes between milestones."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Dataset file (default: per-user data directory)
    #[arg(long, global = true, env = "CET_DATA_FILE")]
    pub data: Option<PathBuf>,

    /// Active project context (filters reports and imports)
    #[arg(long, short = 'p', global = true)]
    pub project: Option<ProjectId>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a location's component history across all stages
    Show(ShowArgs),

    /// Classify the change at one location between two stages
    Compare(CompareArgs),

    /// Audit every location for changes between two stages
    Audit(AuditArgs),

    /// Report where a part number is used, stage by stage
    WhereUsed(WhereUsedArgs),

    /// Search locations and part numbers
    Search(SearchArgs),

    /// Bulk-import locations from a CSV or JSON file
    Import(ImportArgs),

    /// Export the full dataset as a JSON document
    Export(ExportArgs),

    /// Location management (add/remove/list)
    #[command(subcommand)]
    Loc(LocCommands),

    /// Component record management within a location's stage
    #[command(subcommand)]
    Rec(RecCommands),

    /// AI summary of a location's stage history
    Insight(InsightArgs),

    /// Restore the built-in default dataset
    Reset(ResetArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just location codes or part numbers, one per line
    Id,
}
