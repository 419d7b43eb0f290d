//! `cet rec` command - Component record management
//!
//! Records are values: add appends a whole record, set replaces one
//! wholesale, rm deletes one. There is no field-level edit.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::session::Session;
use crate::cli::GlobalOpts;
use crate::core::location::ProjectId;
use crate::core::record::ComponentRecord;
use crate::core::stage::Stage;

#[derive(Subcommand, Debug)]
pub enum RecCommands {
    /// Append a record to a location's stage
    Add(AddArgs),

    /// Replace the record at an index wholesale
    Set(SetArgs),

    /// Delete the record at an index
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Location code
    pub location: String,

    /// Stage to add the record to
    pub stage: Stage,

    /// Part number
    pub part_number: String,

    /// Free-text description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Comma-separated build variant tags
    #[arg(long, short = 'c', default_value = "Main")]
    pub configs: String,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Maintenance key
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Location code
    pub location: String,

    /// Stage holding the record
    pub stage: Stage,

    /// Zero-based index within the stage's record list
    pub index: usize,

    /// Part number
    pub part_number: String,

    /// Free-text description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Comma-separated build variant tags
    #[arg(long, short = 'c', default_value = "Main")]
    pub configs: String,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Maintenance key
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Location code
    pub location: String,

    /// Stage holding the record
    pub stage: Stage,

    /// Zero-based index within the stage's record list
    pub index: usize,

    /// Maintenance key
    #[arg(long)]
    pub key: Option<String>,
}

pub fn run(cmd: RecCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        RecCommands::Add(args) => add(args, global),
        RecCommands::Set(args) => set(args, global),
        RecCommands::Rm(args) => rm(args, global),
    }
}

fn parse_configs(cell: &str) -> Result<Vec<String>> {
    let configs: Vec<String> = cell
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if configs.is_empty() {
        return Err(miette::miette!(
            "Configs must list at least one build variant"
        ));
    }
    Ok(configs)
}

fn build_record(
    part_number: &str,
    description: &str,
    configs: &str,
    notes: Option<String>,
) -> Result<ComponentRecord> {
    let mut record =
        ComponentRecord::new(part_number, description).with_configs(parse_configs(configs)?);
    record.notes = notes;
    Ok(record)
}

/// Look up the target location mutably; structural edits address one
/// project, so the context is required
fn edit_location<'a>(
    session: &Session,
    store: &'a mut crate::core::store::RecordStore,
    code: &str,
) -> Result<(&'a mut crate::core::location::Location, ProjectId)> {
    let project = session
        .project
        .ok_or_else(|| miette::miette!("Project required. Pass --project or set it in the config"))?;

    let location = store.get_mut(code, project).ok_or_else(|| {
        miette::miette!(
            "Location {} not found in project {}. Add it first with 'cet loc add'",
            code,
            project
        )
    })?;
    Ok((location, project))
}

fn add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    session.ensure_maintenance_access(args.key.as_deref())?;

    let record = build_record(
        &args.part_number,
        &args.description,
        &args.configs,
        args.notes,
    )?;

    let mut store = session.load_store();
    let (location, project) = edit_location(&session, &mut store, &args.location)?;
    location.stages.entry(args.stage).or_default().push(record);
    session.save_store(&store)?;

    if !global.quiet {
        println!(
            "{} Added {} to {} ({}) at {}",
            style("✓").green(),
            style(&args.part_number).green(),
            style(&args.location).cyan(),
            project,
            args.stage
        );
    }
    Ok(())
}

fn set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    session.ensure_maintenance_access(args.key.as_deref())?;

    let record = build_record(
        &args.part_number,
        &args.description,
        &args.configs,
        args.notes,
    )?;

    let mut store = session.load_store();
    let (location, _) = edit_location(&session, &mut store, &args.location)?;

    let records = location.stages.get_mut(&args.stage).ok_or_else(|| {
        miette::miette!("No data captured for {} at {}", args.location, args.stage)
    })?;
    let len = records.len();
    let slot = records.get_mut(args.index).ok_or_else(|| {
        miette::miette!(
            "No record at index {} for {} {} ({} record(s))",
            args.index,
            args.location,
            args.stage,
            len
        )
    })?;
    *slot = record;
    session.save_store(&store)?;

    if !global.quiet {
        println!(
            "{} Replaced record {} of {} at {}",
            style("✓").green(),
            args.index,
            style(&args.location).cyan(),
            args.stage
        );
    }
    Ok(())
}

fn rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    session.ensure_maintenance_access(args.key.as_deref())?;

    let mut store = session.load_store();
    let (location, _) = edit_location(&session, &mut store, &args.location)?;

    let records = location.stages.get_mut(&args.stage).ok_or_else(|| {
        miette::miette!("No data captured for {} at {}", args.location, args.stage)
    })?;
    if args.index >= records.len() {
        return Err(miette::miette!(
            "No record at index {} for {} {} ({} record(s))",
            args.index,
            args.location,
            args.stage,
            records.len()
        ));
    }
    let removed = records.remove(args.index);
    session.save_store(&store)?;

    if !global.quiet {
        println!(
            "{} Removed {} from {} at {}",
            style("✓").green(),
            style(&removed.part_number).green(),
            style(&args.location).cyan(),
            args.stage
        );
    }
    Ok(())
}
