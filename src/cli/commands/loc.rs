//! `cet loc` command - Location management

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::escape_csv;
use crate::cli::session::Session;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::location::{Location, ProjectId};

#[derive(Subcommand, Debug)]
pub enum LocCommands {
    /// List tracked locations
    List(ListArgs),

    /// Add a location with an empty stage map
    Add(AddArgs),

    /// Remove a location and all of its stage data
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Location code (e.g. R1234)
    pub location: String,

    /// Maintenance key
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Location code
    pub location: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,

    /// Maintenance key
    #[arg(long)]
    pub key: Option<String>,
}

pub fn run(cmd: LocCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LocCommands::List(args) => list(args, global),
        LocCommands::Add(args) => add(args, global),
        LocCommands::Rm(args) => rm(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let store = session.load_store();

    let locations: Vec<&Location> = store
        .iter()
        .filter(|l| session.project.map_or(true, |p| l.project == p))
        .collect();

    if args.count {
        println!("{}", locations.len());
        return Ok(());
    }

    match session.output_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&locations).unwrap_or_default());
        }
        OutputFormat::Csv => {
            println!("location,project,stages");
            for loc in &locations {
                println!(
                    "{},{},{}",
                    escape_csv(&loc.location),
                    loc.project,
                    loc.stages.len()
                );
            }
        }
        OutputFormat::Id => {
            for loc in &locations {
                println!("{}", loc.location);
            }
        }
        _ => {
            if locations.is_empty() {
                println!("{}", style("No locations tracked.").yellow());
                return Ok(());
            }
            println!(
                "{:<12} {:<8} {}",
                style("LOCATION").bold(),
                style("PROJECT").bold(),
                style("STAGES").bold()
            );
            println!("{}", "-".repeat(32));
            for loc in &locations {
                let stages: Vec<String> = loc.stages.keys().map(|s| s.to_string()).collect();
                println!(
                    "{:<12} {:<8} {}",
                    style(&loc.location).cyan(),
                    loc.project,
                    stages.join(", ")
                );
            }
            println!();
            println!("{} location(s).", style(locations.len()).cyan());
        }
    }

    Ok(())
}

fn add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    session.ensure_maintenance_access(args.key.as_deref())?;

    let project = required_project(&session)?;
    let code = args.location.trim().to_uppercase();
    if code.is_empty() {
        return Err(miette::miette!("Location code must not be empty"));
    }

    let mut store = session.load_store();
    if store.get(&code, project).is_some() {
        return Err(miette::miette!(
            "Location {} already exists in project {}",
            code,
            project
        ));
    }

    store.upsert(Location::new(&code, project));
    session.save_store(&store)?;

    if !global.quiet {
        println!(
            "{} Added location {} ({})",
            style("✓").green(),
            style(&code).cyan(),
            project
        );
    }
    Ok(())
}

fn rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    session.ensure_maintenance_access(args.key.as_deref())?;

    let project = required_project(&session)?;
    let mut store = session.load_store();

    if store.get(&args.location, project).is_none() {
        return Err(miette::miette!(
            "Location {} not found in project {}",
            args.location,
            project
        ));
    }

    if !args.force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete location {} ({}) and all of its stage data?",
                args.location, project
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.remove(&args.location, project);
    session.save_store(&store)?;

    if !global.quiet {
        println!(
            "{} Removed location {} ({})",
            style("✓").green(),
            style(&args.location).cyan(),
            project
        );
    }
    Ok(())
}

/// Structural edits address one project; require the context
fn required_project(session: &Session) -> Result<ProjectId> {
    session
        .project
        .ok_or_else(|| miette::miette!("Project required. Pass --project or set it in the config"))
}
