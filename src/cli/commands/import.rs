//! `cet import` command - Bulk-import locations from CSV or JSON

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::cli::session::Session;
use crate::cli::GlobalOpts;
use crate::io::import::parse_file;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV or JSON file to import
    pub file: Option<PathBuf>,

    /// Print a CSV template and exit
    #[arg(long)]
    pub template: bool,

    /// Validate the file without touching the dataset
    #[arg(long)]
    pub dry_run: bool,

    /// Maintenance key
    #[arg(long)]
    pub key: Option<String>,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        println!("Location,Project,Stage,Part Number,Description,Configs,Noted");
        println!("RF883,P7LH,P1b,118S00495,\"RES,TK,226KOHM,1%,1/20W,0201\",\"FBU, Mini, Main\",");
        return Ok(());
    }

    let file = args
        .file
        .ok_or_else(|| miette::miette!("File required. Usage: cet import data.csv"))?;

    let session = Session::open(global);
    session.ensure_maintenance_access(args.key.as_deref())?;

    if !file.exists() {
        return Err(miette::miette!("File not found: {}", file.display()));
    }

    let outcome = parse_file(&file, session.project).map_err(|e| miette::miette!("{}", e))?;

    for line in &outcome.diagnostics {
        eprintln!("{} {}", style("✗").red(), line);
    }

    if args.dry_run {
        println!(
            "{} Dry run: {} row(s) read, {} location(s) would be merged, {} skipped",
            style("○").dim(),
            outcome.rows,
            outcome.locations.len(),
            outcome.skipped.total()
        );
        return Ok(());
    }

    let mut store = session.load_store();
    let stats = store.merge(outcome.locations);
    session.save_store(&store)?;

    if !global.quiet {
        println!(
            "{} Imported {} row(s): {} location(s) replaced, {} appended",
            style("✓").green(),
            outcome.rows,
            stats.replaced,
            stats.appended
        );
        if outcome.skipped.total() > 0 {
            println!(
                "{} Skipped rows: {} unknown stage, {} wrong project, {} missing field",
                style("→").blue(),
                outcome.skipped.unknown_stage,
                outcome.skipped.wrong_project,
                outcome.skipped.missing_field
            );
        }
    }

    Ok(())
}
