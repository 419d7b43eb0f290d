//! `cet reset` command - Restore the built-in default dataset

use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::session::Session;
use crate::cli::GlobalOpts;
use crate::core::store::RecordStore;
use crate::io::default_data;

#[derive(clap::Args, Debug)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,

    /// Maintenance key
    #[arg(long)]
    pub key: Option<String>,
}

pub fn run(args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    session.ensure_maintenance_access(args.key.as_deref())?;

    if !args.force {
        let confirmed = Confirm::new()
            .with_prompt("Delete ALL local changes and restore the default dataset?")
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let store = RecordStore::from_locations(default_data::seed_locations());
    session.save_store(&store)?;

    if !global.quiet {
        println!(
            "{} Dataset reset to {} default location(s)",
            style("✓").green(),
            store.len()
        );
    }
    Ok(())
}
