//! `cet export` command - Export the dataset as a JSON document

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::session::Session;
use crate::cli::GlobalOpts;
use crate::io::export;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let store = session.load_store();

    let to_file = args.output.is_some();
    let path_display = args
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    export::write(&store, args.output).into_diagnostic()?;

    if to_file && !global.quiet {
        println!(
            "{} Exported {} location(s) to {}",
            style("✓").green(),
            store.len(),
            style(path_display).yellow()
        );
    }

    Ok(())
}
