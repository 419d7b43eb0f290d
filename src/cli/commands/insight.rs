//! `cet insight` command - AI summary of a location's stage history
//!
//! The summarization service is opaque and optional. Every failure is
//! converted to fallback text; this command never fails the flow.

use console::style;
use miette::Result;

use crate::cli::session::{resolve_location, Session};
use crate::cli::GlobalOpts;
use crate::engine::insight::{InsightClient, FALLBACK_TEXT};

#[derive(clap::Args, Debug)]
pub struct InsightArgs {
    /// Location code
    pub location: String,
}

pub fn run(args: InsightArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let store = session.load_store();
    let location = resolve_location(&store, &args.location, session.project)?;

    let client = InsightClient::new(session.config.insight_command.clone());

    println!(
        "{} {} ({})",
        style("Evolution summary for").bold(),
        style(&location.location).cyan(),
        location.project
    );
    println!();

    match client.summarize(location) {
        Ok(text) => println!("{}", text),
        Err(err) => {
            if global.verbose {
                eprintln!("{} {}", style("✗").red(), err);
            }
            println!("{}", style(FALLBACK_TEXT).yellow());
        }
    }

    Ok(())
}
