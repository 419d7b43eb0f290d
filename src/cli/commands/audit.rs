//! `cet audit` command - Changes across all locations between two stages

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::escape_csv;
use crate::cli::session::Session;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::stage::Stage;
use crate::engine::audit::audit;

#[derive(clap::Args, Debug)]
pub struct AuditArgs {
    /// Source stage
    pub from: Stage,

    /// Target stage
    pub to: Stage,
}

pub fn run(args: AuditArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let store = session.load_store();

    let entries = audit(&store, args.from, args.to, session.project);

    match session.output_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
        }
        OutputFormat::Csv => {
            println!("location,project,change");
            for entry in &entries {
                println!(
                    "{},{},{}",
                    escape_csv(&entry.location),
                    entry.project,
                    entry.change
                );
            }
        }
        OutputFormat::Id => {
            for entry in &entries {
                println!("{}", entry.location);
            }
        }
        OutputFormat::Md => {
            let mut table = Builder::default();
            table.push_record(["Location", "Project", "Change"]);
            for entry in &entries {
                table.push_record([
                    entry.location.clone(),
                    entry.project.to_string(),
                    entry.change.to_string(),
                ]);
            }
            println!("{}", table.build().with(Style::markdown()));
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if entries.is_empty() {
                println!(
                    "No material differences found between {} and {}.",
                    style(args.from).cyan(),
                    style(args.to).cyan()
                );
                return Ok(());
            }

            println!(
                "{} location(s) changed between {} and {}:",
                style(entries.len()).cyan(),
                style(args.from).cyan(),
                style(args.to).cyan()
            );
            println!();
            println!(
                "{:<12} {:<8} {}",
                style("LOCATION").bold(),
                style("PROJECT").bold(),
                style("CHANGE").bold()
            );
            println!("{}", "-".repeat(32));
            for entry in &entries {
                println!(
                    "{:<12} {:<8} {}",
                    style(&entry.location).cyan(),
                    entry.project,
                    style(entry.change).yellow()
                );
            }
        }
    }

    Ok(())
}
