//! `cet show` command - One location's component history

use console::style;
use miette::Result;

use crate::cli::session::{resolve_location, Session};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::location::Location;
use crate::core::stage::Stage;
use crate::engine::diff::{classify, ChangeKind};

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Location code (e.g. RF883)
    pub location: String,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let store = session.load_store();
    let location = resolve_location(&store, &args.location, session.project)?;

    match session.output_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(location).unwrap_or_default());
        }
        OutputFormat::Id => {
            println!("{}", location.location);
        }
        _ => print_timeline(location),
    }

    Ok(())
}

fn print_timeline(location: &Location) {
    println!(
        "{} {}  {}",
        style("Location:").bold(),
        style(&location.location).cyan(),
        style(location.project).dim()
    );
    println!();

    let mut prev_populated: Option<Stage> = None;
    for stage in Stage::ALL {
        if !location.has_stage(stage) {
            continue;
        }

        let change_badge = match prev_populated {
            Some(prev) => match classify(location, prev, stage) {
                ChangeKind::Unchanged => style("unchanged").dim().to_string(),
                change => style(format!("{} since {}", change, prev)).yellow().to_string(),
            },
            None => style("first data").dim().to_string(),
        };
        println!("{} {}  [{}]", style("Stage").bold(), style(stage).cyan(), change_badge);

        let records = location.records_at(stage);
        if records.is_empty() {
            println!("  {}", style("(no records)").dim());
        }
        for record in records {
            println!(
                "  {:<12} {:<24} {}",
                style(&record.part_number).green(),
                record.configs.join(", "),
                style(&record.description).dim()
            );
            if let Some(ref notes) = record.notes {
                println!("  {}", style(format!("note: {}", notes)).dim());
            }
        }
        println!();
        prev_populated = Some(stage);
    }

    if location.stages.is_empty() {
        println!("{}", style("No stage data captured yet.").yellow());
    }
}
