//! `cet where-used` command - Where a part number is used, stage by stage

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::session::Session;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::engine::usage::usage_report;

#[derive(clap::Args, Debug)]
pub struct WhereUsedArgs {
    /// Part number to search for (exact match)
    pub part_number: String,
}

pub fn run(args: WhereUsedArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let store = session.load_store();

    let report = usage_report(&store, &args.part_number);

    match session.output_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
            return Ok(());
        }
        OutputFormat::Csv => {
            println!("stage,location,project,status");
            for (stage, entries) in &report.per_stage {
                for entry in entries {
                    println!(
                        "{},{},{},{}",
                        stage,
                        escape_csv(&entry.location),
                        entry.project,
                        entry.status
                    );
                }
            }
            return Ok(());
        }
        OutputFormat::Id => {
            let mut seen: Vec<&str> = Vec::new();
            for entries in report.per_stage.values() {
                for entry in entries {
                    if !seen.contains(&entry.location.as_str()) {
                        seen.push(&entry.location);
                        println!("{}", entry.location);
                    }
                }
            }
            return Ok(());
        }
        OutputFormat::Md => {
            let mut table = Builder::default();
            table.push_record(["Stage", "Location", "Project", "Status"]);
            for (stage, entries) in &report.per_stage {
                for entry in entries {
                    table.push_record([
                        stage.to_string(),
                        entry.location.clone(),
                        entry.project.to_string(),
                        entry.status.to_string(),
                    ]);
                }
            }
            println!("{}", table.build().with(Style::markdown()));
            return Ok(());
        }
        _ => {}
    }

    println!(
        "{} {}",
        style("Part number:").bold(),
        style(&report.part_number).green()
    );
    // first-match description; the same part number may carry other
    // descriptions elsewhere in the dataset
    if let Some(ref description) = report.description {
        println!("{} {}", style("Description:").bold(), truncate_str(description, 60));
    }
    println!();

    if report.per_stage.is_empty() {
        println!("{}", style("Not used at any location.").yellow());
        return Ok(());
    }

    for (stage, entries) in &report.per_stage {
        println!("{} {}", style("Stage").bold(), style(stage).cyan());
        for entry in entries {
            let status = match entry.status {
                crate::engine::usage::UsageStatus::Added => style("added").green(),
                crate::engine::usage::UsageStatus::Removed => style("removed").red(),
                crate::engine::usage::UsageStatus::Stable => style("stable").dim(),
            };
            println!(
                "  {:<12} {:<8} {}",
                style(&entry.location).cyan(),
                entry.project,
                status
            );
        }
        println!();
    }

    Ok(())
}
