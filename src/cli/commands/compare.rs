//! `cet compare` command - Classify one location between two stages

use console::style;
use miette::Result;

use crate::cli::session::{resolve_location, Session};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::record::ComponentRecord;
use crate::core::stage::Stage;
use crate::engine::diff::classify;

#[derive(clap::Args, Debug)]
pub struct CompareArgs {
    /// Location code (e.g. RF883)
    pub location: String,

    /// Source stage
    pub from: Stage,

    /// Target stage
    pub to: Stage,
}

pub fn run(args: CompareArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let store = session.load_store();
    let location = resolve_location(&store, &args.location, session.project)?;

    let change = classify(location, args.from, args.to);
    let side_a = location.records_at(args.from);
    let side_b = location.records_at(args.to);

    match session.output_format(global) {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "location": location.location,
                "project": location.project,
                "from": args.from,
                "to": args.to,
                "change": change,
                "recordsAtFrom": side_a,
                "recordsAtTo": side_b,
            });
            println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());
        }
        OutputFormat::Id => {
            println!("{}", change);
        }
        _ => {
            println!(
                "{} {} ({})  {} → {}: {}",
                style("Location").bold(),
                style(&location.location).cyan(),
                location.project,
                args.from,
                args.to,
                style(change).yellow().bold()
            );
            println!();
            print_side(args.from, side_a, side_b);
            println!();
            print_side(args.to, side_b, side_a);
        }
    }

    Ok(())
}

/// Print one stage's records, flagging parts absent from the other side
fn print_side(stage: Stage, records: &[ComponentRecord], other: &[ComponentRecord]) {
    println!("{} {}", style("Stage").bold(), style(stage).cyan());
    if records.is_empty() {
        println!("  {}", style("(no records in this stage)").dim());
        return;
    }
    for record in records {
        let unique = !other.iter().any(|o| o.part_number == record.part_number);
        let marker = if unique {
            style(format!("  unique to {}", stage)).yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<12} {:<24} {}{}",
            style(&record.part_number).green(),
            record.configs.join(", "),
            style(&record.description).dim(),
            marker
        );
    }
}
