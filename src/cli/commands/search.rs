//! `cet search` command - Search locations and part numbers

use console::style;
use miette::Result;

use crate::cli::helpers::escape_csv;
use crate::cli::session::Session;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::engine::search::search;

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search term (matched against location codes and part numbers)
    pub term: String,

    /// Show only count of matches
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let store = session.load_store();

    let hits = search(&store, &args.term, session.project);

    if args.count {
        println!("{}", hits.locations.len() + hits.part_numbers.len());
        return Ok(());
    }

    match session.output_format(global) {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "locations": hits.locations,
                "partNumbers": hits.part_numbers,
            });
            println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());
        }
        OutputFormat::Csv => {
            println!("kind,value,project");
            for loc in &hits.locations {
                println!("location,{},{}", escape_csv(&loc.location), loc.project);
            }
            for pn in &hits.part_numbers {
                println!("part_number,{},", escape_csv(pn));
            }
        }
        OutputFormat::Id => {
            for loc in &hits.locations {
                println!("{}", loc.location);
            }
            for pn in &hits.part_numbers {
                println!("{}", pn);
            }
        }
        _ => {
            if hits.locations.is_empty() && hits.part_numbers.is_empty() {
                println!("No results found for '{}'.", style(&args.term).yellow());
                return Ok(());
            }

            if !hits.locations.is_empty() {
                println!("{}", style("Locations").bold());
                for loc in &hits.locations {
                    let stage_count = loc.stages.len();
                    println!(
                        "  {:<12} {:<8} {} stage(s) populated",
                        style(&loc.location).cyan(),
                        loc.project,
                        stage_count
                    );
                }
                println!();
            }

            if !hits.part_numbers.is_empty() {
                println!("{}", style("Part numbers").bold());
                for pn in &hits.part_numbers {
                    println!("  {}", style(pn).green());
                }
            }
        }
    }

    Ok(())
}
