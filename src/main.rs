use cet::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Show(args) => cet::cli::commands::show::run(args, &global),
        Commands::Compare(args) => cet::cli::commands::compare::run(args, &global),
        Commands::Audit(args) => cet::cli::commands::audit::run(args, &global),
        Commands::WhereUsed(args) => cet::cli::commands::where_used::run(args, &global),
        Commands::Search(args) => cet::cli::commands::search::run(args, &global),
        Commands::Import(args) => cet::cli::commands::import::run(args, &global),
        Commands::Export(args) => cet::cli::commands::export::run(args, &global),
        Commands::Loc(cmd) => cet::cli::commands::loc::run(cmd, &global),
        Commands::Rec(cmd) => cet::cli::commands::rec::run(cmd, &global),
        Commands::Insight(args) => cet::cli::commands::insight::run(args, &global),
        Commands::Reset(args) => cet::cli::commands::reset::run(args, &global),
        Commands::Completions(args) => cet::cli::commands::completions::run(args),
    }
}
