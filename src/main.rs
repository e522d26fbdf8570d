use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod design;
mod masking;
mod parsing;
mod report;
mod thermo;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("probe_design=debug,info")
    } else {
        EnvFilter::new("probe_design=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Design(args) => {
            cli::design::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Batch(args) => {
            cli::batch::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
