//! Tailrisk CLI - rolling VaR and Expected Shortfall from two price files.
//!
//! # Usage
//!
//! ```bash
//! # Portfolio and asset returns
//! tailrisk returns --prices-a AAPL.csv --prices-b MSFT.csv
//!
//! # Rolling historical VaR (99%) and ES (97.5%) over 250-day windows
//! tailrisk historical --prices-a AAPL.csv --prices-b MSFT.csv --window 250
//!
//! # Reproducible Monte Carlo run, written to CSV for plotting
//! tailrisk simulate --prices-a AAPL.csv --prices-b MSFT.csv --seed 42 --output mc.csv
//!
//! # Start a configuration file
//! tailrisk config init tailrisk.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let ctx = Context {
        format: cli.format,
        config_path: cli.config,
    };

    match cli.command {
        Commands::Returns(args) => commands::returns::execute(args, &ctx)?,
        Commands::Historical(args) => commands::historical::execute(args, &ctx)?,
        Commands::Simulate(args) => commands::simulate::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs to stderr. `RUST_LOG` takes precedence over `--verbose` / `--quiet`.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
