//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, HistoricalArgs, ReturnsArgs, SimulateArgs};

/// Tailrisk - rolling VaR and Expected Shortfall for two-asset portfolios
#[derive(Parser)]
#[command(name = "tailrisk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true, env = "TAILRISK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log progress at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the portfolio's absolute returns and each asset's log-returns
    Returns(ReturnsArgs),

    /// Rolling historical VaR and ES
    Historical(HistoricalArgs),

    /// Rolling Monte Carlo VaR and ES
    Simulate(SimulateArgs),

    /// Manage configuration files
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
