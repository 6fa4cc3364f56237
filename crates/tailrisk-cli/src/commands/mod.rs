//! CLI command implementations.

pub mod config;
pub mod historical;
pub mod returns;
pub mod simulate;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use historical::HistoricalArgs;
pub use returns::ReturnsArgs;
pub use simulate::SimulateArgs;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use tailrisk_config::{RiskConfig, Validate};
use tailrisk_core::{DatedRiskSeries, PriceHistory};
use tailrisk_ext_file::{load_price_history, ColumnSelector, PriceFileReader};
use tracing::debug;

use crate::cli::OutputFormat;

/// Global options shared by every command.
#[derive(Debug)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// `--config` file, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Defaults, overlaid with the `--config` file when given.
    pub fn base_config(&self) -> Result<RiskConfig> {
        match &self.config_path {
            Some(path) => RiskConfig::from_file(path)
                .with_context(|| format!("loading configuration {}", path.display())),
            None => Ok(RiskConfig::default()),
        }
    }
}

/// Price inputs and portfolio settings shared by the analysis commands.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Price file of asset A (CSV with a header row)
    #[arg(short = 'a', long)]
    pub prices_a: PathBuf,

    /// Price file of asset B (CSV with a header row)
    #[arg(short = 'b', long)]
    pub prices_b: PathBuf,

    /// Date column, by header name or zero-based index
    #[arg(long, default_value = "Date")]
    pub date_column: ColumnSelector,

    /// Price column, by header name or zero-based index
    #[arg(long, default_value = "Close")]
    pub price_column: ColumnSelector,

    /// Date format of the date column (chrono syntax)
    #[arg(long, default_value = "%Y-%m-%d")]
    pub date_format: String,

    /// Budget held in asset A [default: 600]
    #[arg(long)]
    pub budget_a: Option<f64>,

    /// Budget held in asset B [default: 400]
    #[arg(long)]
    pub budget_b: Option<f64>,

    /// Rolling window length [default: 250]
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Write CSV to this file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InputArgs {
    /// Copies the flags that were given onto `config`.
    pub fn apply(&self, config: &mut RiskConfig) {
        if let Some(window) = self.window {
            config.window_length = window;
        }
        if let Some(budget_a) = self.budget_a {
            config.budget_a = budget_a;
        }
        if let Some(budget_b) = self.budget_b {
            config.budget_b = budget_b;
        }
    }

    /// Reads and joins the two price files.
    pub fn load_history(&self) -> Result<PriceHistory> {
        let reader = PriceFileReader::new()
            .with_date_column(self.date_column.clone())
            .with_price_column(self.price_column.clone())
            .with_date_format(self.date_format.clone());

        let history = load_price_history(&self.prices_a, &self.prices_b, &reader)?;
        debug!(observations = history.len(), "price history loaded");
        Ok(history)
    }

    /// Output file, if any.
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

/// Validates the effective configuration after overrides.
pub fn finish_config(config: RiskConfig) -> Result<RiskConfig> {
    config.validate_or_error()?;
    debug!(?config, "effective configuration");
    Ok(config)
}

/// Pairs a VaR series with the ES series of the same run by date.
pub fn pair_by_date(var: &DatedRiskSeries, es: &DatedRiskSeries) -> Vec<RiskRow> {
    var.points
        .iter()
        .zip(&es.points)
        .map(|(v, e)| RiskRow {
            date: v.date.to_string(),
            var: v.value,
            es: e.value,
        })
        .collect()
}

/// One dated VaR / ES estimate.
#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
pub struct RiskRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "VaR", display_with = "crate::output::format_amount")]
    pub var: f64,
    #[tabled(rename = "ES", display_with = "crate::output::format_amount")]
    pub es: f64,
}
