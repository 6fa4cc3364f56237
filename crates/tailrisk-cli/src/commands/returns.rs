//! Returns command implementation.
//!
//! Prints the portfolio's absolute returns next to each asset's
//! log-returns, dated at the end of each holding period.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tailrisk_core::Asset;
use tailrisk_risk::portfolio::{asset_log_returns, portfolio_returns};

use crate::commands::{finish_config, Context, InputArgs};
use crate::output::{emit, format_amount};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// One period of returns.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ReturnRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Portfolio", display_with = "format_amount")]
    pub portfolio: f64,
    #[tabled(rename = "Log A", display_with = "format_log")]
    pub log_return_a: f64,
    #[tabled(rename = "Log B", display_with = "format_log")]
    pub log_return_b: f64,
}

fn format_log(value: &f64) -> String {
    format!("{:.6}", value)
}

/// Execute the returns command.
pub fn execute(args: ReturnsArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.base_config()?;
    args.input.apply(&mut config);
    let config = finish_config(config)?;

    let history = args.input.load_history()?;
    let allocation = config.allocation()?;

    let portfolio = portfolio_returns(&history, &allocation)?;
    let log_a = asset_log_returns(&history, Asset::A)?;
    let log_b = asset_log_returns(&history, Asset::B)?;

    let rows: Vec<ReturnRow> = history
        .dates()
        .iter()
        .skip(1)
        .zip(portfolio.values())
        .zip(log_a.values().iter().zip(log_b.values()))
        .map(|((date, &portfolio), (&a, &b))| ReturnRow {
            date: date.to_string(),
            portfolio,
            log_return_a: a,
            log_return_b: b,
        })
        .collect();

    emit(&rows, ctx.format, args.input.output_path())
}
