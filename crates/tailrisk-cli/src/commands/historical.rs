//! Historical command implementation.
//!
//! Rolling historical VaR and ES on the portfolio's absolute returns.

use anyhow::Result;
use clap::Args;
use tracing::info;

use tailrisk_risk::historical::{rolling_historical_es, rolling_historical_var};
use tailrisk_risk::portfolio::portfolio_returns;

use crate::cli::OutputFormat;
use crate::commands::{finish_config, pair_by_date, Context, InputArgs};
use crate::output::{emit, print_info};

/// Arguments for the historical command.
#[derive(Args, Debug)]
pub struct HistoricalArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// VaR tail probability [default: 0.01]
    #[arg(long)]
    pub alpha_var: Option<f64>,

    /// ES tail probability [default: 0.025]
    #[arg(long)]
    pub alpha_es: Option<f64>,
}

/// Execute the historical command.
pub fn execute(args: HistoricalArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.base_config()?;
    args.input.apply(&mut config);
    if let Some(alpha) = args.alpha_var {
        config.alpha_var = alpha;
    }
    if let Some(alpha) = args.alpha_es {
        config.alpha_es = alpha;
    }
    let config = finish_config(config)?;

    let history = args.input.load_history()?;
    let returns = portfolio_returns(&history, &config.allocation()?)?;

    let var = rolling_historical_var(returns.values(), config.alpha_var, config.window_length)?;
    let es = rolling_historical_es(returns.values(), config.alpha_es, config.window_length)?;
    info!(estimates = var.len(), window = config.window_length, "historical run complete");

    let dated_var = var.align(history.dates());
    let dated_es = es.align(history.dates());
    let rows = pair_by_date(&dated_var, &dated_es);

    emit(&rows, ctx.format, args.input.output_path())?;

    if ctx.format == OutputFormat::Table && args.input.output.is_none() {
        if let Some(peak) = dated_var.peak() {
            print_info(&format!(
                "Peak {} (alpha {}): {:.4} on {}",
                var.measure(),
                var.alpha(),
                peak.value,
                peak.date
            ));
        }
    }
    Ok(())
}
