//! Simulate command implementation.
//!
//! Rolling Monte Carlo VaR and ES from per-window Gaussian fits.

use anyhow::Result;
use clap::Args;
use tracing::info;

use tailrisk_risk::monte_carlo::MonteCarloEstimator;

use crate::cli::OutputFormat;
use crate::commands::{finish_config, pair_by_date, Context, InputArgs};
use crate::output::{emit, print_info};

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// VaR tail probability [default: 0.01]
    #[arg(long)]
    pub alpha_var: Option<f64>,

    /// ES tail probability [default: 0.025]
    #[arg(long)]
    pub alpha_es: Option<f64>,

    /// Simulated scenarios per window [default: 50000]
    #[arg(short = 'm', long)]
    pub simulations: Option<usize>,

    /// Random seed; omit for a fresh run each time
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluate windows on a single thread
    #[arg(long)]
    pub sequential: bool,
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.base_config()?;
    args.input.apply(&mut config);
    if let Some(alpha) = args.alpha_var {
        config.alpha_var = alpha;
    }
    if let Some(alpha) = args.alpha_es {
        config.alpha_es = alpha;
    }
    if let Some(simulations) = args.simulations {
        config.simulation_count = simulations;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.sequential {
        config.parallel = false;
    }
    let config = finish_config(config)?;

    let history = args.input.load_history()?;
    let allocation = config.allocation()?;
    let estimator = MonteCarloEstimator::new(config.monte_carlo())?;

    let mut rng = estimator.rng();
    let measures =
        estimator.rolling_simulated_measures(&history, config.window_length, &allocation, &mut rng)?;
    info!(
        estimates = measures.var.len(),
        window = config.window_length,
        simulations = config.simulation_count,
        "Monte Carlo run complete"
    );

    let dated_var = measures.var.align(history.dates());
    let dated_es = measures.es.align(history.dates());
    let rows = pair_by_date(&dated_var, &dated_es);

    emit(&rows, ctx.format, args.input.output_path())?;

    if ctx.format == OutputFormat::Table && args.input.output.is_none() {
        if let Some(peak) = dated_var.peak() {
            print_info(&format!(
                "Peak {} (alpha {}): {:.4} on {}",
                measures.var.measure(),
                measures.var.alpha(),
                peak.value,
                peak.date
            ));
        }
    }
    Ok(())
}
