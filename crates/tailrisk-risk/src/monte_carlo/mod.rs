//! Monte Carlo VaR and Expected Shortfall.
//!
//! Each window's log-returns are fitted with an independent Gaussian per
//! asset; simulated scenarios are aggregated into absolute portfolio P&L
//! and ranked with the historical estimator.

mod estimator;
mod gaussian;

pub use estimator::{
    aggregate_portfolio_returns, simulate_from_uniforms, MonteCarloConfig, MonteCarloEstimator,
    RollingSimulatedMeasures, SimulatedMeasures, DEFAULT_ALPHA_ES, DEFAULT_ALPHA_VAR,
    DEFAULT_SIMULATION_COUNT,
};
pub use gaussian::{fit_and_sample_quantiles, GaussianFit};
