//! # tailrisk-risk
//!
//! Tail-risk estimators for a two-asset portfolio.
//!
//! - **Historical**: VaR and Expected Shortfall from the empirical return
//!   distribution, single-sample and rolling
//! - **Monte Carlo**: VaR and ES from per-window Gaussian fits of each
//!   asset's log-returns, single-window and rolling
//! - **Portfolio**: absolute portfolio returns from a price history
//!
//! Losses are reported as positive numbers.
//!
//! ## Example
//!
//! ```rust
//! use tailrisk_risk::prelude::*;
//!
//! let returns = [-5.0, -3.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let var = historical_var(&returns, 0.1).unwrap();
//! assert_eq!(var, 3.0);
//!
//! let rolling = rolling_historical_es(&returns, 0.1, 5).unwrap();
//! assert_eq!(rolling.len(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod error;
pub mod historical;
pub mod monte_carlo;
pub mod portfolio;

pub use error::{RiskError, RiskResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::historical::{
        historical_es, historical_var, rolling_historical_es, rolling_historical_var,
        tail_index, SortedSample,
    };
    pub use crate::monte_carlo::{
        MonteCarloConfig, MonteCarloEstimator, RollingSimulatedMeasures, SimulatedMeasures,
    };
    pub use crate::portfolio::{asset_log_returns, portfolio_returns};
}
