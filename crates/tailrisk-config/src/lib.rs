//! Tailrisk Configuration Layer
//!
//! Loads, validates and renders the parameters of a risk run.
//!
//! - **Risk Configuration**: window length, tail probabilities, Monte Carlo
//!   settings and the portfolio allocation ([`RiskConfig`])
//! - **Validation**: the [`Validate`] trait collects every rule violation
//!   before failing
//! - **Formats**: TOML and JSON, chosen by file extension
//!
//! # Example
//!
//! ```rust
//! use tailrisk_config::{RiskConfig, Validate};
//!
//! let config = RiskConfig::from_toml_str("window_length = 100\nseed = 42\n").unwrap();
//! assert_eq!(config.window_length, 100);
//! assert_eq!(config.alpha_var, 0.01);
//! assert!(config.is_valid());
//!
//! let mc = config.monte_carlo();
//! assert_eq!(mc.seed, Some(42));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod risk;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use risk::RiskConfig;
