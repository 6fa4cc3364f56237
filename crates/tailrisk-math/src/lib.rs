//! # Tailrisk Math
//!
//! Statistics utilities for the Tailrisk portfolio risk library.
//!
//! This crate provides:
//!
//! - **Returns**: [`log_returns`] from a positive price series
//! - **Moments**: [`mean`], population [`variance`] and [`std_dev`]
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Inputs are borrowed slices, never mutated
//! - **Explicit domains**: Empty input and non-positive prices are errors,
//!   not NaN

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::statistics::{log_returns, mean, std_dev, variance};
}

pub use error::{MathError, MathResult};
