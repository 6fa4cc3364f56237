//! # Tailrisk Core
//!
//! Data model shared by the Tailrisk crates.
//!
//! - **Types**: [`Date`], [`PriceHistory`], [`Allocation`], [`ReturnSeries`]
//! - **Risk output**: [`RiskMeasureSeries`] and its date-aligned form
//!   [`DatedRiskSeries`]
//! - **Errors**: [`CoreError`] for construction-time validation
//!
//! ## Example
//!
//! ```rust
//! use tailrisk_core::prelude::*;
//!
//! let dates = vec![
//!     Date::from_ymd(2024, 1, 2).unwrap(),
//!     Date::from_ymd(2024, 1, 3).unwrap(),
//!     Date::from_ymd(2024, 1, 4).unwrap(),
//! ];
//! let history = PriceHistory::new(dates, vec![100.0, 102.0, 101.0], vec![50.0, 49.5, 50.5]).unwrap();
//! assert_eq!(history.len(), 3);
//!
//! let allocation = Allocation::new(600.0, 400.0).unwrap();
//! assert_eq!(allocation.budget_a(), 600.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{
    Allocation, Asset, Date, DatedRiskSeries, PriceHistory, PriceWindow, ReturnKind, ReturnSeries,
    RiskMeasure, RiskMeasureSeries, RiskPoint,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Allocation, Asset, Date, DatedRiskSeries, PriceHistory, PriceWindow, ReturnKind,
        ReturnSeries, RiskMeasure, RiskMeasureSeries, RiskPoint,
    };
}
