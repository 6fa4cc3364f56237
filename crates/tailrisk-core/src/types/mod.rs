//! Domain types for two-asset risk estimation.
//!
//! - [`Date`]: Calendar date of an observation
//! - [`PriceHistory`]: Two index-aligned price series with their dates
//! - [`Allocation`]: Currency budget invested in each asset
//! - [`ReturnSeries`]: Absolute or logarithmic returns derived from prices
//! - [`RiskMeasureSeries`]: Rolling-window VaR/ES output
//! - [`DatedRiskSeries`]: Risk output paired with the dates it applies to

mod allocation;
mod date;
mod history;
mod series;

pub use allocation::Allocation;
pub use date::Date;
pub use history::{Asset, PriceHistory, PriceWindow};
pub use series::{
    DatedRiskSeries, ReturnKind, ReturnSeries, RiskMeasure, RiskMeasureSeries, RiskPoint,
};
