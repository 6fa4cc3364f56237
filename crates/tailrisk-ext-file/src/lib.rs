//! File-based price data for Tailrisk.
//!
//! Reads daily price exports (CSV with a header row) and joins two of them
//! into a [`tailrisk_core::PriceHistory`]. Malformed rows are logged at
//! `warn` level and skipped.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod reader;

pub use error::{FileError, FileResult};
pub use reader::{load_price_history, ColumnSelector, PriceFileReader, PricePoint};
