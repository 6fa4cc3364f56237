//! Error types for the Tailrisk data model.

use thiserror::Error;

/// A specialized Result type for data-model construction.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building validated data-model values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Two series that must be index-aligned differ in length.
    #[error("Input length mismatch for {what}: expected {expected}, got {actual}")]
    InputLengthMismatch {
        /// Which pair of series disagreed.
        what: String,
        /// Length of the reference series.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },

    /// Dates are not strictly ascending.
    #[error("Dates must be strictly ascending: {previous} is followed by {next} at position {index}")]
    DatesNotAscending {
        /// Position of the out-of-order date.
        index: usize,
        /// Date preceding the offending one.
        previous: String,
        /// The offending date.
        next: String,
    },

    /// A budget amount is negative or not finite.
    #[error("Invalid budget for asset {asset}: {value}")]
    InvalidBudget {
        /// Which asset the budget belongs to.
        asset: String,
        /// The rejected amount.
        value: f64,
    },

    /// Invalid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A requested window falls outside the available history.
    #[error("Window [{start}, {end}) is outside a history of {len} observations")]
    WindowOutOfRange {
        /// First index of the window.
        start: usize,
        /// One past the last index of the window.
        end: usize,
        /// Number of observations available.
        len: usize,
    },
}

impl CoreError {
    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InputLengthMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}
