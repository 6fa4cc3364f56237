//! Error types for statistics utilities.

use thiserror::Error;

/// A specialized Result type for statistics utilities.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur in statistics utilities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A statistic was requested on a zero-length sequence.
    #[error("Empty input: {operation} requires at least one observation")]
    EmptyInput {
        /// The operation that received no data.
        operation: &'static str,
    },

    /// A value lies outside the domain of the operation.
    #[error("Numeric domain error at index {index}: {value} ({reason})")]
    NumericDomain {
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
        /// Why the value is rejected.
        reason: &'static str,
    },
}

impl MathError {
    /// Creates an empty input error.
    #[must_use]
    pub fn empty_input(operation: &'static str) -> Self {
        Self::EmptyInput { operation }
    }

    /// Creates a numeric domain error.
    #[must_use]
    pub fn numeric_domain(index: usize, value: f64, reason: &'static str) -> Self {
        Self::NumericDomain {
            index,
            value,
            reason,
        }
    }
}
