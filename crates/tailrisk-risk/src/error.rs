//! Error types for risk estimation.

use tailrisk_core::CoreError;
use tailrisk_math::MathError;
use thiserror::Error;

/// A specialized Result type for risk estimation.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk estimation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    /// Tail probability outside `(0, 1)`, or so large that the tail index
    /// runs past the end of the sample.
    #[error("invalid confidence level {alpha}: {reason}")]
    InvalidConfidenceLevel {
        /// The rejected tail probability.
        alpha: f64,
        /// Why it was rejected.
        reason: String,
    },

    /// Requested window is longer than the available observations.
    #[error("insufficient data: window of {window} exceeds {available} available observations")]
    InsufficientWindow {
        /// Requested window length.
        window: usize,
        /// Observations available to slide over.
        available: usize,
    },

    /// Invalid input parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Distribution could not be constructed.
    #[error("distribution error: {0}")]
    Distribution(String),

    /// Statistics utilities rejected the input.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Data-model validation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RiskError {
    /// Creates an invalid confidence level error.
    #[must_use]
    pub fn invalid_confidence(alpha: f64, reason: impl Into<String>) -> Self {
        Self::InvalidConfidenceLevel {
            alpha,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiskError::InsufficientWindow {
            window: 250,
            available: 100,
        };
        assert!(err.to_string().contains("window of 250 exceeds 100"));

        let err = RiskError::invalid_confidence(1.5, "must lie strictly between 0 and 1");
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_from_math_error() {
        let err: RiskError = MathError::empty_input("mean").into();
        assert!(matches!(err, RiskError::Math(MathError::EmptyInput { .. })));
        assert!(err.to_string().contains("mean"));
    }
}
