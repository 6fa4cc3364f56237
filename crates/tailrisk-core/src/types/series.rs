//! Return series and rolling risk-measure series.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::Date;

/// Unit of a return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// Currency-unit profit and loss.
    Absolute,
    /// Unitless `ln(p[i+1] / p[i])`.
    Logarithmic,
}

/// Returns derived from a price series; one shorter than its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    kind: ReturnKind,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Wraps computed return values.
    #[must_use]
    pub fn new(kind: ReturnKind, values: Vec<f64>) -> Self {
        Self { kind, values }
    }

    /// Whether the returns are absolute or logarithmic.
    #[must_use]
    pub fn kind(&self) -> ReturnKind {
        self.kind
    }

    /// The return values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no returns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the series, returning the values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl AsRef<[f64]> for ReturnSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Which estimator produced a risk-measure series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMeasure {
    /// Historical Value-at-Risk.
    HistoricalVaR,
    /// Historical Expected Shortfall.
    HistoricalES,
    /// Monte Carlo Value-at-Risk.
    SimulatedVaR,
    /// Monte Carlo Expected Shortfall.
    SimulatedES,
}

impl RiskMeasure {
    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RiskMeasure::HistoricalVaR => "Historical VaR",
            RiskMeasure::HistoricalES => "Historical ES",
            RiskMeasure::SimulatedVaR => "Simulated VaR",
            RiskMeasure::SimulatedES => "Simulated ES",
        }
    }
}

impl fmt::Display for RiskMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of a rolling-window estimator.
///
/// `values[i]` was estimated from the window starting at observation `i`
/// and applies to the date at position `i + window_length + 1` of the
/// source date series (see [`RiskMeasureSeries::align`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMeasureSeries {
    measure: RiskMeasure,
    alpha: f64,
    window_length: usize,
    values: Vec<f64>,
}

impl RiskMeasureSeries {
    /// Wraps rolling estimates.
    #[must_use]
    pub fn new(measure: RiskMeasure, alpha: f64, window_length: usize, values: Vec<f64>) -> Self {
        Self {
            measure,
            alpha,
            window_length,
            values,
        }
    }

    /// The estimator that produced this series.
    #[must_use]
    pub fn measure(&self) -> RiskMeasure {
        self.measure
    }

    /// Tail probability used by the estimator.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Rolling window length.
    #[must_use]
    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// The estimates, one per window.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of estimates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no window was evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the series, returning the values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Pairs each estimate with its date: `dates[window_length + 1 ..]`.
    ///
    /// The result is truncated to whichever side is shorter. A Monte Carlo
    /// series carries one estimate more than there are dates at that
    /// offset; its trailing estimate has no date and is dropped.
    #[must_use]
    pub fn align(&self, dates: &[Date]) -> DatedRiskSeries {
        let offset = self.window_length + 1;
        let points = dates
            .get(offset..)
            .unwrap_or(&[])
            .iter()
            .zip(&self.values)
            .map(|(&date, &value)| RiskPoint { date, value })
            .collect();

        DatedRiskSeries {
            measure: self.measure,
            alpha: self.alpha,
            points,
        }
    }
}

/// A single dated risk estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    /// Date the estimate applies to.
    pub date: Date,
    /// Estimated loss in the units of the underlying returns.
    pub value: f64,
}

/// A risk-measure series paired with dates, ready for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRiskSeries {
    /// The estimator that produced this series.
    pub measure: RiskMeasure,
    /// Tail probability used by the estimator.
    pub alpha: f64,
    /// Dated estimates, ascending by date.
    pub points: Vec<RiskPoint>,
}

impl DatedRiskSeries {
    /// Number of dated estimates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no dated estimates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest estimate and its date.
    #[must_use]
    pub fn peak(&self) -> Option<RiskPoint> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.value.total_cmp(&b.value))
    }
}
