//! Historical VaR and Expected Shortfall.
//!
//! Both estimators rank the sample ascending and read the `alpha` tail:
//!
//! ```text
//! k   = floor(n * alpha) + 1                      (1-based rank)
//! VaR = -x(k)
//! ES  = sum_{i<k} -x(i) / (n * alpha)  -  x(k) * (alpha - (k - 1) / n) / alpha
//! ```
//!
//! The second ES term interpolates the fractional tail mass left over after
//! the `k - 1` full order statistics, so ES is exact at any `alpha` rather
//! than an average of the worst `k` losses.
//!
//! The same functions are applied to observed portfolio returns and to
//! Monte Carlo samples.

use tailrisk_core::{RiskMeasure, RiskMeasureSeries};
use tailrisk_math::MathError;
use tracing::debug;

use crate::error::{RiskError, RiskResult};

/// 1-based rank of the `alpha` quantile in an ascending sample of size `n`.
///
/// # Errors
///
/// - `RiskError::Math(EmptyInput)` if `n == 0`.
/// - `RiskError::InvalidConfidenceLevel` if `alpha` is not strictly inside
///   `(0, 1)` or if `floor(n * alpha) + 1 > n`.
pub fn tail_index(n: usize, alpha: f64) -> RiskResult<usize> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(RiskError::invalid_confidence(
            alpha,
            "must lie strictly between 0 and 1",
        ));
    }
    if n == 0 {
        return Err(MathError::empty_input("historical estimator").into());
    }

    let k = (n as f64 * alpha).floor() as usize + 1;
    if k > n {
        return Err(RiskError::invalid_confidence(
            alpha,
            format!("tail index {k} exceeds sample size {n}"),
        ));
    }
    Ok(k)
}

/// An ascending copy of a return sample.
///
/// Sorting once lets VaR and ES at different levels share the work.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSample {
    sorted: Vec<f64>,
}

impl SortedSample {
    /// Copies and sorts `returns`; the input is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `MathError::NumericDomain` if a value is NaN or infinite.
    pub fn new(returns: &[f64]) -> RiskResult<Self> {
        if let Some(index) = returns.iter().position(|r| !r.is_finite()) {
            return Err(MathError::numeric_domain(index, returns[index], "return must be finite").into());
        }
        let mut sorted = returns.to_vec();
        sorted.sort_by(f64::total_cmp);
        Ok(Self { sorted })
    }

    /// Sample size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Returns true if the sample is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The ascending values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.sorted
    }

    /// Historical VaR at tail probability `alpha`.
    pub fn var(&self, alpha: f64) -> RiskResult<f64> {
        let k = tail_index(self.len(), alpha)?;
        Ok(-self.sorted[k - 1])
    }

    /// Historical Expected Shortfall at tail probability `alpha`.
    pub fn es(&self, alpha: f64) -> RiskResult<f64> {
        let n = self.len();
        let k = tail_index(n, alpha)?;
        let n_f = n as f64;

        let full: f64 = self.sorted[..k - 1].iter().map(|x| -x).sum::<f64>() / (n_f * alpha);
        let fractional = -(1.0 / alpha) * self.sorted[k - 1] * (alpha - (k - 1) as f64 / n_f);

        Ok(full + fractional)
    }
}

/// Historical Value-at-Risk of `returns` at tail probability `alpha`.
///
/// Returns `-sorted[k - 1]` with `k = floor(n * alpha) + 1`. A positive
/// result is a loss.
///
/// # Example
///
/// ```rust
/// use tailrisk_risk::historical::historical_var;
///
/// let returns = [-0.05, -0.04, -0.03, -0.02, -0.01, 0.0, 0.01, 0.02, 0.03, 0.04];
/// let var = historical_var(&returns, 0.1).unwrap();
/// assert!((var - 0.04).abs() < 1e-15);
/// ```
pub fn historical_var(returns: &[f64], alpha: f64) -> RiskResult<f64> {
    tail_index(returns.len(), alpha)?;
    SortedSample::new(returns)?.var(alpha)
}

/// Historical Expected Shortfall of `returns` at tail probability `alpha`.
///
/// Standard historical CVaR with exact-rank interpolation for the
/// fractional tail mass.
pub fn historical_es(returns: &[f64], alpha: f64) -> RiskResult<f64> {
    tail_index(returns.len(), alpha)?;
    SortedSample::new(returns)?.es(alpha)
}

/// Rolling historical VaR.
///
/// Window `i` covers `returns[i..i + window_length]`; the output has
/// `returns.len() - window_length` values, so the last full window is not
/// evaluated (each estimate is followed by at least one observation).
///
/// # Errors
///
/// - `RiskError::InsufficientWindow` if `window_length > returns.len()`.
/// - `RiskError::InvalidInput` if `window_length == 0`.
/// - `RiskError::InvalidConfidenceLevel` if `alpha` is out of range for
///   the window size. Checked before any window is evaluated.
pub fn rolling_historical_var(
    returns: &[f64],
    alpha: f64,
    window_length: usize,
) -> RiskResult<RiskMeasureSeries> {
    rolling(returns, alpha, window_length, RiskMeasure::HistoricalVaR, |sample| {
        sample.var(alpha)
    })
}

/// Rolling historical Expected Shortfall. Same windows as
/// [`rolling_historical_var`].
pub fn rolling_historical_es(
    returns: &[f64],
    alpha: f64,
    window_length: usize,
) -> RiskResult<RiskMeasureSeries> {
    rolling(returns, alpha, window_length, RiskMeasure::HistoricalES, |sample| {
        sample.es(alpha)
    })
}

/// Checks that `window_length` can slide over `available` observations.
pub(crate) fn check_window(window_length: usize, available: usize) -> RiskResult<()> {
    if window_length == 0 {
        return Err(RiskError::InvalidInput(
            "window length must be positive".to_string(),
        ));
    }
    if window_length > available {
        return Err(RiskError::InsufficientWindow {
            window: window_length,
            available,
        });
    }
    Ok(())
}

fn rolling<F>(
    returns: &[f64],
    alpha: f64,
    window_length: usize,
    measure: RiskMeasure,
    estimate: F,
) -> RiskResult<RiskMeasureSeries>
where
    F: Fn(&SortedSample) -> RiskResult<f64>,
{
    check_window(window_length, returns.len())?;
    tail_index(window_length, alpha)?;

    let count = returns.len() - window_length;
    debug!(
        measure = %measure,
        alpha,
        window_length,
        windows = count,
        "rolling historical estimation"
    );

    let values = returns
        .windows(window_length)
        .take(count)
        .map(|window| SortedSample::new(window).and_then(|sample| estimate(&sample)))
        .collect::<RiskResult<Vec<_>>>()?;

    Ok(RiskMeasureSeries::new(measure, alpha, window_length, values))
}
