//! Per-window Gaussian log-return model and inverse-transform sampling.

use statrs::distribution::{ContinuousCDF, Normal};
use tailrisk_math::statistics::{mean, std_dev};
use tailrisk_math::MathError;

use crate::error::{RiskError, RiskResult};

/// Normal model of daily log-returns fitted to one window.
///
/// `sigma` is the population standard deviation of the window, matching
/// [`tailrisk_math::statistics::std_dev`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianFit {
    mu: f64,
    sigma: f64,
    standard: Normal,
}

impl GaussianFit {
    /// Creates a model with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidInput` if `mu` is not finite or `sigma`
    /// is negative or not finite. `sigma == 0` is allowed and yields a
    /// degenerate model that always returns `mu`.
    pub fn new(mu: f64, sigma: f64) -> RiskResult<Self> {
        if !mu.is_finite() {
            return Err(RiskError::InvalidInput(format!("mean must be finite, got {mu}")));
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(RiskError::InvalidInput(format!(
                "standard deviation must be finite and non-negative, got {sigma}"
            )));
        }
        let standard =
            Normal::new(0.0, 1.0).map_err(|e| RiskError::Distribution(e.to_string()))?;
        Ok(Self { mu, sigma, standard })
    }

    /// Fits `mu` and `sigma` to a window of log-returns.
    ///
    /// # Errors
    ///
    /// Returns `MathError::EmptyInput` if `log_returns` is empty.
    pub fn from_log_returns(log_returns: &[f64]) -> RiskResult<Self> {
        Self::new(mean(log_returns)?, std_dev(log_returns)?)
    }

    /// Fitted mean.
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Fitted population standard deviation.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// The `u`-quantile of the fitted model: `mu + sigma * Φ⁻¹(u)`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::NumericDomain` unless `0 < u < 1`.
    pub fn quantile(&self, u: f64) -> RiskResult<f64> {
        check_uniform(0, u)?;
        Ok(self.quantile_unchecked(u))
    }

    /// Maps each uniform draw to one simulated log-return, in order.
    ///
    /// Draw `j` always produces output `j`, so a fixed vector of draws
    /// reproduces the same simulated sample.
    ///
    /// # Errors
    ///
    /// Returns `MathError::NumericDomain` on the first draw outside `(0, 1)`.
    pub fn sample_quantiles(&self, uniform_draws: &[f64]) -> RiskResult<Vec<f64>> {
        uniform_draws
            .iter()
            .enumerate()
            .map(|(j, &u)| {
                check_uniform(j, u)?;
                Ok(self.quantile_unchecked(u))
            })
            .collect()
    }

    fn quantile_unchecked(&self, u: f64) -> f64 {
        self.mu + self.sigma * self.standard.inverse_cdf(u)
    }
}

/// Fits a Gaussian to `log_returns` and maps `uniform_draws` through its
/// inverse CDF.
///
/// # Example
///
/// ```rust
/// use tailrisk_risk::monte_carlo::fit_and_sample_quantiles;
///
/// let sample = fit_and_sample_quantiles(&[0.01, -0.01, 0.02, -0.02], &[0.5]).unwrap();
/// assert!(sample[0].abs() < 1e-12); // median of a zero-mean fit
/// ```
pub fn fit_and_sample_quantiles(log_returns: &[f64], uniform_draws: &[f64]) -> RiskResult<Vec<f64>> {
    GaussianFit::from_log_returns(log_returns)?.sample_quantiles(uniform_draws)
}

fn check_uniform(index: usize, u: f64) -> RiskResult<()> {
    if u > 0.0 && u < 1.0 {
        Ok(())
    } else {
        Err(MathError::numeric_domain(index, u, "uniform draw must lie strictly between 0 and 1").into())
    }
}
