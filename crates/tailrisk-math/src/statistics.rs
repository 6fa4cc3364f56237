//! Return and moment computations.

use crate::error::{MathError, MathResult};

/// Log-returns of a price series: `r[i] = ln(prices[i + 1] / prices[i])`.
///
/// The result is one shorter than `prices`; fewer than two prices yield an
/// empty vector.
///
/// # Errors
///
/// Returns `MathError::NumericDomain` if any price is zero, negative, or
/// not finite.
///
/// # Example
///
/// ```rust
/// use tailrisk_math::statistics::log_returns;
///
/// let r = log_returns(&[100.0, 102.0, 101.0]).unwrap();
/// assert_eq!(r.len(), 2);
/// assert!((r[0] - 1.02_f64.ln()).abs() < 1e-15);
/// ```
pub fn log_returns(prices: &[f64]) -> MathResult<Vec<f64>> {
    check_positive(prices)?;
    Ok(prices.windows(2).map(|p| (p[1] / p[0]).ln()).collect())
}

/// Rejects any price that cannot sit under a logarithm or a division.
pub fn check_positive(prices: &[f64]) -> MathResult<()> {
    match prices
        .iter()
        .position(|&p| !(p.is_finite() && p > 0.0))
    {
        Some(index) => Err(MathError::numeric_domain(
            index,
            prices[index],
            "price must be positive and finite",
        )),
        None => Ok(()),
    }
}

/// Arithmetic mean.
///
/// # Errors
///
/// Returns `MathError::EmptyInput` on an empty slice.
pub fn mean(x: &[f64]) -> MathResult<f64> {
    if x.is_empty() {
        return Err(MathError::empty_input("mean"));
    }
    Ok(x.iter().sum::<f64>() / x.len() as f64)
}

/// Population variance (divides by `n`, not `n - 1`).
///
/// # Errors
///
/// Returns `MathError::EmptyInput` on an empty slice.
pub fn variance(x: &[f64]) -> MathResult<f64> {
    if x.is_empty() {
        return Err(MathError::empty_input("variance"));
    }
    let mu = mean(x)?;
    Ok(x.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / x.len() as f64)
}

/// Population standard deviation.
///
/// Biased on purpose: multiply by `sqrt(n / (n - 1))` for the sample
/// estimator. A constant sequence gives exactly `0.0`.
///
/// # Errors
///
/// Returns `MathError::EmptyInput` on an empty slice.
pub fn std_dev(x: &[f64]) -> MathResult<f64> {
    if x.is_empty() {
        return Err(MathError::empty_input("std_dev"));
    }
    Ok(variance(x)?.sqrt())
}
