//! Portfolio return series derived from a price history.

use tailrisk_core::{Allocation, Asset, CoreError, PriceHistory, ReturnKind, ReturnSeries};
use tailrisk_math::statistics::{check_positive, log_returns};

use crate::error::RiskResult;

/// Absolute P&L of holding `allocation` from one observation to the next.
///
/// `r[i] = b_a / p_a[i] * p_a[i + 1] + b_b / p_b[i] * p_b[i + 1] - b_a - b_b`
///
/// The budgets are re-invested at each observation, so every return is
/// measured on the same currency exposure.
///
/// # Errors
///
/// Returns `MathError::NumericDomain` if a price is not positive.
pub fn portfolio_returns(
    history: &PriceHistory,
    allocation: &Allocation,
) -> RiskResult<ReturnSeries> {
    let values = absolute_returns(
        history.prices(Asset::A),
        history.prices(Asset::B),
        allocation,
    )?;
    Ok(ReturnSeries::new(ReturnKind::Absolute, values))
}

/// Slice form of [`portfolio_returns`].
///
/// # Errors
///
/// - `CoreError::InputLengthMismatch` if the two slices differ in length.
/// - `MathError::NumericDomain` if a price is not positive.
pub fn absolute_returns(
    prices_a: &[f64],
    prices_b: &[f64],
    allocation: &Allocation,
) -> RiskResult<Vec<f64>> {
    if prices_a.len() != prices_b.len() {
        return Err(CoreError::length_mismatch(
            "prices of asset B vs asset A",
            prices_a.len(),
            prices_b.len(),
        )
        .into());
    }
    check_positive(prices_a)?;
    check_positive(prices_b)?;

    let (b_a, b_b) = (allocation.budget_a(), allocation.budget_b());
    Ok(prices_a
        .windows(2)
        .zip(prices_b.windows(2))
        .map(|(a, b)| b_a / a[0] * a[1] + b_b / b[0] * b[1] - b_a - b_b)
        .collect())
}

/// Log-returns of one asset.
pub fn asset_log_returns(history: &PriceHistory, asset: Asset) -> RiskResult<ReturnSeries> {
    let values = log_returns(history.prices(asset))?;
    Ok(ReturnSeries::new(ReturnKind::Logarithmic, values))
}
