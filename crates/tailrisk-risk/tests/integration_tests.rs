//! End-to-end checks of the historical and Monte Carlo pipelines on a
//! synthetic two-asset price history.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tailrisk_core::{Allocation, Asset, Date, PriceHistory, RiskMeasure};
use tailrisk_risk::monte_carlo::{MonteCarloConfig, MonteCarloEstimator};
use tailrisk_risk::prelude::*;

// ============================================================================
// Fixtures
// ============================================================================

fn trading_dates(n: usize) -> Vec<Date> {
    (0..n)
        .map(|i| {
            let i = i as u32;
            Date::from_ymd(2015 + (i / 336) as i32, 1 + (i / 28) % 12, 1 + i % 28).unwrap()
        })
        .collect()
}

/// Deterministic oscillating prices with a mild drift.
fn price_history(n: usize) -> PriceHistory {
    let a: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            150.0 + 0.02 * t + 4.0 * (t * 0.37).sin() + 1.5 * (t * 1.91).cos()
        })
        .collect();
    let b: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            320.0 - 0.01 * t + 6.0 * (t * 0.23).cos() + 2.0 * (t * 2.71).sin()
        })
        .collect();
    PriceHistory::new(trading_dates(n), a, b).unwrap()
}

fn allocation() -> Allocation {
    Allocation::new(600.0, 400.0).unwrap()
}

// ============================================================================
// Historical pipeline
// ============================================================================

#[test]
fn test_historical_pipeline_lengths_and_dates() {
    let history = price_history(300);
    let returns = portfolio_returns(&history, &allocation()).unwrap();
    assert_eq!(returns.len(), 299);

    let var = rolling_historical_var(returns.values(), 0.01, 250).unwrap();
    let es = rolling_historical_es(returns.values(), 0.025, 250).unwrap();
    assert_eq!(var.len(), 49);
    assert_eq!(es.len(), 49);

    // Estimate i is dated at the day after its window's last return.
    let dated = var.align(history.dates());
    assert_eq!(dated.len(), 49);
    assert_eq!(dated.points[0].date, history.dates()[251]);
    assert_eq!(dated.points[48].date, history.dates()[299]);
    assert_eq!(dated.points[0].value, var.values()[0]);
}

#[test]
fn test_historical_es_dominates_var_at_same_level() {
    let history = price_history(300);
    let returns = portfolio_returns(&history, &allocation()).unwrap();
    let var = rolling_historical_var(returns.values(), 0.025, 100).unwrap();
    let es = rolling_historical_es(returns.values(), 0.025, 100).unwrap();

    for (v, e) in var.values().iter().zip(es.values()) {
        assert!(e + 1e-9 >= *v);
    }
}

#[test]
fn test_portfolio_returns_scale_with_budget() {
    let history = price_history(50);
    let base = portfolio_returns(&history, &allocation()).unwrap();
    let doubled = portfolio_returns(&history, &Allocation::new(1200.0, 800.0).unwrap()).unwrap();

    for (x, y) in base.values().iter().zip(doubled.values()) {
        assert_relative_eq!(2.0 * x, *y, epsilon = 1e-9);
    }

    let var = historical_var(base.values(), 0.05).unwrap();
    let var2 = historical_var(doubled.values(), 0.05).unwrap();
    assert_relative_eq!(2.0 * var, var2, epsilon = 1e-9);
}

// ============================================================================
// Monte Carlo pipeline
// ============================================================================

fn estimator(parallel: bool) -> MonteCarloEstimator {
    MonteCarloEstimator::new(
        MonteCarloConfig::default()
            .with_simulation_count(5_000)
            .with_seed(2024)
            .with_parallel(parallel),
    )
    .unwrap()
}

#[test]
fn test_monte_carlo_pipeline_lengths() {
    let history = price_history(120);
    let mc = estimator(true);
    let measures = mc
        .rolling_simulated_measures(&history, 100, &allocation(), &mut mc.rng())
        .unwrap();

    assert_eq!(measures.var.len(), 20);
    assert_eq!(measures.es.len(), 20);
    assert_eq!(measures.var.measure(), RiskMeasure::SimulatedVaR);
    assert_eq!(measures.es.measure(), RiskMeasure::SimulatedES);

    // One extra trailing estimate relative to the date axis is dropped.
    let dated = measures.var.align(history.dates());
    assert_eq!(dated.len(), 19);
    assert_eq!(dated.points[0].date, history.dates()[101]);
}

#[test]
fn test_monte_carlo_close_to_gaussian_closed_form() {
    // With a single asset and many draws, simulated VaR approaches the
    // closed-form lognormal quantile of the fitted model.
    let history = price_history(260);
    let allocation = Allocation::new(1000.0, 0.0).unwrap();
    let window = &history.prices(Asset::A)[..251];

    let lr: Vec<f64> = window.windows(2).map(|p| (p[1] / p[0]).ln()).collect();
    let n = lr.len() as f64;
    let mu = lr.iter().sum::<f64>() / n;
    let sigma = (lr.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / n).sqrt();
    // Φ⁻¹(0.01) ≈ -2.326348
    let expected = -1000.0 * (mu - 2.326_348 * sigma).exp_m1();

    let mc = MonteCarloEstimator::new(
        MonteCarloConfig::default()
            .with_simulation_count(200_000)
            .with_seed(11),
    )
    .unwrap();
    let mut rng = mc.rng();
    let var = mc
        .simulated_var(window, &vec![1.0; window.len()], &allocation, &mut rng)
        .unwrap();

    assert_relative_eq!(var, expected, max_relative = 0.03);
}

#[test]
fn test_monte_carlo_reproducible_across_modes() {
    let history = price_history(140);
    let par = estimator(true);
    let seq = estimator(false);

    let a = par
        .rolling_simulated_es(&history, 120, &allocation(), &mut par.rng())
        .unwrap();
    let b = seq
        .rolling_simulated_es(&history, 120, &allocation(), &mut seq.rng())
        .unwrap();
    assert_eq!(a, b);

    let c = seq
        .rolling_simulated_es(&history, 120, &allocation(), &mut StdRng::seed_from_u64(2024))
        .unwrap();
    assert_eq!(b, c);
}

#[test]
fn test_monte_carlo_window_must_fit_returns() {
    let history = price_history(100);
    let mc = estimator(false);
    let err = mc
        .rolling_simulated_var(&history, 100, &allocation(), &mut mc.rng())
        .unwrap_err();
    assert_eq!(
        err,
        RiskError::InsufficientWindow {
            window: 100,
            available: 99
        }
    );
}

#[test]
fn test_monte_carlo_and_historical_agree_roughly() {
    // Both estimators target the same loss quantile on smooth data.
    let history = price_history(400);
    let returns = portfolio_returns(&history, &allocation()).unwrap();
    let hist = historical_var(&returns.values()[..250], 0.05).unwrap();

    let mc = MonteCarloEstimator::new(
        MonteCarloConfig::default()
            .with_simulation_count(50_000)
            .with_alpha_var(0.05)
            .with_seed(5),
    )
    .unwrap();
    let sim = mc
        .simulated_var(
            &history.prices(Asset::A)[..251],
            &history.prices(Asset::B)[..251],
            &allocation(),
            &mut mc.rng(),
        )
        .unwrap();

    assert!(hist > 0.0);
    assert!(sim > 0.0);
    assert!(sim / hist > 0.3 && sim / hist < 3.0);
}
