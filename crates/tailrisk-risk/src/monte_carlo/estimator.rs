//! Rolling Monte Carlo VaR / ES on a two-asset portfolio.
//!
//! For each price window the estimator fits a Gaussian to each asset's
//! log-returns, draws `M` independent uniform pairs, maps them through the
//! fitted inverse CDFs, aggregates the simulated log-returns into absolute
//! portfolio P&L, and hands that sample to the historical estimator.
//!
//! Randomness is always supplied by the caller. Rolling runs draw one seed
//! per window from the caller's generator up front, then give each window
//! its own `StdRng`, so sequential and parallel runs with the same seed
//! return identical series.

use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tailrisk_core::{
    Allocation, CoreError, PriceHistory, PriceWindow, RiskMeasure, RiskMeasureSeries,
};
use tailrisk_math::statistics::log_returns;
use tracing::{debug, trace};

use super::gaussian::GaussianFit;
use crate::error::{RiskError, RiskResult};
use crate::historical::{check_window, tail_index, SortedSample};

/// Default number of simulated scenarios per window.
pub const DEFAULT_SIMULATION_COUNT: usize = 50_000;

/// Default VaR tail probability (Basel 99% VaR).
pub const DEFAULT_ALPHA_VAR: f64 = 0.01;

/// Default ES tail probability (97.5% ES, calibrated to 99% VaR).
pub const DEFAULT_ALPHA_ES: f64 = 0.025;

/// Settings of a [`MonteCarloEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Simulated scenarios per window (`M`).
    pub simulation_count: usize,
    /// Tail probability for VaR.
    pub alpha_var: f64,
    /// Tail probability for ES.
    pub alpha_es: f64,
    /// Seed for [`MonteCarloEstimator::rng`]; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Evaluate rolling windows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulation_count: DEFAULT_SIMULATION_COUNT,
            alpha_var: DEFAULT_ALPHA_VAR,
            alpha_es: DEFAULT_ALPHA_ES,
            seed: None,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    /// Sets the number of simulated scenarios.
    #[must_use]
    pub fn with_simulation_count(mut self, simulation_count: usize) -> Self {
        self.simulation_count = simulation_count;
        self
    }

    /// Sets the VaR tail probability.
    #[must_use]
    pub fn with_alpha_var(mut self, alpha_var: f64) -> Self {
        self.alpha_var = alpha_var;
        self
    }

    /// Sets the ES tail probability.
    #[must_use]
    pub fn with_alpha_es(mut self, alpha_es: f64) -> Self {
        self.alpha_es = alpha_es;
        self
    }

    /// Fixes the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel window evaluation.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that both tail probabilities select a rank inside an
    /// `M`-sized sample.
    pub fn validate(&self) -> RiskResult<()> {
        if self.simulation_count == 0 {
            return Err(RiskError::InvalidInput(
                "simulation count must be positive".to_string(),
            ));
        }
        tail_index(self.simulation_count, self.alpha_var)?;
        tail_index(self.simulation_count, self.alpha_es)?;
        Ok(())
    }
}

/// VaR and ES read from one simulated sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedMeasures {
    /// VaR at `alpha_var`.
    pub var: f64,
    /// ES at `alpha_es`.
    pub es: f64,
}

/// Rolling VaR and ES series sharing one simulated sample per window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingSimulatedMeasures {
    /// Simulated VaR series.
    pub var: RiskMeasureSeries,
    /// Simulated ES series.
    pub es: RiskMeasureSeries,
}

/// Monte Carlo VaR / ES estimator.
///
/// Holds configuration only; every call allocates its own buffers, so one
/// estimator can serve concurrent callers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonteCarloEstimator {
    config: MonteCarloConfig,
}

impl MonteCarloEstimator {
    /// Creates an estimator.
    ///
    /// # Errors
    ///
    /// Returns an error if [`MonteCarloConfig::validate`] fails.
    pub fn new(config: MonteCarloConfig) -> RiskResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The estimator's configuration.
    #[must_use]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Builds the configured generator: seeded when `seed` is set,
    /// entropy-seeded otherwise.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Simulated absolute portfolio returns for one window of log-returns.
    ///
    /// Draws `M` independent pairs `(u_a, u_b)` and returns
    /// `b_a * (exp(x_a) - 1) + b_b * (exp(x_b) - 1)` per scenario, where
    /// `x = mu + sigma * Φ⁻¹(u)` under each asset's fitted model.
    pub fn simulate_portfolio_returns<R: Rng + ?Sized>(
        &self,
        log_returns_a: &[f64],
        log_returns_b: &[f64],
        allocation: &Allocation,
        rng: &mut R,
    ) -> RiskResult<Vec<f64>> {
        let m = self.config.simulation_count;
        let mut uniforms_a: Vec<f64> = Vec::with_capacity(m);
        let mut uniforms_b: Vec<f64> = Vec::with_capacity(m);
        for _ in 0..m {
            uniforms_a.push(rng.sample(Open01));
            uniforms_b.push(rng.sample(Open01));
        }
        simulate_from_uniforms(log_returns_a, log_returns_b, allocation, &uniforms_a, &uniforms_b)
    }

    /// Simulated VaR at `alpha_var` for one window of prices.
    pub fn simulated_var<R: Rng + ?Sized>(
        &self,
        prices_a: &[f64],
        prices_b: &[f64],
        allocation: &Allocation,
        rng: &mut R,
    ) -> RiskResult<f64> {
        self.simulated_sample(prices_a, prices_b, allocation, rng)?
            .var(self.config.alpha_var)
    }

    /// Simulated ES at `alpha_es` for one window of prices.
    pub fn simulated_es<R: Rng + ?Sized>(
        &self,
        prices_a: &[f64],
        prices_b: &[f64],
        allocation: &Allocation,
        rng: &mut R,
    ) -> RiskResult<f64> {
        self.simulated_sample(prices_a, prices_b, allocation, rng)?
            .es(self.config.alpha_es)
    }

    /// Simulated VaR and ES from a single sample for one window of prices.
    pub fn simulated_measures<R: Rng + ?Sized>(
        &self,
        prices_a: &[f64],
        prices_b: &[f64],
        allocation: &Allocation,
        rng: &mut R,
    ) -> RiskResult<SimulatedMeasures> {
        let sample = self.simulated_sample(prices_a, prices_b, allocation, rng)?;
        Ok(SimulatedMeasures {
            var: sample.var(self.config.alpha_var)?,
            es: sample.es(self.config.alpha_es)?,
        })
    }

    /// Rolling simulated VaR over the full price history.
    ///
    /// Windows are price sub-slices `[i, i + window_length)`, each giving
    /// `window_length - 1` log-returns per asset for the fit. The output
    /// has `history.len() - window_length` values.
    ///
    /// # Errors
    ///
    /// - `RiskError::InsufficientWindow` if
    ///   `history.len() - 1 < window_length`.
    /// - `RiskError::InvalidInput` if `window_length < 2`.
    pub fn rolling_simulated_var<R: Rng + ?Sized>(
        &self,
        history: &PriceHistory,
        window_length: usize,
        allocation: &Allocation,
        rng: &mut R,
    ) -> RiskResult<RiskMeasureSeries> {
        let values = self.rolling(history, window_length, rng, |window, rng| {
            self.simulated_var(window.prices_a, window.prices_b, allocation, rng)
        })?;
        Ok(RiskMeasureSeries::new(
            RiskMeasure::SimulatedVaR,
            self.config.alpha_var,
            window_length,
            values,
        ))
    }

    /// Rolling simulated ES. Same windows as
    /// [`rolling_simulated_var`](Self::rolling_simulated_var).
    pub fn rolling_simulated_es<R: Rng + ?Sized>(
        &self,
        history: &PriceHistory,
        window_length: usize,
        allocation: &Allocation,
        rng: &mut R,
    ) -> RiskResult<RiskMeasureSeries> {
        let values = self.rolling(history, window_length, rng, |window, rng| {
            self.simulated_es(window.prices_a, window.prices_b, allocation, rng)
        })?;
        Ok(RiskMeasureSeries::new(
            RiskMeasure::SimulatedES,
            self.config.alpha_es,
            window_length,
            values,
        ))
    }

    /// Rolling simulated VaR and ES, one sample per window.
    pub fn rolling_simulated_measures<R: Rng + ?Sized>(
        &self,
        history: &PriceHistory,
        window_length: usize,
        allocation: &Allocation,
        rng: &mut R,
    ) -> RiskResult<RollingSimulatedMeasures> {
        let measures = self.rolling(history, window_length, rng, |window, rng| {
            self.simulated_measures(window.prices_a, window.prices_b, allocation, rng)
        })?;
        let (var, es): (Vec<f64>, Vec<f64>) = measures.iter().map(|m| (m.var, m.es)).unzip();

        Ok(RollingSimulatedMeasures {
            var: RiskMeasureSeries::new(
                RiskMeasure::SimulatedVaR,
                self.config.alpha_var,
                window_length,
                var,
            ),
            es: RiskMeasureSeries::new(
                RiskMeasure::SimulatedES,
                self.config.alpha_es,
                window_length,
                es,
            ),
        })
    }

    fn simulated_sample<R: Rng + ?Sized>(
        &self,
        prices_a: &[f64],
        prices_b: &[f64],
        allocation: &Allocation,
        rng: &mut R,
    ) -> RiskResult<SortedSample> {
        if prices_a.len() != prices_b.len() {
            return Err(CoreError::length_mismatch(
                "window prices of asset B vs asset A",
                prices_a.len(),
                prices_b.len(),
            )
            .into());
        }
        let log_returns_a = log_returns(prices_a)?;
        let log_returns_b = log_returns(prices_b)?;
        let simulated =
            self.simulate_portfolio_returns(&log_returns_a, &log_returns_b, allocation, rng)?;
        SortedSample::new(&simulated)
    }

    fn rolling<R, T, F>(
        &self,
        history: &PriceHistory,
        window_length: usize,
        rng: &mut R,
        per_window: F,
    ) -> RiskResult<Vec<T>>
    where
        R: Rng + ?Sized,
        T: Send,
        F: Fn(&PriceWindow<'_>, &mut StdRng) -> RiskResult<T> + Sync,
    {
        if window_length < 2 {
            return Err(RiskError::InvalidInput(format!(
                "window of {window_length} prices yields no log-returns; need at least 2"
            )));
        }
        check_window(window_length, history.len().saturating_sub(1))?;

        let windows: Vec<PriceWindow<'_>> = history.rolling_windows(window_length).collect();
        let seeds: Vec<u64> = windows.iter().map(|_| rng.gen()).collect();

        debug!(
            windows = windows.len(),
            window_length,
            simulations = self.config.simulation_count,
            parallel = self.config.parallel,
            "rolling Monte Carlo estimation"
        );

        let evaluate = |(window, &seed): (&PriceWindow, &u64)| {
            trace!(start = window.start, "simulating window");
            let mut window_rng = StdRng::seed_from_u64(seed);
            per_window(window, &mut window_rng)
        };

        if self.config.parallel {
            windows.par_iter().zip(seeds.par_iter()).map(evaluate).collect()
        } else {
            windows.iter().zip(seeds.iter()).map(evaluate).collect()
        }
    }
}

/// Simulated absolute portfolio returns from explicit uniform draws.
///
/// Deterministic counterpart of
/// [`MonteCarloEstimator::simulate_portfolio_returns`]: scenario `j` uses
/// `uniforms_a[j]` and `uniforms_b[j]`.
///
/// # Errors
///
/// - `CoreError::InputLengthMismatch` if the draw vectors differ in length.
/// - `MathError::EmptyInput` if either log-return window is empty.
/// - `MathError::NumericDomain` if a draw lies outside `(0, 1)`.
pub fn simulate_from_uniforms(
    log_returns_a: &[f64],
    log_returns_b: &[f64],
    allocation: &Allocation,
    uniforms_a: &[f64],
    uniforms_b: &[f64],
) -> RiskResult<Vec<f64>> {
    if uniforms_a.len() != uniforms_b.len() {
        return Err(CoreError::length_mismatch(
            "uniform draws of asset B vs asset A",
            uniforms_a.len(),
            uniforms_b.len(),
        )
        .into());
    }
    let simulated_a = GaussianFit::from_log_returns(log_returns_a)?.sample_quantiles(uniforms_a)?;
    let simulated_b = GaussianFit::from_log_returns(log_returns_b)?.sample_quantiles(uniforms_b)?;
    Ok(aggregate_portfolio_returns(&simulated_a, &simulated_b, allocation))
}

/// Converts paired simulated log-returns into absolute portfolio P&L.
///
/// Pairs beyond the shorter input are ignored.
pub fn aggregate_portfolio_returns(
    simulated_a: &[f64],
    simulated_b: &[f64],
    allocation: &Allocation,
) -> Vec<f64> {
    let (b_a, b_b) = (allocation.budget_a(), allocation.budget_b());
    simulated_a
        .iter()
        .zip(simulated_b)
        .map(|(x_a, x_b)| b_a * x_a.exp_m1() + b_b * x_b.exp_m1())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tailrisk_core::{Asset, Date};
    use tailrisk_math::MathError;

    fn allocation() -> Allocation {
        Allocation::new(600.0, 400.0).unwrap()
    }

    fn small_config() -> MonteCarloConfig {
        MonteCarloConfig::default()
            .with_simulation_count(2_000)
            .with_seed(7)
    }

    fn history(n: usize) -> PriceHistory {
        let dates = (0..n)
            .map(|i| {
                let i = i as u32;
                Date::from_ymd(2020 + (i / 336) as i32, 1 + (i / 28) % 12, 1 + i % 28).unwrap()
            })
            .collect();
        let a = (0..n)
            .map(|i| 100.0 + ((i * 37 % 11) as f64 - 5.0) * 0.3 + i as f64 * 0.05)
            .collect();
        let b = (0..n)
            .map(|i| 50.0 + ((i * 13 % 7) as f64 - 3.0) * 0.4)
            .collect();
        PriceHistory::new(dates, a, b).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = MonteCarloConfig::default();
        assert_eq!(config.simulation_count, 50_000);
        assert_eq!(config.alpha_var, 0.01);
        assert_eq!(config.alpha_es, 0.025);
        assert!(config.seed.is_none());
        assert!(MonteCarloEstimator::new(config).is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(MonteCarloEstimator::new(MonteCarloConfig::default().with_simulation_count(0)).is_err());
        assert!(matches!(
            MonteCarloEstimator::new(MonteCarloConfig::default().with_alpha_es(1.0)),
            Err(RiskError::InvalidConfidenceLevel { .. })
        ));
    }

    #[test]
    fn test_aggregate_portfolio_returns() {
        let sim_a = [0.0, (1.1_f64).ln()];
        let sim_b = [(0.9_f64).ln(), 0.0];
        let r = aggregate_portfolio_returns(&sim_a, &sim_b, &allocation());
        assert_relative_eq!(r[0], -40.0, epsilon = 1e-9);
        assert_relative_eq!(r[1], 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_simulate_from_uniforms_median_scenario() {
        // Zero-mean fits: the median draw simulates a zero log-return.
        let lr = [0.01, -0.01, 0.02, -0.02];
        let r = simulate_from_uniforms(&lr, &lr, &allocation(), &[0.5], &[0.5]).unwrap();
        assert_relative_eq!(r[0], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_simulate_from_uniforms_errors() {
        let lr = [0.01, -0.01];
        assert!(matches!(
            simulate_from_uniforms(&lr, &lr, &allocation(), &[0.5, 0.4], &[0.5]),
            Err(RiskError::Core(CoreError::InputLengthMismatch { .. }))
        ));
        assert!(matches!(
            simulate_from_uniforms(&[], &lr, &allocation(), &[0.5], &[0.5]),
            Err(RiskError::Math(MathError::EmptyInput { .. }))
        ));
    }

    #[test]
    fn test_default_estimator_uses_default_config() {
        let estimator = MonteCarloEstimator::default();
        assert_eq!(estimator.config(), &MonteCarloConfig::default());
        assert!(estimator.config().validate().is_ok());
    }

    #[test]
    fn test_simulation_draws_interleaved_open_uniforms() {
        let estimator = MonteCarloEstimator::new(small_config().with_seed(17)).unwrap();
        let lr_a = [0.01, -0.012, 0.004, 0.02, -0.015];
        let lr_b = [-0.003, 0.006, 0.011, -0.009, 0.002];

        let mut rng = estimator.rng();
        let mut uniforms_a = Vec::new();
        let mut uniforms_b = Vec::new();
        for _ in 0..2_000 {
            let u_a: f64 = rng.sample(Open01);
            let u_b: f64 = rng.sample(Open01);
            uniforms_a.push(u_a);
            uniforms_b.push(u_b);
        }
        assert!(uniforms_a
            .iter()
            .chain(&uniforms_b)
            .all(|&u| u > 0.0 && u < 1.0));
        let expected =
            simulate_from_uniforms(&lr_a, &lr_b, &allocation(), &uniforms_a, &uniforms_b).unwrap();

        let mut rng = estimator.rng();
        let simulated = estimator
            .simulate_portfolio_returns(&lr_a, &lr_b, &allocation(), &mut rng)
            .unwrap();
        assert_eq!(simulated.len(), 2_000);
        assert!(simulated.iter().all(|x| x.is_finite()));
        assert_eq!(simulated, expected);
    }

    #[test]
    fn test_simulated_sample_size_and_sign() {
        let estimator = MonteCarloEstimator::new(small_config()).unwrap();
        let mut rng = estimator.rng();
        let lr_a = [0.01, -0.012, 0.004, 0.02, -0.015];
        let lr_b = [-0.004, 0.006, 0.01, -0.02, 0.003];
        let sample = estimator
            .simulate_portfolio_returns(&lr_a, &lr_b, &allocation(), &mut rng)
            .unwrap();
        assert_eq!(sample.len(), 2_000);
        assert!(sample.iter().any(|&x| x < 0.0));
        assert!(sample.iter().any(|&x| x > 0.0));
    }

    #[test]
    fn test_simulated_measures_are_losses() {
        let estimator = MonteCarloEstimator::new(small_config()).unwrap();
        let h = history(40);
        let mut rng = estimator.rng();
        let m = estimator
            .simulated_measures(h.prices(Asset::A), h.prices(Asset::B), &allocation(), &mut rng)
            .unwrap();
        assert!(m.var > 0.0);
        assert!(m.es > 0.0);
    }

    #[test]
    fn test_window_length_mismatch() {
        let estimator = MonteCarloEstimator::new(small_config()).unwrap();
        let mut rng = estimator.rng();
        assert!(matches!(
            estimator.simulated_var(&[1.0, 2.0, 3.0], &[1.0, 2.0], &allocation(), &mut rng),
            Err(RiskError::Core(CoreError::InputLengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_rolling_length() {
        let estimator = MonteCarloEstimator::new(small_config()).unwrap();
        let h = history(30);
        let mut rng = estimator.rng();
        let var = estimator.rolling_simulated_var(&h, 20, &allocation(), &mut rng).unwrap();
        assert_eq!(var.len(), 10);
        assert_eq!(var.measure(), RiskMeasure::SimulatedVaR);
        assert_eq!(var.alpha(), 0.01);
    }

    #[test]
    fn test_rolling_window_bounds() {
        let estimator = MonteCarloEstimator::new(small_config()).unwrap();
        let h = history(30);
        let mut rng = estimator.rng();

        // len - 1 == window is the largest admissible window: one estimate.
        assert_eq!(
            estimator.rolling_simulated_es(&h, 29, &allocation(), &mut rng).unwrap().len(),
            1
        );
        assert_eq!(
            estimator
                .rolling_simulated_es(&h, 30, &allocation(), &mut rng)
                .unwrap_err(),
            RiskError::InsufficientWindow {
                window: 30,
                available: 29
            }
        );
        assert!(matches!(
            estimator.rolling_simulated_var(&h, 1, &allocation(), &mut rng),
            Err(RiskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let estimator = MonteCarloEstimator::new(small_config()).unwrap();
        let h = history(35);

        let first = estimator
            .rolling_simulated_var(&h, 25, &allocation(), &mut estimator.rng())
            .unwrap();
        let second = estimator
            .rolling_simulated_var(&h, 25, &allocation(), &mut estimator.rng())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = MonteCarloEstimator::new(small_config().with_parallel(true)).unwrap();
        let sequential = MonteCarloEstimator::new(small_config().with_parallel(false)).unwrap();
        let h = history(35);

        let a = parallel
            .rolling_simulated_measures(&h, 25, &allocation(), &mut parallel.rng())
            .unwrap();
        let b = sequential
            .rolling_simulated_measures(&h, 25, &allocation(), &mut sequential.rng())
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.var.len(), 10);
        assert_eq!(a.es.measure(), RiskMeasure::SimulatedES);
    }

    #[test]
    fn test_different_seeds_differ() {
        let h = history(35);
        let a = MonteCarloEstimator::new(small_config().with_seed(1)).unwrap();
        let b = MonteCarloEstimator::new(small_config().with_seed(2)).unwrap();
        let va = a.rolling_simulated_var(&h, 25, &allocation(), &mut a.rng()).unwrap();
        let vb = b.rolling_simulated_var(&h, 25, &allocation(), &mut b.rng()).unwrap();
        assert_ne!(va, vb);
    }
}
