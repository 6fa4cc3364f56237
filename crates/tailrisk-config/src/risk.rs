//! Driver configuration for rolling VaR / ES runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tailrisk_core::Allocation;
use tailrisk_risk::monte_carlo::{
    MonteCarloConfig, DEFAULT_ALPHA_ES, DEFAULT_ALPHA_VAR, DEFAULT_SIMULATION_COUNT,
};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Parameters of a risk run.
///
/// Every field has a default, so a file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskConfig {
    /// Rolling window length `L`.
    #[serde(default = "default_window_length")]
    pub window_length: usize,

    /// VaR tail probability.
    #[serde(default = "default_alpha_var")]
    pub alpha_var: f64,

    /// ES tail probability.
    #[serde(default = "default_alpha_es")]
    pub alpha_es: f64,

    /// Monte Carlo scenarios per window.
    #[serde(default = "default_simulation_count")]
    pub simulation_count: usize,

    /// Random seed for reproducibility (None = random).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Currency budget held in asset A.
    #[serde(default = "default_budget_a")]
    pub budget_a: f64,

    /// Currency budget held in asset B.
    #[serde(default = "default_budget_b")]
    pub budget_b: f64,

    /// Evaluate Monte Carlo windows in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_window_length() -> usize {
    250
}

fn default_alpha_var() -> f64 {
    DEFAULT_ALPHA_VAR
}

fn default_alpha_es() -> f64 {
    DEFAULT_ALPHA_ES
}

fn default_simulation_count() -> usize {
    DEFAULT_SIMULATION_COUNT
}

fn default_budget_a() -> f64 {
    600.0
}

fn default_budget_b() -> f64 {
    400.0
}

fn default_parallel() -> bool {
    true
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            window_length: default_window_length(),
            alpha_var: default_alpha_var(),
            alpha_es: default_alpha_es(),
            simulation_count: default_simulation_count(),
            seed: None,
            budget_a: default_budget_a(),
            budget_b: default_budget_b(),
            parallel: default_parallel(),
        }
    }
}

impl RiskConfig {
    /// Loads a configuration from a `.toml` or `.json` file.
    ///
    /// The result is not validated; callers apply overrides first and then
    /// call [`Validate::validate_or_error`].
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> ConfigResult<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&content)
    }

    /// Parses TOML.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parses JSON.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Renders the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the window length.
    #[must_use]
    pub fn with_window_length(mut self, window_length: usize) -> Self {
        self.window_length = window_length;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets both budgets.
    #[must_use]
    pub fn with_budgets(mut self, budget_a: f64, budget_b: f64) -> Self {
        self.budget_a = budget_a;
        self.budget_b = budget_b;
        self
    }

    /// The portfolio allocation.
    pub fn allocation(&self) -> ConfigResult<Allocation> {
        Ok(Allocation::new(self.budget_a, self.budget_b)?)
    }

    /// Monte Carlo engine settings.
    #[must_use]
    pub fn monte_carlo(&self) -> MonteCarloConfig {
        MonteCarloConfig {
            simulation_count: self.simulation_count,
            alpha_var: self.alpha_var,
            alpha_es: self.alpha_es,
            seed: self.seed,
            parallel: self.parallel,
        }
    }
}

impl Validate for RiskConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, alpha) in [("alpha_var", self.alpha_var), ("alpha_es", self.alpha_es)] {
            if !(alpha > 0.0 && alpha < 1.0) {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Tail probability must lie strictly between 0 and 1, got {alpha}"),
                    "open_unit_interval",
                ));
            }
        }

        if self.window_length < 2 {
            errors.push(ValidationError::with_rule(
                "window_length",
                "Window must span at least 2 observations",
                "min_window",
            ));
        }

        if self.simulation_count == 0 {
            errors.push(ValidationError::with_rule(
                "simulation_count",
                "At least one simulation is required",
                "positive_count",
            ));
        }

        for (field, budget) in [("budget_a", self.budget_a), ("budget_b", self.budget_b)] {
            if !(budget.is_finite() && budget >= 0.0) {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Budget must be finite and non-negative, got {budget}"),
                    "non_negative_budget",
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = RiskConfig::default();
        assert_eq!(config.window_length, 250);
        assert_eq!(config.alpha_var, 0.01);
        assert_eq!(config.alpha_es, 0.025);
        assert_eq!(config.simulation_count, 50_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.budget_a, 600.0);
        assert_eq!(config.budget_b, 400.0);
        assert!(config.parallel);
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RiskConfig::from_toml_str("window_length = 100\nseed = 42\n").unwrap();
        assert_eq!(config.window_length, 100);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.alpha_var, 0.01);
        assert_eq!(config.budget_b, 400.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            RiskConfig::from_toml_str("windw_length = 100\n"),
            Err(ConfigError::Deserialization(_))
        ));
    }

    #[test]
    fn test_from_file_by_extension() {
        let toml_file = write_temp(".toml", "alpha_var = 0.05\nbudget_a = 1000\n");
        let config = RiskConfig::from_file(toml_file.path()).unwrap();
        assert_eq!(config.alpha_var, 0.05);
        assert_eq!(config.budget_a, 1000.0);

        let json_file = write_temp(".json", r#"{"simulation_count": 1000, "parallel": false}"#);
        let config = RiskConfig::from_file(json_file.path()).unwrap();
        assert_eq!(config.simulation_count, 1000);
        assert!(!config.parallel);

        let yaml_file = write_temp(".yaml", "window_length: 10\n");
        assert!(matches!(
            RiskConfig::from_file(yaml_file.path()),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            RiskConfig::from_file(dir.path().join("absent.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_toml_template_parses_back() {
        let config = RiskConfig::default().with_seed(7).with_window_length(120);
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("window_length = 120"));
        assert_eq!(RiskConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_validation_rules() {
        let config = RiskConfig {
            window_length: 1,
            alpha_var: 0.0,
            alpha_es: 1.2,
            simulation_count: 0,
            seed: None,
            budget_a: -1.0,
            budget_b: f64::NAN,
            parallel: true,
        };
        let errors = config.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "alpha_var",
                "alpha_es",
                "window_length",
                "simulation_count",
                "budget_a",
                "budget_b"
            ]
        );
        assert!(matches!(
            config.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(_))
        ));
    }

    #[test]
    fn test_projections() {
        let config = RiskConfig::default().with_seed(3).with_budgets(100.0, 0.0);
        let mc = config.monte_carlo();
        assert_eq!(mc.simulation_count, 50_000);
        assert_eq!(mc.seed, Some(3));
        assert!(mc.parallel);

        let allocation = config.allocation().unwrap();
        assert_eq!(allocation.budget_a(), 100.0);
        assert_eq!(allocation.budget_b(), 0.0);

        let bad = RiskConfig::default().with_budgets(-5.0, 1.0);
        assert!(matches!(bad.allocation(), Err(ConfigError::Core(_))));
    }
}
