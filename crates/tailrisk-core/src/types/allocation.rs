//! Budget allocation across the two assets.

use serde::{Deserialize, Serialize};

use super::history::Asset;
use crate::error::{CoreError, CoreResult};

/// Currency amounts invested in each asset, constant across a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    budget_a: f64,
    budget_b: f64,
}

impl Allocation {
    /// Creates an allocation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidBudget` if either amount is negative,
    /// NaN, or infinite.
    pub fn new(budget_a: f64, budget_b: f64) -> CoreResult<Self> {
        check_budget(Asset::A, budget_a)?;
        check_budget(Asset::B, budget_b)?;
        Ok(Self { budget_a, budget_b })
    }

    /// Amount invested in asset A.
    #[must_use]
    pub fn budget_a(&self) -> f64 {
        self.budget_a
    }

    /// Amount invested in asset B.
    #[must_use]
    pub fn budget_b(&self) -> f64 {
        self.budget_b
    }
}

fn check_budget(asset: Asset, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidBudget {
            asset: asset.to_string(),
            value,
        })
    }
}
