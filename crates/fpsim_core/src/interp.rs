//! Piecewise-linear interpolation over sparse `(x, y)` tables
//!
//! Demographic inputs (fecundity, sexual activity, mortality, miscarriage
//! risk) arrive as unevenly spaced observations; the simulation evaluates
//! them at arbitrary ages and years.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A sorted `(x, y)` table evaluated by linear interpolation, clamped at the
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl InterpTable {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ConfigError> {
        if x.len() != y.len() || x.is_empty() {
            return Err(ConfigError::InvalidParameters {
                reason: format!(
                    "interpolation table needs matching non-empty axes (x: {}, y: {})",
                    x.len(),
                    y.len()
                ),
            });
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ConfigError::InvalidParameters {
                reason: "interpolation table x-axis must be strictly increasing".into(),
            });
        }
        Ok(Self { x, y })
    }

    /// Build from `(x, y)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, ConfigError> {
        let (x, y) = pairs.iter().copied().unzip();
        Self::new(x, y)
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Interpolated value at `x`, clamped to the table's range
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.x.len();
        if x <= self.x[0] {
            return self.y[0];
        }
        if x >= self.x[n - 1] {
            return self.y[n - 1];
        }
        // partition_point returns the first index with x-value > x; the
        // clamps above guarantee 1..=n-1
        let hi = self.x.partition_point(|&v| v <= x);
        let lo = hi - 1;
        let frac = (x - self.x[lo]) / (self.x[hi] - self.x[lo]);
        self.y[lo] + frac * (self.y[hi] - self.y[lo])
    }

    /// Interpolated value clamped into `[0, 1]`, for probability tables
    #[must_use]
    pub fn eval_prob(&self, x: f64) -> f64 {
        self.eval(x).clamp(0.0, 1.0)
    }
}
