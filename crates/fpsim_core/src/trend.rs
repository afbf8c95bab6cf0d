//! Secular MCPR trend applied to the raw switching tables
//!
//! The raw matrices are shape-only: they capture who switches to what, not
//! how uptake grows over decades. Before every draw the engine scales the
//! method-uptake columns by a year-indexed factor derived from the observed
//! contraceptive-prevalence trend, so simulated aggregate uptake tracks the
//! data. The adjustment is pure and recomputed per lookup because the trend
//! parameters themselves can be edited mid-run by an intervention.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{MethodId, SwitchingMatrix};

/// Observed/fitted MCPR over time plus extrapolation parameters.
///
/// The factor is normalized to 1 at `norm_year`; beyond the last observed
/// year the rate compounds at `growth_rate` per year, bounded above by
/// `max_rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McprTrend {
    pub years: Vec<f64>,
    pub rates: Vec<f64>,
    /// Year-on-year change in MCPR after the end of the data
    pub growth_rate: f64,
    /// Prevalence ceiling the trend may never exceed
    pub max_rate: f64,
    /// Year at which the scaling factor equals 1
    pub norm_year: f64,
}

impl McprTrend {
    pub fn new(
        years: Vec<f64>,
        rates: Vec<f64>,
        growth_rate: f64,
        max_rate: f64,
        norm_year: f64,
    ) -> Result<Self, ConfigError> {
        if years.len() != rates.len() || years.is_empty() {
            return Err(ConfigError::InvalidTrend {
                reason: format!(
                    "years ({}) and rates ({}) must be matching non-empty series",
                    years.len(),
                    rates.len()
                ),
            });
        }
        if years.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ConfigError::InvalidTrend {
                reason: "years must be strictly increasing".into(),
            });
        }
        if rates.iter().any(|&r| !(0.0..=1.0).contains(&r)) {
            return Err(ConfigError::InvalidTrend {
                reason: "rates must lie in [0, 1]".into(),
            });
        }
        let trend = Self {
            years,
            rates,
            growth_rate,
            max_rate,
            norm_year,
        };
        if trend.rate_at(norm_year) <= 0.0 {
            return Err(ConfigError::InvalidTrend {
                reason: format!("MCPR at normalization year {norm_year} must be positive"),
            });
        }
        Ok(trend)
    }

    /// MCPR at `year`: interpolated inside the data range, compounded at
    /// `growth_rate` beyond it, clamped into `[0, max_rate]`.
    #[must_use]
    pub fn rate_at(&self, year: f64) -> f64 {
        let n = self.years.len();
        let rate = if year <= self.years[0] {
            self.rates[0]
        } else if year >= self.years[n - 1] {
            let elapsed = year - self.years[n - 1];
            self.rates[n - 1] * (1.0 + self.growth_rate).powf(elapsed)
        } else {
            let hi = self.years.partition_point(|&y| y <= year);
            let lo = hi - 1;
            let frac = (year - self.years[lo]) / (self.years[hi] - self.years[lo]);
            self.rates[lo] + frac * (self.rates[hi] - self.rates[lo])
        };
        rate.clamp(0.0, self.max_rate)
    }

    /// Multiplicative uptake factor for `year`, equal to 1 at `norm_year`
    #[must_use]
    pub fn factor(&self, year: f64) -> f64 {
        self.rate_at(year) / self.rate_at(self.norm_year)
    }

    /// Apply the trend factor for `year` to a switching matrix.
    ///
    /// Every uptake column (all methods other than "None") scales by the
    /// factor; negatives clamp to zero; the "None" column absorbs the
    /// difference so each row still sums to 1. A row whose scaled uptake
    /// exceeds 1 is renormalized proportionally instead.
    #[must_use]
    pub fn trended_matrix(&self, raw: &SwitchingMatrix, year: f64) -> SwitchingMatrix {
        let factor = self.factor(year);
        let rows = raw
            .rows()
            .iter()
            .map(|row| trend_row(row, factor))
            .collect();
        SwitchingMatrix::new(rows)
    }

    /// Apply the trend factor for `year` to the postpartum initiation vector
    #[must_use]
    pub fn trended_vector(&self, raw: &[f64], year: f64) -> Vec<f64> {
        trend_row(raw, self.factor(year))
    }
}

/// Scale the uptake entries of one probability row and rebalance the
/// "None" entry so the row remains a distribution
fn trend_row(row: &[f64], factor: f64) -> Vec<f64> {
    let none = MethodId::NONE.index();
    let mut out: Vec<f64> = row
        .iter()
        .enumerate()
        .map(|(j, &p)| {
            if j == none {
                p
            } else {
                (p * factor).max(0.0)
            }
        })
        .collect();

    let uptake: f64 = out
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != none)
        .map(|(_, p)| *p)
        .sum();

    if uptake <= 1.0 {
        out[none] = 1.0 - uptake;
    } else {
        // Uptake alone overshoots certainty; drop the "None" share and
        // renormalize the rest proportionally
        out[none] = 0.0;
        for p in &mut out {
            *p /= uptake;
        }
    }
    out
}
