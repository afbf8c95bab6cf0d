//! Simulation output structures

use serde::{Deserialize, Serialize};

use crate::model::Person;

/// Everything a completed run reports back.
///
/// Monthly channels are indexed by timestep; annual channels are indexed by
/// calendar year (`tfr_years`). The final population is retained because
/// calibration statistics (method mix, parity, spacing) are computed from
/// person-level state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Simulated time at each step, in fractional years
    pub t: Vec<f64>,
    /// Live-birth deliveries per step
    pub births: Vec<u32>,
    /// Deaths per step
    pub deaths: Vec<u32>,
    /// Conceptions per step that occurred while a method was in use
    pub method_failures: Vec<u32>,
    /// Modern contraceptive prevalence per step, among eligible women
    pub mcpr: Vec<f64>,

    /// Whole calendar years covered by the run
    pub tfr_years: Vec<f64>,
    /// Alive agents at each year boundary
    pub pop_size: Vec<f64>,
    /// Live births per woman-year of exposure, per year
    pub tfr_rates: Vec<f64>,

    /// Final population snapshot
    pub people: Vec<Person>,
    /// Seed the run was executed with
    pub seed: u64,
}

impl SimulationResult {
    /// Total live births over the whole run
    #[must_use]
    pub fn total_births(&self) -> u64 {
        self.births.iter().map(|&b| u64::from(b)).sum()
    }

    /// MCPR at the step nearest to `year`
    #[must_use]
    pub fn mcpr_at(&self, year: f64) -> Option<f64> {
        let idx = self
            .t
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - year).abs().total_cmp(&(*b - year).abs()))
            .map(|(i, _)| i)?;
        self.mcpr.get(idx).copied()
    }
}
