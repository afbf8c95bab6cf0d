//! Calibration against demographic reference data
//!
//! The orchestrator runs one simulation for a parameter set, extracts a
//! fixed, named group of summary statistics from both the run and the
//! supplied survey tables, asserts the two key sets are identical, and
//! exposes the paired arrays for `Fit` scoring. Flags gate which statistic
//! groups are computed, so partial calibrations are cheap.

mod fit;
mod gof;

pub use fit::{CustomComparison, Fit, FitConfig, Weight};
pub use gof::{Estimator, GofOptions, GofValue, Scalarize, compute_gof};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{CalibrationError, FitError};
use crate::model::{Person, SimulationResult};
use crate::simulation::Sim;
use crate::stats;

/// Birth-spacing bin lower bounds, in years
const SPACING_BIN_EDGES: [f64; 4] = [0.0, 1.0, 2.0, 4.0];

/// Age/parity ("skyscraper") binning
const SKY_MIN_AGE: f64 = 15.0;
const SKY_MAX_AGE: f64 = 50.0;
const SKY_AGE_BIN: f64 = 5.0;
const SKY_N_AGE: usize = 7;
const SKY_N_PARITY: usize = 7;

/// Which statistic groups a calibration run computes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibFlags {
    /// Population size and growth over time
    pub popsize: bool,
    /// Modern contraceptive prevalence at data years
    pub mcpr: bool,
    /// Method mix among age-eligible women
    pub methods: bool,
    /// Age/parity distribution
    pub skyscrapers: bool,
    /// Birth-spacing bins, spacing quartiles, and age at first birth
    pub birth_space: bool,
    /// Ages of currently pregnant women
    pub age_pregnancy: bool,
}

impl Default for CalibFlags {
    fn default() -> Self {
        Self {
            popsize: true,
            mcpr: true,
            methods: true,
            skyscrapers: true,
            birth_space: true,
            age_pregnancy: true,
        }
    }
}

/// Reference survey tables, already parsed into plain arrays.
///
/// Provenance (DHS/PMA extraction, World Bank series, CSV cleaning) is
/// outside this crate; these are consumed as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalibrationData {
    pub pop_years: Vec<f64>,
    pub pop_size: Vec<f64>,
    pub mcpr_years: Vec<f64>,
    /// MCPR in percent at each of `mcpr_years`
    pub mcpr: Vec<f64>,
    /// Fraction of women per method, in method-table order
    pub method_counts: Vec<f64>,
    /// Percent of births per spacing bin
    pub spacing_bins: Vec<f64>,
    /// Quartiles of birth spacing, in years
    pub spacing_stats: Vec<f64>,
    /// Quartiles of age at first birth
    pub age_first_stats: Vec<f64>,
    /// Quartiles of ages of currently pregnant women
    pub age_pregnant_stats: Vec<f64>,
    /// Flattened age-by-parity percentages, row-major over
    /// `SKY_N_AGE x SKY_N_PARITY`
    pub skyscrapers: Vec<f64>,
}

/// One named comparison between a data array and a model array
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRecord {
    pub key: String,
    pub data: Vec<f64>,
    pub model: Vec<f64>,
}

/// The paired outputs of one calibration run
#[derive(Debug)]
pub struct CalibrationResults {
    pub data: FxHashMap<String, Vec<f64>>,
    pub model: FxHashMap<String, Vec<f64>>,
    pub records: Vec<ComparisonRecord>,
    pub result: SimulationResult,
}

impl CalibrationResults {
    /// Score the paired statistics with the fit layer
    pub fn compute_fit(&self, config: FitConfig) -> Result<Fit, FitError> {
        Fit::new(&self.data, &self.model, config)
    }
}

/// Drives a simulation run and reconciles its outputs with reference data
#[derive(Debug)]
pub struct Calibration {
    pub flags: CalibFlags,
    config: SimulationConfig,
    data: CalibrationData,
}

impl Calibration {
    #[must_use]
    pub fn new(config: SimulationConfig, data: CalibrationData, flags: CalibFlags) -> Self {
        Self {
            flags,
            config,
            data,
        }
    }

    /// Run the model and extract every flagged statistic group.
    ///
    /// Fails if the resulting data and model key sets differ; a partial
    /// comparison would silently skew the mismatch.
    pub fn run(&self) -> Result<CalibrationResults, CalibrationError> {
        let sim = Sim::new(self.config.clone(), Vec::new())?;
        let result = sim.run()?;

        let mut data = FxHashMap::default();
        let mut model = FxHashMap::default();

        if self.flags.popsize {
            self.extract_popsize(&result, &mut data, &mut model);
        }
        if self.flags.mcpr {
            self.extract_mcpr(&result, &mut data, &mut model);
        }
        if self.flags.methods {
            self.extract_methods(&result, &mut data, &mut model);
        }
        if self.flags.skyscrapers {
            self.extract_skyscrapers(&result, &mut data, &mut model);
        }
        if self.flags.birth_space {
            self.extract_birth_spacing(&result, &mut data, &mut model);
        }
        if self.flags.age_pregnancy {
            self.extract_age_pregnancy(&result, &mut data, &mut model);
        }

        check_key_sets(&data, &model)?;

        let mut keys: Vec<&String> = data.keys().collect();
        keys.sort();
        let records = keys
            .into_iter()
            .map(|key| ComparisonRecord {
                key: key.clone(),
                data: data[key].clone(),
                model: model[key].clone(),
            })
            .collect();

        Ok(CalibrationResults {
            data,
            model,
            records,
            result,
        })
    }

    /// Population size and year-over-year growth at the data years.
    ///
    /// The data series is rescaled so its first point matches the model's
    /// agent count; growth-rate computation stops at the final matching
    /// data year.
    fn extract_popsize(
        &self,
        result: &SimulationResult,
        data: &mut FxHashMap<String, Vec<f64>>,
        model: &mut FxHashMap<String, Vec<f64>>,
    ) {
        let mut model_pop = Vec::new();
        let mut data_pop = Vec::new();
        for (year, pop) in self.data.pop_years.iter().zip(&self.data.pop_size) {
            if let Some(idx) = result.tfr_years.iter().position(|y| y == year) {
                model_pop.push(result.pop_size[idx]);
                data_pop.push(*pop);
            }
        }
        // Correct the data for the number of agents
        if let (Some(&first_data), Some(&first_model)) = (data_pop.first(), model_pop.first())
            && first_data > 0.0
        {
            let scale = first_model / first_data;
            for p in &mut data_pop {
                *p *= scale;
            }
        }

        data.insert(
            "pop_growth_rate".into(),
            pop_growth_rate(&data_pop),
        );
        model.insert(
            "pop_growth_rate".into(),
            pop_growth_rate(&model_pop),
        );
        data.insert("pop_size".into(), data_pop);
        model.insert("pop_size".into(), model_pop);
    }

    /// MCPR (in percent) at the years present in the reference series
    fn extract_mcpr(
        &self,
        result: &SimulationResult,
        data: &mut FxHashMap<String, Vec<f64>>,
        model: &mut FxHashMap<String, Vec<f64>>,
    ) {
        let mut model_mcpr = Vec::new();
        let mut data_mcpr = Vec::new();
        for (year, value) in self.data.mcpr_years.iter().zip(&self.data.mcpr) {
            if let Some(mcpr) = result.mcpr_at(*year) {
                if *year >= result.t.first().copied().unwrap_or(f64::MAX)
                    && *year <= result.t.last().copied().unwrap_or(f64::MIN)
                {
                    model_mcpr.push(mcpr * 100.0);
                    data_mcpr.push(*value);
                }
            }
        }
        data.insert("mcpr".into(), data_mcpr);
        model.insert("mcpr".into(), model_mcpr);
    }

    /// Fraction of age-eligible living women on each method
    fn extract_methods(
        &self,
        result: &SimulationResult,
        data: &mut FxHashMap<String, Vec<f64>>,
        model: &mut FxHashMap<String, Vec<f64>>,
    ) {
        let n_methods = self.config.methods.table.len();
        let mut counts = vec![0.0; n_methods];
        for p in eligible_women(result, &self.config) {
            counts[p.method.index()] += 1.0;
        }
        let total: f64 = counts.iter().sum();
        if total > 0.0 {
            for c in &mut counts {
                *c /= total;
            }
        }
        data.insert("method_counts".into(), self.data.method_counts.clone());
        model.insert("method_counts".into(), counts);
    }

    /// Age-by-parity distribution as percentages over fixed bins
    fn extract_skyscrapers(
        &self,
        result: &SimulationResult,
        data: &mut FxHashMap<String, Vec<f64>>,
        model: &mut FxHashMap<String, Vec<f64>>,
    ) {
        let mut grid = vec![0.0; SKY_N_AGE * SKY_N_PARITY];
        for p in result.people.iter().filter(|p| {
            p.alive && p.is_female() && p.age >= SKY_MIN_AGE && p.age < SKY_MAX_AGE
        }) {
            let age_bin = (((p.age - SKY_MIN_AGE) / SKY_AGE_BIN) as usize).min(SKY_N_AGE - 1);
            let parity_bin = (p.parity as usize).min(SKY_N_PARITY - 1);
            grid[age_bin * SKY_N_PARITY + parity_bin] += 1.0;
        }
        let total: f64 = grid.iter().sum();
        if total > 0.0 {
            for g in &mut grid {
                *g *= 100.0 / total;
            }
        }
        data.insert("skyscrapers".into(), self.data.skyscrapers.clone());
        model.insert("skyscrapers".into(), grid);
    }

    /// Birth-spacing bin percentages plus spacing and age-at-first-birth
    /// quartiles
    fn extract_birth_spacing(
        &self,
        result: &SimulationResult,
        data: &mut FxHashMap<String, Vec<f64>>,
        model: &mut FxHashMap<String, Vec<f64>>,
    ) {
        let mut spacings = Vec::new();
        let mut first_births = Vec::new();
        let mut bin_counts = vec![0.0; SPACING_BIN_EDGES.len()];

        for p in &result.people {
            if let Some(&first) = p.dobs.first() {
                first_births.push(first);
            }
            for pair in p.dobs.windows(2) {
                let space = pair[1] - pair[0];
                let bin = SPACING_BIN_EDGES
                    .iter()
                    .rposition(|edge| space > *edge)
                    .unwrap_or(0);
                bin_counts[bin] += 1.0;
                spacings.push(space);
            }
        }

        let total: f64 = bin_counts.iter().sum();
        if total > 0.0 {
            for c in &mut bin_counts {
                *c *= 100.0 / total;
            }
        }

        data.insert("spacing_bins".into(), self.data.spacing_bins.clone());
        model.insert("spacing_bins".into(), bin_counts);
        data.insert("spacing_stats".into(), self.data.spacing_stats.clone());
        model.insert("spacing_stats".into(), stats::quartiles(&spacings).to_vec());
        data.insert("age_first_stats".into(), self.data.age_first_stats.clone());
        model.insert(
            "age_first_stats".into(),
            stats::quartiles(&first_births).to_vec(),
        );
    }

    /// Quartiles of the ages of currently pregnant women
    fn extract_age_pregnancy(
        &self,
        result: &SimulationResult,
        data: &mut FxHashMap<String, Vec<f64>>,
        model: &mut FxHashMap<String, Vec<f64>>,
    ) {
        let ages: Vec<f64> = result
            .people
            .iter()
            .filter(|p| p.alive && p.pregnancy.is_some())
            .map(|p| p.age)
            .collect();
        data.insert(
            "age_pregnant_stats".into(),
            self.data.age_pregnant_stats.clone(),
        );
        model.insert("age_pregnant_stats".into(), stats::quartiles(&ages).to_vec());
    }
}

/// Year-over-year percent change, stopping at the final matching data year
fn pop_growth_rate(population: &[f64]) -> Vec<f64> {
    if population.len() < 2 {
        return Vec::new();
    }
    let last = population[population.len() - 1];
    let mut growth = Vec::with_capacity(population.len() - 1);
    for window in population.windows(2) {
        if window[0] == last {
            break;
        }
        let rate = if window[0] != 0.0 {
            (window[1] - window[0]) / window[0] * 100.0
        } else {
            0.0
        };
        growth.push(rate);
    }
    growth
}

fn eligible_women<'a>(
    result: &'a SimulationResult,
    config: &'a SimulationConfig,
) -> impl Iterator<Item = &'a Person> {
    result.people.iter().filter(|p| {
        p.alive
            && p.is_female()
            && p.age >= config.method_age
            && p.age < config.age_limit_fecundity
    })
}

/// The data and model statistic sets must be identical before any
/// comparison is produced
fn check_key_sets(
    data: &FxHashMap<String, Vec<f64>>,
    model: &FxHashMap<String, Vec<f64>>,
) -> Result<(), FitError> {
    let mut data_only: Vec<String> = data
        .keys()
        .filter(|k| !model.contains_key(*k))
        .cloned()
        .collect();
    let mut model_only: Vec<String> = model
        .keys()
        .filter(|k| !data.contains_key(*k))
        .cloned()
        .collect();
    if data_only.is_empty() && model_only.is_empty() {
        Ok(())
    } else {
        data_only.sort();
        model_only.sort();
        Err(FitError::KeySetMismatch {
            data_only,
            model_only,
        })
    }
}
