//! Scenario runner: labelled intervention bundles over repeated sims
//!
//! Each scenario expands into `UpdateMethods` interventions and runs
//! `repeats` otherwise-identical sims with consecutive seeds. Replicates are
//! fully independent (each owns its parameter copy and random stream), so
//! they run in parallel under the `parallel` feature.

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::interventions::{Intervention, ScenarioSpec, UpdateMethods};
use crate::model::SimulationResult;
use crate::simulation::Sim;
use crate::stats::SummaryStats;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// A labelled scenario: one or more edit specifications applied to the same
/// set of replicates
#[derive(Debug, Clone)]
pub struct ScenarioDef {
    pub label: String,
    pub specs: Vec<ScenarioSpec>,
}

/// Per-scenario aggregate statistics across replicates
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub label: String,
    /// Live births within the analysis window
    pub births: SummaryStats,
    /// Method failures (conceptions while on a method) within the window
    pub fails: SummaryStats,
    /// Person-years of population within the window
    pub popsize: SummaryStats,
    /// Mean total fertility rate within the window
    pub tfr: SummaryStats,
}

/// All runs plus their per-label summaries
#[derive(Debug)]
pub struct ScenarioResults {
    pub runs: Vec<(String, Vec<SimulationResult>)>,
}

impl ScenarioResults {
    /// Summarize each scenario's outcomes over `[start, end)` simulated years
    #[must_use]
    pub fn analyze(&self, start: f64, end: f64) -> Vec<ScenarioSummary> {
        self.runs
            .iter()
            .map(|(label, results)| {
                let births: Vec<f64> = results
                    .iter()
                    .map(|r| window_sum(&r.t, &r.births, start, end))
                    .collect();
                let fails: Vec<f64> = results
                    .iter()
                    .map(|r| window_sum(&r.t, &r.method_failures, start, end))
                    .collect();
                let popsize: Vec<f64> = results
                    .iter()
                    .map(|r| {
                        r.tfr_years
                            .iter()
                            .zip(&r.pop_size)
                            .filter(|(y, _)| **y >= start && **y < end)
                            .map(|(_, p)| *p)
                            .sum()
                    })
                    .collect();
                let tfr: Vec<f64> = results
                    .iter()
                    .map(|r| {
                        let vals: Vec<f64> = r
                            .tfr_years
                            .iter()
                            .zip(&r.tfr_rates)
                            .filter(|(y, _)| **y >= start && **y < end)
                            .map(|(_, v)| *v)
                            .collect();
                        crate::stats::mean(&vals)
                    })
                    .collect();
                ScenarioSummary {
                    label: label.clone(),
                    births: SummaryStats::from_values(&births),
                    fails: SummaryStats::from_values(&fails),
                    popsize: SummaryStats::from_values(&popsize),
                    tfr: SummaryStats::from_values(&tfr),
                }
            })
            .collect()
    }
}

fn window_sum(t: &[f64], values: &[u32], start: f64, end: f64) -> f64 {
    t.iter()
        .zip(values)
        .filter(|(y, _)| **y >= start && **y < end)
        .map(|(_, v)| f64::from(*v))
        .sum()
}

/// Runs intervention scenarios against a base configuration
#[derive(Debug)]
pub struct Scenarios {
    base: SimulationConfig,
    repeats: usize,
    /// Default target year for scenarios that do not carry their own
    scen_year: Option<f64>,
    scens: Vec<ScenarioDef>,
}

impl Scenarios {
    #[must_use]
    pub fn new(base: SimulationConfig, repeats: usize, scen_year: Option<f64>) -> Self {
        Self {
            base,
            repeats: repeats.max(1),
            scen_year,
            scens: Vec::new(),
        }
    }

    /// Add a scenario; the label falls back to the spec's own, then to a
    /// positional name
    pub fn add_scen(&mut self, spec: ScenarioSpec, label: Option<&str>) {
        let label = label
            .map(str::to_string)
            .or_else(|| spec.label.clone())
            .unwrap_or_else(|| format!("scenario_{}", self.scens.len()));
        self.scens.push(ScenarioDef {
            label,
            specs: vec![spec],
        });
    }

    /// Expand one scenario definition into interventions
    fn make_interventions(&self, def: &ScenarioDef) -> Result<Vec<Intervention>, ConfigError> {
        let mut interventions = Vec::with_capacity(def.specs.len());
        for spec in &def.specs {
            let year = spec.year.or(self.scen_year).ok_or_else(|| {
                ConfigError::InvalidParameters {
                    reason: format!(
                        "scenario {:?} has no year and no default scenario year is set",
                        def.label
                    ),
                }
            })?;
            interventions.push(UpdateMethods::new(year, spec.clone(), spec.matrix)?.into());
        }
        Ok(interventions)
    }

    /// Run every scenario's replicates and collect their results
    pub fn run(&self) -> Result<ScenarioResults, ConfigError> {
        if self.scens.is_empty() {
            return Err(ConfigError::InvalidParameters {
                reason: "no scenarios are defined".into(),
            });
        }

        let mut runs = Vec::with_capacity(self.scens.len());
        for def in &self.scens {
            // Each replicate gets its own parameter copy, interventions, and
            // seed offset
            let jobs: Vec<(SimulationConfig, Vec<Intervention>)> = (0..self.repeats)
                .map(|i| {
                    let config = self.base.clone().with_seed(self.base.seed + i as u64);
                    Ok((config, self.make_interventions(def)?))
                })
                .collect::<Result<_, ConfigError>>()?;

            let results = run_jobs(jobs)?;
            runs.push((def.label.clone(), results));
        }
        Ok(ScenarioResults { runs })
    }
}

#[cfg(feature = "parallel")]
fn run_jobs(
    jobs: Vec<(SimulationConfig, Vec<Intervention>)>,
) -> Result<Vec<SimulationResult>, ConfigError> {
    jobs.into_par_iter()
        .map(|(config, interventions)| Sim::new(config, interventions)?.run())
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_jobs(
    jobs: Vec<(SimulationConfig, Vec<Intervention>)>,
) -> Result<Vec<SimulationResult>, ConfigError> {
    jobs.into_iter()
        .map(|(config, interventions)| Sim::new(config, interventions)?.run())
        .collect()
}
