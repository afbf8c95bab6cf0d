//! Pairing and weighting of model output against reference data
//!
//! Terminology, bottom to top:
//! - difference: elementwise model minus data for one statistic
//! - goodness-of-fit: the difference passed through `compute_gof`
//! - loss: the goodness-of-fit scaled by the statistic's weight
//! - mismatch: the per-statistic loss total, and finally the grand total
//!   minimized by an external optimizer

use rustc_hash::FxHashMap;

use crate::calibration::gof::{GofOptions, compute_gof};
use crate::error::FitError;
use crate::stats;

/// A per-statistic weight: one scalar, or one value per element
#[derive(Debug, Clone)]
pub enum Weight {
    Scalar(f64),
    Array(Vec<f64>),
}

impl From<f64> for Weight {
    fn from(w: f64) -> Self {
        Weight::Scalar(w)
    }
}

/// An out-of-band comparison supplied already paired, bypassing index
/// reconciliation
#[derive(Debug, Clone)]
pub struct CustomComparison {
    pub sim: Vec<f64>,
    pub data: Vec<f64>,
    pub weight: Weight,
}

/// Options for a fit computation
#[derive(Debug, Clone, Default)]
pub struct FitConfig {
    /// Per-statistic weights; statistics without one default to 1 (with
    /// elevated defaults for cumulative death/diagnosis channels)
    pub weights: FxHashMap<String, Weight>,
    /// Restrict the fit to these statistics; errors if one is absent from
    /// the data
    pub keys: Option<Vec<String>>,
    pub custom: FxHashMap<String, CustomComparison>,
    pub gof: GofOptions,
    /// Reduce each statistic's losses by median instead of sum
    pub use_median: bool,
}

/// Built-in weight defaults, overridden by any user-supplied entry
fn default_weights() -> FxHashMap<String, Weight> {
    let mut weights = FxHashMap::default();
    weights.insert("cum_deaths".to_string(), Weight::Scalar(10.0));
    weights.insert("cum_diagnoses".to_string(), Weight::Scalar(5.0));
    weights
}

/// The fit between a model-output mapping and a data mapping
#[derive(Debug)]
pub struct Fit {
    /// Reconciled statistic names, in deterministic order
    pub keys: Vec<String>,
    pub custom_keys: Vec<String>,
    /// Matching (finite-data) indices per reconciled key
    inds: FxHashMap<String, Vec<usize>>,
    /// Paired `(sim, data)` points per key
    pairs: FxHashMap<String, (Vec<f64>, Vec<f64>)>,
    /// Full model-series length per reconciled key, for weight slicing
    series_len: FxHashMap<String, usize>,
    weights: FxHashMap<String, Weight>,
    gof_options: GofOptions,
    use_median: bool,

    pub diffs: FxHashMap<String, Vec<f64>>,
    pub gofs: FxHashMap<String, Vec<f64>>,
    pub losses: FxHashMap<String, Vec<f64>>,
    pub mismatches: FxHashMap<String, f64>,
    /// The final scalar to be minimized
    pub mismatch: f64,
}

impl Fit {
    /// Reconcile, pair, and score in one pass
    pub fn new(
        data: &FxHashMap<String, Vec<f64>>,
        sim: &FxHashMap<String, Vec<f64>>,
        config: FitConfig,
    ) -> Result<Self, FitError> {
        let mut weights = default_weights();
        weights.extend(config.weights);

        let mut fit = Self {
            keys: Vec::new(),
            custom_keys: Vec::new(),
            inds: FxHashMap::default(),
            pairs: FxHashMap::default(),
            series_len: FxHashMap::default(),
            weights,
            gof_options: config.gof,
            use_median: config.use_median,
            diffs: FxHashMap::default(),
            gofs: FxHashMap::default(),
            losses: FxHashMap::default(),
            mismatches: FxHashMap::default(),
            mismatch: 0.0,
        };

        fit.reconcile_inputs(data, sim, config.keys, config.custom)?;
        fit.compute_diffs();
        fit.compute_gofs()?;
        fit.compute_losses()?;
        fit.compute_mismatch();
        Ok(fit)
    }

    /// Find matching keys and indices between the model and the data
    fn reconcile_inputs(
        &mut self,
        data: &FxHashMap<String, Vec<f64>>,
        sim: &FxHashMap<String, Vec<f64>>,
        requested: Option<Vec<String>>,
        custom: FxHashMap<String, CustomComparison>,
    ) -> Result<(), FitError> {
        let keys = match requested {
            Some(keys) => {
                let missing: Vec<String> = keys
                    .iter()
                    .filter(|k| !data.contains_key(*k))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    return Err(FitError::KeysNotFound { keys: missing });
                }
                keys
            }
            None => {
                let mut keys: Vec<String> = data
                    .keys()
                    .filter(|k| sim.contains_key(*k))
                    .cloned()
                    .collect();
                keys.sort();
                keys
            }
        };

        for key in &keys {
            let data_series = &data[key];
            let sim_series = sim.get(key).map_or(&[] as &[f64], Vec::as_slice);

            // Ordered, index-aligned pairing of the finite data points
            let inds: Vec<usize> = data_series
                .iter()
                .enumerate()
                .filter(|(i, v)| v.is_finite() && *i < sim_series.len())
                .map(|(i, _)| i)
                .collect();
            let paired_sim: Vec<f64> = inds.iter().map(|&i| sim_series[i]).collect();
            let paired_data: Vec<f64> = inds.iter().map(|&i| data_series[i]).collect();

            self.series_len.insert(key.clone(), sim_series.len());
            self.inds.insert(key.clone(), inds);
            self.pairs.insert(key.clone(), (paired_sim, paired_data));
        }
        self.keys = keys;

        // Custom comparisons arrive pre-paired
        let mut custom_keys: Vec<String> = custom.keys().cloned().collect();
        custom_keys.sort();
        for key in &custom_keys {
            let entry = &custom[key];
            if self.pairs.contains_key(key) {
                return Err(FitError::CustomKeyCollision(key.clone()));
            }
            if entry.sim.len() != entry.data.len() {
                return Err(FitError::CustomLengthMismatch {
                    key: key.clone(),
                    sim: entry.sim.len(),
                    data: entry.data.len(),
                });
            }
            self.pairs
                .insert(key.clone(), (entry.sim.clone(), entry.data.clone()));
            self.weights.insert(key.clone(), entry.weight.clone());
        }
        self.custom_keys = custom_keys;
        Ok(())
    }

    fn all_keys(&self) -> impl Iterator<Item = &String> {
        self.keys.iter().chain(self.custom_keys.iter())
    }

    /// Elementwise model-minus-data differences
    fn compute_diffs(&mut self) {
        let keys: Vec<String> = self.all_keys().cloned().collect();
        for key in keys {
            let (sim, data) = &self.pairs[&key];
            let diff = sim.iter().zip(data).map(|(s, d)| s - d).collect();
            self.diffs.insert(key, diff);
        }
    }

    /// Per-key goodness-of-fit via `compute_gof`
    fn compute_gofs(&mut self) -> Result<(), FitError> {
        // Reduction to a scalar happens at the mismatch stage; the gof stage
        // always keeps the elementwise series
        let mut options = self.gof_options;
        options.as_scalar = crate::calibration::gof::Scalarize::None;

        let keys: Vec<String> = self.all_keys().cloned().collect();
        for key in keys {
            let (sim, data) = &self.pairs[&key];
            let gof = compute_gof(data, sim, &options)?;
            self.gofs.insert(key, gof.into_series());
        }
        Ok(())
    }

    /// Weighted goodness-of-fit per key
    fn compute_losses(&mut self) -> Result<(), FitError> {
        let keys: Vec<String> = self.all_keys().cloned().collect();
        for key in keys {
            let gofs = &self.gofs[&key];
            let loss = match self.weights.get(&key) {
                None => gofs.clone(),
                Some(Weight::Scalar(w)) => gofs.iter().map(|g| g * w).collect(),
                Some(Weight::Array(w)) => {
                    let matched = gofs.len();
                    let series = self.series_len.get(&key).copied().unwrap_or(matched);
                    if w.len() == matched {
                        gofs.iter().zip(w).map(|(g, w)| g * w).collect()
                    } else if w.len() == series {
                        // Weight spans the full series; slice down to the
                        // matched indices
                        let inds = &self.inds[&key];
                        gofs.iter()
                            .zip(inds.iter().map(|&i| w[i]))
                            .map(|(g, w)| g * w)
                            .collect()
                    } else {
                        return Err(FitError::WeightLengthMismatch {
                            key: key.clone(),
                            weight: w.len(),
                            series,
                            matched,
                        });
                    }
                }
            };
            self.losses.insert(key.clone(), loss);
        }
        Ok(())
    }

    /// Per-key mismatches and their grand total
    fn compute_mismatch(&mut self) {
        let keys: Vec<String> = self.all_keys().cloned().collect();
        let mut total = 0.0;
        for key in keys {
            let losses = &self.losses[&key];
            let value = if self.use_median {
                stats::median(losses)
            } else {
                losses.iter().sum()
            };
            self.mismatches.insert(key, value);
            total += value;
        }
        self.mismatch = total;
    }

    /// The paired `(sim, data)` points for one statistic
    #[must_use]
    pub fn pair(&self, key: &str) -> Option<(&[f64], &[f64])> {
        self.pairs.get(key).map(|(s, d)| (s.as_slice(), d.as_slice()))
    }
}
