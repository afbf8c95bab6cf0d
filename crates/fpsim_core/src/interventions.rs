//! One-shot scenario interventions
//!
//! Interventions are a closed set of kinds dispatched by match at each
//! simulation step: `ChangePar` rewrites a scalar parameter at given years,
//! `UpdateMethods` edits method efficacies and/or switching matrices at a
//! target year. Both operate on the simulation's own deep-copied parameter
//! set, so baselines stay untouched and edits persist for the rest of the
//! run.
//!
//! Scenario inputs are parsed into typed structs with an explicit
//! allow-list of fields; anything unrecognized is rejected at parse time
//! rather than silently ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::Rng;
use rand_distr::Distribution;
use serde::Deserialize;

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::model::{MatrixFamily, MethodId, ROW_SUM_TOL};

// ============================================================================
// Value resolution
// ============================================================================

/// How a scenario supplies a number: a literal, a named distribution, or a
/// caller-provided closure. Resolution happens at apply time, not at
/// construction, so stochastic sources draw from the run's own stream.
#[derive(Clone)]
pub enum ValueSpec {
    Const(f64),
    Normal { mean: f64, std: f64 },
    Uniform { low: f64, high: f64 },
    Lognormal { mean: f64, std: f64 },
    Fn(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl ValueSpec {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, ConfigError> {
        match self {
            ValueSpec::Const(v) => Ok(*v),
            ValueSpec::Normal { mean, std } => rand_distr::Normal::new(*mean, *std)
                .map(|d| d.sample(rng))
                .map_err(|_| ConfigError::InvalidDistribution {
                    dist: "normal",
                    par1: *mean,
                    par2: *std,
                }),
            ValueSpec::Uniform { low, high } => {
                if high < low {
                    return Err(ConfigError::InvalidDistribution {
                        dist: "uniform",
                        par1: *low,
                        par2: *high,
                    });
                }
                Ok(low + rng.random::<f64>() * (high - low))
            }
            ValueSpec::Lognormal { mean, std } => rand_distr::LogNormal::new(*mean, *std)
                .map(|d| d.sample(rng))
                .map_err(|_| ConfigError::InvalidDistribution {
                    dist: "lognormal",
                    par1: *mean,
                    par2: *std,
                }),
            ValueSpec::Fn(f) => Ok(f()),
        }
    }
}

impl fmt::Debug for ValueSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSpec::Const(v) => write!(f, "Const({v})"),
            ValueSpec::Normal { mean, std } => write!(f, "Normal({mean}, {std})"),
            ValueSpec::Uniform { low, high } => write!(f, "Uniform({low}, {high})"),
            ValueSpec::Lognormal { mean, std } => write!(f, "Lognormal({mean}, {std})"),
            ValueSpec::Fn(_) => write!(f, "Fn(..)"),
        }
    }
}

impl From<f64> for ValueSpec {
    fn from(v: f64) -> Self {
        ValueSpec::Const(v)
    }
}

/// Serde shape for `ValueSpec`: a bare number or a `{dist, par1, par2}` map
#[derive(Deserialize)]
#[serde(untagged)]
enum ValueSpecRepr {
    Number(f64),
    Dist { dist: String, par1: f64, par2: f64 },
}

impl<'de> Deserialize<'de> for ValueSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match ValueSpecRepr::deserialize(deserializer)? {
            ValueSpecRepr::Number(v) => Ok(ValueSpec::Const(v)),
            ValueSpecRepr::Dist { dist, par1, par2 } => match dist.as_str() {
                "normal" => Ok(ValueSpec::Normal {
                    mean: par1,
                    std: par2,
                }),
                "uniform" => Ok(ValueSpec::Uniform {
                    low: par1,
                    high: par2,
                }),
                "lognormal" => Ok(ValueSpec::Lognormal {
                    mean: par1,
                    std: par2,
                }),
                other => Err(serde::de::Error::custom(format!(
                    "unknown distribution {other:?}"
                ))),
            },
        }
    }
}

// ============================================================================
// Selectors
// ============================================================================

/// Keys accepted as "select everything"
const ALL_KEYS: &[&str] = &["all", ":"];

/// A method selector: a name, or a wildcard covering every method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MethodSel {
    #[default]
    All,
    Name(String),
}

impl MethodSel {
    fn resolve(&self, config: &SimulationConfig) -> Result<Vec<MethodId>, ConfigError> {
        match self {
            MethodSel::All => Ok(config
                .methods
                .table
                .methods()
                .iter()
                .map(|m| m.id)
                .collect()),
            MethodSel::Name(name) => Ok(vec![config.methods.table.index_of(name)?]),
        }
    }
}

impl From<&str> for MethodSel {
    fn from(s: &str) -> Self {
        if ALL_KEYS.contains(&s) {
            MethodSel::All
        } else {
            MethodSel::Name(s.to_string())
        }
    }
}

impl<'de> Deserialize<'de> for MethodSel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(match name {
            None => MethodSel::All,
            Some(s) => MethodSel::from(s.as_str()),
        })
    }
}

/// An age-bracket selector: explicit bracket names, or every bracket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BracketSel {
    #[default]
    All,
    Keys(Vec<String>),
}

impl BracketSel {
    fn resolve(&self, config: &SimulationConfig) -> Result<Vec<usize>, ConfigError> {
        let matrices = &config.methods.matrices;
        match self {
            BracketSel::All => Ok((0..matrices.n_brackets()).collect()),
            BracketSel::Keys(keys) => keys
                .iter()
                .map(|k| matrices.bracket_index(k))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for BracketSel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }
        let repr = Option::<Repr>::deserialize(deserializer)?;
        Ok(match repr {
            None => BracketSel::All,
            Some(Repr::One(s)) if ALL_KEYS.contains(&s.as_str()) => BracketSel::All,
            Some(Repr::One(s)) => BracketSel::Keys(vec![s]),
            Some(Repr::Many(keys)) => BracketSel::Keys(keys),
        })
    }
}

// ============================================================================
// Scenario specification
// ============================================================================

/// A single switching-probability edit
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbEdit {
    #[serde(default)]
    pub source: MethodSel,
    #[serde(default)]
    pub dest: MethodSel,
    /// Multiply the cell by this...
    #[serde(default)]
    pub factor: Option<ValueSpec>,
    /// ...or overwrite it with this; exactly one must be given
    #[serde(default)]
    pub value: Option<ValueSpec>,
    #[serde(default)]
    pub keys: BracketSel,
}

impl ProbEdit {
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.factor, &self.value) {
            (Some(_), Some(_)) => Err(ConfigError::InvalidProbEdit {
                reason: "specify either factor or value, not both",
            }),
            (None, None) => Err(ConfigError::InvalidProbEdit {
                reason: "one of factor or value is required",
            }),
            _ => Ok(()),
        }
    }
}

/// The recognized fields of a scenario: efficacy overrides and probability
/// edits, plus optional routing fields consumed by the scenario runner.
/// Unknown fields fail deserialization outright.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSpec {
    /// Method name (or wildcard) -> new efficacy; ordered for determinism
    #[serde(default)]
    pub eff: Option<BTreeMap<String, ValueSpec>>,
    #[serde(default)]
    pub probs: Option<Vec<ProbEdit>>,
    /// Target year, overriding the runner's default
    #[serde(default)]
    pub year: Option<f64>,
    /// Matrix family to edit (default annual)
    #[serde(default)]
    pub matrix: Option<MatrixFamily>,
    #[serde(default)]
    pub label: Option<String>,
}

impl ScenarioSpec {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(probs) = &self.probs {
            for edit in probs {
                edit.validate()?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// UpdateMethods
// ============================================================================

/// Modify method efficacy and/or a switching table at a target year.
///
/// Applied exactly once, the first time the simulated clock reaches the
/// year; re-running the edit logic on an applied instance is an error, not a
/// no-op.
#[derive(Debug, Clone)]
pub struct UpdateMethods {
    pub year: f64,
    pub matrix: MatrixFamily,
    scen: ScenarioSpec,
    label: String,
    applied: bool,
}

impl UpdateMethods {
    pub fn new(year: f64, scen: ScenarioSpec, matrix: Option<MatrixFamily>) -> Result<Self, ConfigError> {
        scen.validate()?;
        let matrix = matrix
            .or(scen.matrix)
            .unwrap_or(MatrixFamily::Annual);
        let label = scen
            .label
            .clone()
            .unwrap_or_else(|| format!("update_methods@{year}"));
        Ok(Self {
            year,
            matrix,
            scen,
            label,
            applied: false,
        })
    }

    #[must_use]
    pub fn applied(&self) -> bool {
        self.applied
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn initialize(&self, config: &SimulationConfig) -> Result<(), ConfigError> {
        if self.year < f64::from(config.start_year) || self.year > f64::from(config.end_year) {
            return Err(ConfigError::YearOutOfRange {
                year: self.year,
                start_year: config.start_year,
                end_year: config.end_year,
            });
        }
        // Resolve every name now so typos surface before the run starts
        if let Some(eff) = &self.scen.eff {
            for name in eff.keys() {
                if !ALL_KEYS.contains(&name.as_str()) {
                    config.methods.table.index_of(name)?;
                }
            }
        }
        if let Some(probs) = &self.scen.probs {
            for edit in probs {
                edit.source.resolve(config)?;
                edit.dest.resolve(config)?;
                edit.keys.resolve(config)?;
            }
        }
        Ok(())
    }

    /// Execute the efficacy and probability edits against `config`.
    ///
    /// Callers gate this on the target year; calling it twice on the same
    /// instance is a programming error and raises.
    pub fn apply_edits<R: Rng + ?Sized>(
        &mut self,
        config: &mut SimulationConfig,
        year: f64,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        if self.applied {
            return Err(ConfigError::AlreadyApplied {
                label: self.label.clone(),
            });
        }
        self.applied = true;

        if let Some(eff) = &self.scen.eff {
            for (name, spec) in eff {
                let ids = MethodSel::from(name.as_str()).resolve(config)?;
                for id in ids {
                    let v = spec.resolve(rng)?;
                    let orig = config.methods.table.efficacy(id);
                    config.methods.table.set_efficacy(id, v);
                    tracing::info!(
                        year,
                        method = %config.methods.table.get(id).name,
                        from = orig,
                        to = v,
                        "efficacy changed"
                    );
                }
            }
        }

        if let Some(probs) = &self.scen.probs {
            for edit in probs {
                self.apply_prob_edit(config, edit, year, rng)?;
            }
        }

        // A successful edit keeps every row a distribution; verify rather
        // than trust
        config.methods.matrices.validate()?;
        Ok(())
    }

    fn apply_prob_edit<R: Rng + ?Sized>(
        &self,
        config: &mut SimulationConfig,
        edit: &ProbEdit,
        year: f64,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        edit.validate()?;
        let sources = edit.source.resolve(config)?;
        let dests = edit.dest.resolve(config)?;
        let brackets = edit.keys.resolve(config)?;

        for &bracket in &brackets {
            let bracket_name = config.methods.matrices.brackets()[bracket].name.clone();
            for &dest in &dests {
                if self.matrix == MatrixFamily::Pp0to1 {
                    // The initiation vector has no source dimension; the
                    // whole vector is "the row"
                    let change = resolve_change(edit, rng)?;
                    let row = config.methods.matrices.vector_mut(bracket);
                    apply_cell_edit(row, dest.index(), change).map_err(|value| {
                        ConfigError::NegativeResidual {
                            family: self.matrix,
                            bracket: bracket_name.clone(),
                            row: 0,
                            value,
                        }
                    })?;
                    tracing::info!(year, bracket = %bracket_name, dest = dest.index(), "pp0to1 vector edited");
                } else {
                    for &source in &sources {
                        let change = resolve_change(edit, rng)?;
                        let matrix = config.methods.matrices.matrix_mut(self.matrix, bracket);
                        apply_cell_edit(matrix.row_mut(source.index()), dest.index(), change)
                            .map_err(|value| ConfigError::NegativeResidual {
                                family: self.matrix,
                                bracket: bracket_name.clone(),
                                row: source.index(),
                                value,
                            })?;
                        tracing::info!(
                            year,
                            bracket = %bracket_name,
                            source = source.index(),
                            dest = dest.index(),
                            "switching matrix edited"
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

/// A resolved single-cell change
#[derive(Debug, Clone, Copy)]
enum CellChange {
    Factor(f64),
    Value(f64),
}

fn resolve_change<R: Rng + ?Sized>(edit: &ProbEdit, rng: &mut R) -> Result<CellChange, ConfigError> {
    match (&edit.factor, &edit.value) {
        (Some(spec), None) => Ok(CellChange::Factor(spec.resolve(rng)?)),
        (None, Some(spec)) => Ok(CellChange::Value(spec.resolve(rng)?)),
        _ => Err(ConfigError::InvalidProbEdit {
            reason: "one of factor or value is required",
        }),
    }
}

/// Apply a change to one cell of a probability row and renormalize the
/// remaining entries proportionally so the row still sums to 1.
///
/// Returns the offending cell value if the remainder to distribute is
/// negative or cannot be absorbed.
fn apply_cell_edit(row: &mut [f64], cell: usize, change: CellChange) -> Result<(), f64> {
    let new_val = match change {
        CellChange::Factor(factor) => row[cell] * factor,
        CellChange::Value(value) => value,
    };
    if !(0.0..=1.0 + ROW_SUM_TOL).contains(&new_val) {
        return Err(new_val);
    }
    let new_val = new_val.min(1.0);

    let rest: f64 = row
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != cell)
        .map(|(_, p)| *p)
        .sum();
    let residual = 1.0 - new_val;

    if rest > 0.0 {
        let scale = residual / rest;
        for (j, p) in row.iter_mut().enumerate() {
            if j != cell {
                *p *= scale;
            }
        }
    } else if residual > ROW_SUM_TOL {
        // Nothing left to absorb the remainder
        return Err(new_val);
    }
    row[cell] = new_val;
    Ok(())
}

// ============================================================================
// ChangePar
// ============================================================================

/// A scheduled scalar-parameter value: set it, or restore the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParValue {
    Set(f64),
    Reset,
}

impl<'de> Deserialize<'de> for ParValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Word(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(ParValue::Set(v)),
            Repr::Word(w) if w == "reset" => Ok(ParValue::Reset),
            Repr::Word(w) => Err(serde::de::Error::custom(format!(
                "expected a number or \"reset\", found {w:?}"
            ))),
        }
    }
}

/// Change a scalar parameter at one or more specified years
#[derive(Debug, Clone)]
pub struct ChangePar {
    pub par: String,
    years: Vec<f64>,
    vals: Vec<ParValue>,
    applied: Vec<bool>,
    baseline: Option<f64>,
}

impl ChangePar {
    pub fn new(par: &str, years: Vec<f64>, vals: Vec<ParValue>) -> Result<Self, ConfigError> {
        if years.len() != vals.len() {
            return Err(ConfigError::YearsValsLengthMismatch {
                n_years: years.len(),
                n_vals: vals.len(),
            });
        }
        let applied = vec![false; years.len()];
        Ok(Self {
            par: par.to_string(),
            years,
            vals,
            applied,
            baseline: None,
        })
    }

    fn initialize(&mut self, config: &SimulationConfig) -> Result<(), ConfigError> {
        // Unknown parameter names fail here, before the run starts
        self.baseline = Some(config.scalar_par(&self.par)?);
        for &year in &self.years {
            if year < f64::from(config.start_year) || year > f64::from(config.end_year) {
                return Err(ConfigError::YearOutOfRange {
                    year,
                    start_year: config.start_year,
                    end_year: config.end_year,
                });
            }
        }
        Ok(())
    }

    fn apply(&mut self, config: &mut SimulationConfig, year: f64) -> Result<(), ConfigError> {
        for i in 0..self.years.len() {
            if !self.applied[i] && year >= self.years[i] {
                self.applied[i] = true;
                let value = match self.vals[i] {
                    ParValue::Set(v) => v,
                    // Baseline is captured during initialize
                    ParValue::Reset => self.baseline.expect("initialized before apply"),
                };
                let orig = config.scalar_par(&self.par)?;
                config.set_scalar_par(&self.par, value)?;
                tracing::info!(year, par = %self.par, from = orig, to = value, "parameter changed");
            }
        }
        Ok(())
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// The closed set of intervention kinds, dispatched by match at each step
#[derive(Debug, Clone)]
pub enum Intervention {
    ChangePar(ChangePar),
    UpdateMethods(UpdateMethods),
}

impl Intervention {
    /// Validate against the configuration before the run starts
    pub fn initialize(&mut self, config: &SimulationConfig) -> Result<(), ConfigError> {
        match self {
            Intervention::ChangePar(cp) => cp.initialize(config),
            Intervention::UpdateMethods(um) => um.initialize(config),
        }
    }

    /// Called once per simulation step with the current simulated year
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        config: &mut SimulationConfig,
        year: f64,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        match self {
            Intervention::ChangePar(cp) => cp.apply(config, year),
            Intervention::UpdateMethods(um) => {
                if !um.applied && year >= um.year {
                    um.apply_edits(config, year, rng)?;
                }
                Ok(())
            }
        }
    }
}

impl From<ChangePar> for Intervention {
    fn from(cp: ChangePar) -> Self {
        Intervention::ChangePar(cp)
    }
}

impl From<UpdateMethods> for Intervention {
    fn from(um: UpdateMethods) -> Self {
        Intervention::UpdateMethods(um)
    }
}
