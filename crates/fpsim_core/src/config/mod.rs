//! Simulation configuration
//!
//! `SimulationConfig` is the complete parameter set for one run: scalar
//! parameters, demographic tables, and the contraceptive-method tables
//! (method definitions, switching matrices, MCPR trend). Location modules
//! build one of these from their static tables; the simulation owns a deep
//! copy so scenario edits never leak back into the baseline.
//!
//! There are no process-wide defaults: every run receives its configuration
//! explicitly.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::interp::InterpTable;
use crate::model::{MatrixSet, MethodTable};
use crate::trend::McprTrend;

/// Contraceptive-method configuration: the method table, the raw switching
/// matrices, and the prevalence trend that scales them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodConfig {
    pub table: MethodTable,
    pub matrices: MatrixSet,
    pub trend: McprTrend,
}

/// A discrete distribution over fated sexual-debut ages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebutAgeDist {
    pub ages: Vec<f64>,
    pub probs: Vec<f64>,
}

/// Starting population pyramid: `(age_lo, males, females)` weights per
/// five-year band
pub type AgePyramid = Vec<(f64, f64, f64)>;

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    // === Run controls ===
    pub location: String,
    pub n_agents: usize,
    pub start_year: i32,
    pub end_year: i32,
    pub seed: u64,
    /// Months between ordinary (annual-matrix) switching checkpoints
    pub switch_frequency: u32,

    // === Age limits (years) ===
    pub method_age: f64,
    pub age_limit_fecundity: f64,
    pub max_age: f64,

    // === Durations (months) ===
    pub preg_dur_low: u32,
    pub preg_dur_high: u32,
    pub end_first_tri: u32,
    pub postpartum_dur: u32,
    pub max_lam_dur: u32,

    // === Pregnancy outcome scalars ===
    pub twins_prob: f64,
    pub lam_efficacy: f64,

    // === Fecundity and exposure scalars ===
    pub fecundity_var_low: f64,
    pub fecundity_var_high: f64,
    pub primary_infertility: f64,
    pub exposure_factor: f64,

    // === Demographic tables ===
    pub age_pyramid: AgePyramid,
    /// Annual death probability by age
    pub mortality: InterpTable,
    /// Annual conception probability by age, for women trying to conceive
    pub fecundity: InterpTable,
    /// Fecundity ratio for nulliparous women by age
    pub fecundity_ratio_nullip: InterpTable,
    /// Fraction of women sexually active in a given month, by age
    pub sexual_activity: InterpTable,
    /// Miscarriage probability by age, evaluated at the end of the first
    /// trimester
    pub miscarriage: InterpTable,
    pub debut_age: DebutAgeDist,

    // === Contraceptive methods ===
    pub methods: MethodConfig,
}

impl SimulationConfig {
    /// Validate cross-field consistency; called once by `Sim::new`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_agents == 0 {
            return Err(ConfigError::InvalidParameters {
                reason: "n_agents must be positive".into(),
            });
        }
        if self.end_year <= self.start_year {
            return Err(ConfigError::InvalidParameters {
                reason: format!(
                    "end_year ({}) must be after start_year ({})",
                    self.end_year, self.start_year
                ),
            });
        }
        if self.method_age >= self.age_limit_fecundity {
            return Err(ConfigError::InvalidParameters {
                reason: "method_age must be below age_limit_fecundity".into(),
            });
        }
        if self.preg_dur_low > self.preg_dur_high {
            return Err(ConfigError::InvalidParameters {
                reason: "preg_dur_low must not exceed preg_dur_high".into(),
            });
        }
        if self.switch_frequency == 0 {
            return Err(ConfigError::InvalidParameters {
                reason: "switch_frequency must be at least one month".into(),
            });
        }
        if self.debut_age.ages.len() != self.debut_age.probs.len()
            || self.debut_age.ages.is_empty()
        {
            return Err(ConfigError::InvalidParameters {
                reason: "debut_age ages and probs must be matching non-empty series".into(),
            });
        }
        if self.age_pyramid.is_empty() {
            return Err(ConfigError::InvalidParameters {
                reason: "age pyramid is empty".into(),
            });
        }
        self.methods.matrices.validate()?;
        Ok(())
    }

    /// Number of monthly timesteps in the run
    #[must_use]
    pub fn n_steps(&self) -> usize {
        ((self.end_year - self.start_year) as usize) * 12
    }

    // === Scalar parameter access for interventions ===
    //
    // The allow-list below is the set of parameters `ChangePar` may touch;
    // any other name is a fatal configuration error.

    pub fn scalar_par(&self, name: &str) -> Result<f64, ConfigError> {
        match name {
            "exposure_factor" => Ok(self.exposure_factor),
            "primary_infertility" => Ok(self.primary_infertility),
            "twins_prob" => Ok(self.twins_prob),
            "lam_efficacy" => Ok(self.lam_efficacy),
            "fecundity_var_low" => Ok(self.fecundity_var_low),
            "fecundity_var_high" => Ok(self.fecundity_var_high),
            "mcpr_growth_rate" => Ok(self.methods.trend.growth_rate),
            "mcpr_max" => Ok(self.methods.trend.max_rate),
            "mcpr_norm_year" => Ok(self.methods.trend.norm_year),
            other => Err(ConfigError::ParameterNotFound(other.to_string())),
        }
    }

    pub fn set_scalar_par(&mut self, name: &str, value: f64) -> Result<(), ConfigError> {
        match name {
            "exposure_factor" => self.exposure_factor = value,
            "primary_infertility" => self.primary_infertility = value,
            "twins_prob" => self.twins_prob = value,
            "lam_efficacy" => self.lam_efficacy = value,
            "fecundity_var_low" => self.fecundity_var_low = value,
            "fecundity_var_high" => self.fecundity_var_high = value,
            "mcpr_growth_rate" => self.methods.trend.growth_rate = value,
            "mcpr_max" => self.methods.trend.max_rate = value,
            "mcpr_norm_year" => self.methods.trend.norm_year = value,
            other => return Err(ConfigError::ParameterNotFound(other.to_string())),
        }
        Ok(())
    }

    // === Builder-style helpers for sweeps and calibration ===

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_n_agents(mut self, n_agents: usize) -> Self {
        self.n_agents = n_agents;
        self
    }

    #[must_use]
    pub fn with_years(mut self, start_year: i32, end_year: i32) -> Self {
        self.start_year = start_year;
        self.end_year = end_year;
        self
    }

    #[must_use]
    pub fn with_exposure_factor(mut self, exposure_factor: f64) -> Self {
        self.exposure_factor = exposure_factor;
        self
    }
}
