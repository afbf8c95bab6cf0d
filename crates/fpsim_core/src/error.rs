use std::fmt;

use crate::model::MatrixFamily;

/// Errors raised while constructing or mutating a parameter set.
///
/// These are configuration errors in the strict sense: they indicate a
/// malformed parameter table, scenario, or intervention, and always abort
/// the run. Nothing in the simulation core recovers from them.
#[derive(Debug, Clone)]
pub enum ConfigError {
    MethodNotFound(String),
    BracketNotFound(String),
    LocationNotFound(String),
    MatrixFamilyNotFound(String),
    ParameterNotFound(String),
    /// A matrix row (or the pp0to1 vector) does not sum to 1 within tolerance
    RowNotStochastic {
        family: MatrixFamily,
        bracket: String,
        row: usize,
        total: f64,
    },
    /// A matrix/vector has the wrong dimensions for the method table
    MatrixShape {
        family: MatrixFamily,
        bracket: String,
        expected: usize,
        found: usize,
    },
    /// Renormalizing a row after an absolute-value edit left a negative residual
    NegativeResidual {
        family: MatrixFamily,
        bracket: String,
        row: usize,
        value: f64,
    },
    /// An intervention's `years` and `vals` lists have different lengths
    YearsValsLengthMismatch {
        n_years: usize,
        n_vals: usize,
    },
    /// An intervention year falls outside the simulated period
    YearOutOfRange {
        year: f64,
        start_year: i32,
        end_year: i32,
    },
    /// A one-shot scenario edit was applied a second time
    AlreadyApplied {
        label: String,
    },
    /// A scenario supplied fields beyond the recognized set
    UnconsumedScenarioKeys {
        keys: Vec<String>,
    },
    /// A probability edit specified both (or neither) of `factor` and `value`
    InvalidProbEdit {
        reason: &'static str,
    },
    InvalidDistribution {
        dist: &'static str,
        par1: f64,
        par2: f64,
    },
    /// A trend table is malformed (empty, unsorted, or mismatched lengths)
    InvalidTrend {
        reason: String,
    },
    /// Generic parameter-table validation failure
    InvalidParameters {
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MethodNotFound(name) => write!(f, "method {name:?} not found"),
            ConfigError::BracketNotFound(name) => write!(f, "age bracket {name:?} not found"),
            ConfigError::LocationNotFound(name) => write!(f, "location {name:?} not found"),
            ConfigError::MatrixFamilyNotFound(name) => {
                write!(
                    f,
                    "matrix family must be one of \"annual\", \"pp0to1\", \"pp1to6\", not {name:?}"
                )
            }
            ConfigError::ParameterNotFound(name) => {
                write!(f, "parameter {name:?} is not a recognized scalar parameter")
            }
            ConfigError::RowNotStochastic {
                family,
                bracket,
                row,
                total,
            } => {
                write!(
                    f,
                    "{family} matrix for bracket {bracket:?}: row {row} sums to {total}, not 1"
                )
            }
            ConfigError::MatrixShape {
                family,
                bracket,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{family} matrix for bracket {bracket:?}: expected {expected} methods, found {found}"
                )
            }
            ConfigError::NegativeResidual {
                family,
                bracket,
                row,
                value,
            } => {
                write!(
                    f,
                    "{family} matrix for bracket {bracket:?}: setting row {row} entry to {value} \
                     leaves a negative remainder to distribute"
                )
            }
            ConfigError::YearsValsLengthMismatch { n_years, n_vals } => {
                write!(
                    f,
                    "number of years ({n_years}) does not match number of values ({n_vals})"
                )
            }
            ConfigError::YearOutOfRange {
                year,
                start_year,
                end_year,
            } => {
                write!(
                    f,
                    "intervention year {year} is outside the simulation period {start_year}..={end_year}"
                )
            }
            ConfigError::AlreadyApplied { label } => {
                write!(f, "intervention {label:?} has already been applied")
            }
            ConfigError::UnconsumedScenarioKeys { keys } => {
                write!(
                    f,
                    "invalid scenario keys {:?}; must be \"eff\" or \"probs\"",
                    keys.join(", ")
                )
            }
            ConfigError::InvalidProbEdit { reason } => {
                write!(f, "invalid probability edit: {reason}")
            }
            ConfigError::InvalidDistribution { dist, par1, par2 } => {
                write!(f, "invalid {dist} distribution (par1={par1}, par2={par2})")
            }
            ConfigError::InvalidTrend { reason } => write!(f, "invalid MCPR trend: {reason}"),
            ConfigError::InvalidParameters { reason } => {
                write!(f, "invalid parameters: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by the goodness-of-fit and calibration layer
#[derive(Debug, Clone)]
pub enum FitError {
    /// `actual` and `predicted` series have different lengths
    SeriesLengthMismatch {
        actual: usize,
        predicted: usize,
    },
    /// A requested fit key is absent from the data
    KeysNotFound {
        keys: Vec<String>,
    },
    /// The data and model statistic sets are not identical
    KeySetMismatch {
        data_only: Vec<String>,
        model_only: Vec<String>,
    },
    /// A custom comparison reuses the name of a reconciled key
    CustomKeyCollision(String),
    /// A custom comparison's sim and data arrays have different lengths
    CustomLengthMismatch {
        key: String,
        sim: usize,
        data: usize,
    },
    /// An array weight matches neither the full series nor the matched pairs
    WeightLengthMismatch {
        key: String,
        weight: usize,
        series: usize,
        matched: usize,
    },
    EstimatorNotFound(String),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::SeriesLengthMismatch { actual, predicted } => {
                write!(
                    f,
                    "actual ({actual}) and predicted ({predicted}) series lengths differ"
                )
            }
            FitError::KeysNotFound { keys } => {
                write!(
                    f,
                    "the following requested key(s) were not found in the data: {}",
                    keys.join(", ")
                )
            }
            FitError::KeySetMismatch {
                data_only,
                model_only,
            } => {
                write!(
                    f,
                    "data and model keys do not match (data only: [{}]; model only: [{}])",
                    data_only.join(", "),
                    model_only.join(", ")
                )
            }
            FitError::CustomKeyCollision(key) => {
                write!(
                    f,
                    "custom key {key:?} matches one of the reconciled keys"
                )
            }
            FitError::CustomLengthMismatch { key, sim, data } => {
                write!(
                    f,
                    "custom comparison {key:?}: sim ({sim}) and data ({data}) lengths differ"
                )
            }
            FitError::WeightLengthMismatch {
                key,
                weight,
                series,
                matched,
            } => {
                write!(
                    f,
                    "could not map weight array of length {weight} for {key:?} onto series of \
                     length {series} or matched pairs of length {matched}"
                )
            }
            FitError::EstimatorNotFound(name) => {
                write!(f, "estimator {name:?} is not available")
            }
        }
    }
}

impl std::error::Error for FitError {}

/// Errors surfaced by the calibration orchestrator
#[derive(Debug, Clone)]
pub enum CalibrationError {
    Config(ConfigError),
    Fit(FitError),
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::Config(e) => write!(f, "{e}"),
            CalibrationError::Fit(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CalibrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalibrationError::Config(e) => Some(e),
            CalibrationError::Fit(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CalibrationError {
    fn from(e: ConfigError) -> Self {
        CalibrationError::Config(e)
    }
}

impl From<FitError> for CalibrationError {
    fn from(e: FitError) -> Self {
        CalibrationError::Fit(e)
    }
}
