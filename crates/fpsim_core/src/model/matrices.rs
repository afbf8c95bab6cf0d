//! Method-switching probability matrices
//!
//! Each age bracket carries an annual switching matrix, a 1-6 month
//! postpartum switching matrix, and a 0-1 month postpartum initiation
//! vector. Rows are probability distributions over destination methods; the
//! store validates row-stochasticity once at load time and interventions
//! must preserve it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tolerance for the row-stochastic invariant
pub const ROW_SUM_TOL: f64 = 1e-6;

/// Tolerance accepted for raw input tables, which are typically rounded to a
/// few decimals; rows inside this tolerance are renormalized exactly on load
pub const RAW_SUM_TOL: f64 = 1e-2;

/// Which switching table an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixFamily {
    /// Ordinary (non-postpartum) transitions, evaluated annually
    Annual,
    /// Initiation distribution in the first month postpartum
    Pp0to1,
    /// Transitions during months 1-6 postpartum
    Pp1to6,
}

impl fmt::Display for MatrixFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixFamily::Annual => "annual",
            MatrixFamily::Pp0to1 => "pp0to1",
            MatrixFamily::Pp1to6 => "pp1to6",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MatrixFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(MatrixFamily::Annual),
            "pp0to1" => Ok(MatrixFamily::Pp0to1),
            "pp1to6" => Ok(MatrixFamily::Pp1to6),
            other => Err(ConfigError::MatrixFamilyNotFound(other.to_string())),
        }
    }
}

/// An age bracket `[lo, hi)` used to select a switching matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeBracket {
    pub name: String,
    pub lo: f64,
    pub hi: f64,
}

impl AgeBracket {
    #[must_use]
    pub fn contains(&self, age: f64) -> bool {
        age >= self.lo && age < self.hi
    }
}

/// An `M x M` matrix where row `i` holds the probability of moving from
/// method `i` to method `j` (diagonal = probability of continuing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchingMatrix {
    rows: Vec<Vec<f64>>,
}

impl SwitchingMatrix {
    #[must_use]
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn n(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    #[must_use]
    pub fn row_mut(&mut self, i: usize) -> &mut Vec<f64> {
        &mut self.rows[i]
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.rows
    }

    /// Sum of the entries of row `i`
    #[must_use]
    pub fn row_sum(&self, i: usize) -> f64 {
        self.rows[i].iter().sum()
    }
}

/// Sum of a probability vector
#[must_use]
pub fn vector_sum(v: &[f64]) -> f64 {
    v.iter().sum()
}

/// The per-bracket switching tables for one location.
///
/// Brackets are stored in ascending age order; matrices and vectors are
/// indexed by bracket position. The store is loaded once at configuration
/// time and never mutated in place -- interventions edit the simulation's
/// own deep copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSet {
    brackets: Vec<AgeBracket>,
    annual: Vec<SwitchingMatrix>,
    pp1to6: Vec<SwitchingMatrix>,
    pp0to1: Vec<Vec<f64>>,
}

impl MatrixSet {
    /// Assemble and validate the switching tables.
    ///
    /// `entries` supplies, per bracket in ascending age order: the bracket,
    /// its annual matrix, its 1-6 month postpartum matrix, and its 0-1 month
    /// initiation vector. Raw rows may carry rounding error up to
    /// `RAW_SUM_TOL` and are renormalized exactly; anything worse, or a
    /// dimension mismatch, is a fatal configuration error.
    pub fn new(
        n_methods: usize,
        entries: Vec<(AgeBracket, SwitchingMatrix, SwitchingMatrix, Vec<f64>)>,
    ) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::InvalidParameters {
                reason: "no age brackets supplied".into(),
            });
        }

        let mut brackets = Vec::with_capacity(entries.len());
        let mut annual = Vec::with_capacity(entries.len());
        let mut pp1to6 = Vec::with_capacity(entries.len());
        let mut pp0to1 = Vec::with_capacity(entries.len());

        for (bracket, mut ann, mut pp, mut vec) in entries {
            ingest_matrix(&mut ann, MatrixFamily::Annual, &bracket.name, n_methods)?;
            ingest_matrix(&mut pp, MatrixFamily::Pp1to6, &bracket.name, n_methods)?;
            ingest_vector(&mut vec, &bracket.name, n_methods)?;
            brackets.push(bracket);
            annual.push(ann);
            pp1to6.push(pp);
            pp0to1.push(vec);
        }

        Ok(Self {
            brackets,
            annual,
            pp1to6,
            pp0to1,
        })
    }

    #[must_use]
    pub fn brackets(&self) -> &[AgeBracket] {
        &self.brackets
    }

    #[must_use]
    pub fn n_brackets(&self) -> usize {
        self.brackets.len()
    }

    /// Bracket index for an age. Ages outside every bracket clamp to the
    /// nearest end, so a store covering `[0, 100)` never fails here.
    #[must_use]
    pub fn bracket_for_age(&self, age: f64) -> usize {
        for (i, b) in self.brackets.iter().enumerate() {
            if b.contains(age) {
                return i;
            }
        }
        if age < self.brackets[0].lo {
            0
        } else {
            self.brackets.len() - 1
        }
    }

    /// Resolve a bracket name to its index
    pub fn bracket_index(&self, name: &str) -> Result<usize, ConfigError> {
        self.brackets
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| ConfigError::BracketNotFound(name.to_string()))
    }

    #[must_use]
    pub fn annual(&self, bracket: usize) -> &SwitchingMatrix {
        &self.annual[bracket]
    }

    #[must_use]
    pub fn pp1to6(&self, bracket: usize) -> &SwitchingMatrix {
        &self.pp1to6[bracket]
    }

    #[must_use]
    pub fn pp0to1(&self, bracket: usize) -> &[f64] {
        &self.pp0to1[bracket]
    }

    pub fn matrix_mut(&mut self, family: MatrixFamily, bracket: usize) -> &mut SwitchingMatrix {
        match family {
            MatrixFamily::Annual => &mut self.annual[bracket],
            MatrixFamily::Pp1to6 => &mut self.pp1to6[bracket],
            MatrixFamily::Pp0to1 => unreachable!("pp0to1 is a vector, not a matrix"),
        }
    }

    pub fn vector_mut(&mut self, bracket: usize) -> &mut Vec<f64> {
        &mut self.pp0to1[bracket]
    }

    /// Re-check the row-stochastic invariant for every table.
    ///
    /// Interventions call this after editing so that a bad edit is caught at
    /// the edit site rather than at some later draw.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, bracket) in self.brackets.iter().enumerate() {
            check_rows(&self.annual[i], MatrixFamily::Annual, &bracket.name)?;
            check_rows(&self.pp1to6[i], MatrixFamily::Pp1to6, &bracket.name)?;
            let total = vector_sum(&self.pp0to1[i]);
            if (total - 1.0).abs() > ROW_SUM_TOL {
                return Err(ConfigError::RowNotStochastic {
                    family: MatrixFamily::Pp0to1,
                    bracket: bracket.name.clone(),
                    row: 0,
                    total,
                });
            }
        }
        Ok(())
    }
}

fn ingest_matrix(
    m: &mut SwitchingMatrix,
    family: MatrixFamily,
    bracket: &str,
    n_methods: usize,
) -> Result<(), ConfigError> {
    if m.n() != n_methods || m.rows().iter().any(|r| r.len() != n_methods) {
        let found = m
            .rows()
            .iter()
            .map(Vec::len)
            .chain([m.n()])
            .find(|&len| len != n_methods)
            .unwrap_or(m.n());
        return Err(ConfigError::MatrixShape {
            family,
            bracket: bracket.to_string(),
            expected: n_methods,
            found,
        });
    }
    for i in 0..m.n() {
        ingest_row(m.row_mut(i), family, bracket, i)?;
    }
    Ok(())
}

fn ingest_vector(v: &mut Vec<f64>, bracket: &str, n_methods: usize) -> Result<(), ConfigError> {
    if v.len() != n_methods {
        return Err(ConfigError::MatrixShape {
            family: MatrixFamily::Pp0to1,
            bracket: bracket.to_string(),
            expected: n_methods,
            found: v.len(),
        });
    }
    ingest_row(v, MatrixFamily::Pp0to1, bracket, 0)
}

/// Accept a raw probability row: reject anything beyond rounding error or
/// with a negative entry, then normalize the sum to exactly 1
fn ingest_row(
    row: &mut [f64],
    family: MatrixFamily,
    bracket: &str,
    index: usize,
) -> Result<(), ConfigError> {
    let total: f64 = row.iter().sum();
    if (total - 1.0).abs() > RAW_SUM_TOL || row.iter().any(|&p| p < 0.0) {
        return Err(ConfigError::RowNotStochastic {
            family,
            bracket: bracket.to_string(),
            row: index,
            total,
        });
    }
    for p in row.iter_mut() {
        *p /= total;
    }
    Ok(())
}

fn check_rows(m: &SwitchingMatrix, family: MatrixFamily, bracket: &str) -> Result<(), ConfigError> {
    for i in 0..m.n() {
        let total = m.row_sum(i);
        if (total - 1.0).abs() > ROW_SUM_TOL {
            return Err(ConfigError::RowNotStochastic {
                family,
                bracket: bracket.to_string(),
                row: i,
                total,
            });
        }
    }
    Ok(())
}
