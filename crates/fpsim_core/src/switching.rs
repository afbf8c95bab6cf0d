//! Per-agent method-switching checkpoints
//!
//! At a checkpoint an agent samples her next method from the appropriate
//! trended probability row: the postpartum initiation vector in month 0, the
//! 1-6 month postpartum matrix row for her current method, or the annual
//! matrix row otherwise. Sampling is a single uniform draw inverted through
//! the row's cumulative distribution.
//!
//! A trended row that does not sum to 1 within tolerance is a fatal
//! configuration error at the draw site: renormalizing here would mask a bad
//! scenario edit upstream.

use rand::Rng;

use crate::config::MethodConfig;
use crate::error::ConfigError;
use crate::model::{
    MatrixFamily, MethodId, Person, PostpartumPhase, ROW_SUM_TOL, SwitchingMatrix,
};

/// Draw an index from normalized weights with a single uniform draw,
/// inverted through the running cumulative sum. The caller guarantees the
/// weights form a distribution.
#[must_use]
pub fn sample_weights<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    let u = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut chosen = weights.len() - 1;
    for (j, &p) in weights.iter().enumerate() {
        cumulative += p;
        if u < cumulative {
            chosen = j;
            break;
        }
    }
    chosen
}

/// Sample an index from a probability row by inverse-CDF search.
///
/// Verifies the row-stochastic invariant first; the extra context arguments
/// only feed the error message.
pub fn sample_categorical<R: Rng + ?Sized>(
    row: &[f64],
    family: MatrixFamily,
    bracket: &str,
    row_index: usize,
    rng: &mut R,
) -> Result<usize, ConfigError> {
    let total: f64 = row.iter().sum();
    if (total - 1.0).abs() > ROW_SUM_TOL {
        return Err(ConfigError::RowNotStochastic {
            family,
            bracket: bracket.to_string(),
            row: row_index,
            total,
        });
    }
    Ok(sample_weights(row, rng))
}

/// The trended switching tables for one simulated year.
///
/// Built fresh at each step that contains a checkpoint, so mid-run edits to
/// the trend or the raw matrices take effect immediately; rows are shared
/// read-only across the whole agent loop.
#[derive(Debug)]
pub struct MethodSwitcher {
    annual: Vec<SwitchingMatrix>,
    pp1to6: Vec<SwitchingMatrix>,
    pp0to1: Vec<Vec<f64>>,
    bracket_names: Vec<String>,
}

impl MethodSwitcher {
    /// Trend every table for `year`.
    ///
    /// The raw tables are re-validated first: trending rebalances the
    /// "None" column, which would otherwise paper over a corrupted row.
    pub fn new(methods: &MethodConfig, year: f64) -> Result<Self, ConfigError> {
        methods.matrices.validate()?;
        let n = methods.matrices.n_brackets();
        let mut annual = Vec::with_capacity(n);
        let mut pp1to6 = Vec::with_capacity(n);
        let mut pp0to1 = Vec::with_capacity(n);
        for b in 0..n {
            annual.push(methods.trend.trended_matrix(methods.matrices.annual(b), year));
            pp1to6.push(methods.trend.trended_matrix(methods.matrices.pp1to6(b), year));
            pp0to1.push(methods.trend.trended_vector(methods.matrices.pp0to1(b), year));
        }
        Ok(Self {
            annual,
            pp1to6,
            pp0to1,
            bracket_names: methods
                .matrices
                .brackets()
                .iter()
                .map(|b| b.name.clone())
                .collect(),
        })
    }

    /// Run one switching checkpoint for `person`, mutating her method.
    ///
    /// `bracket` is her age-bracket index; the matrix family follows her
    /// postpartum phase.
    pub fn checkpoint<R: Rng + ?Sized>(
        &self,
        person: &mut Person,
        bracket: usize,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        let name = &self.bracket_names[bracket];
        let current = person.method.index();

        let new = match person.postpartum_phase() {
            PostpartumPhase::Month0 => sample_categorical(
                &self.pp0to1[bracket],
                MatrixFamily::Pp0to1,
                name,
                0,
                rng,
            )?,
            PostpartumPhase::Month1to6 => sample_categorical(
                self.pp1to6[bracket].row(current),
                MatrixFamily::Pp1to6,
                name,
                current,
                rng,
            )?,
            PostpartumPhase::None | PostpartumPhase::Later => sample_categorical(
                self.annual[bracket].row(current),
                MatrixFamily::Annual,
                name,
                current,
                rng,
            )?,
        };

        person.method = MethodId(new as u8);
        Ok(())
    }
}
