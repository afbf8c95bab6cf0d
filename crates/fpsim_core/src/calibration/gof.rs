//! Goodness-of-fit between paired series
//!
//! `compute_gof` turns an (actual, predicted) pair into elementwise
//! discrepancies or a single scalar. The default is normalized absolute
//! error; the options compose into most of the usual estimators (mean
//! squared error is `normalize=false, use_squared=true, as_scalar=Mean`),
//! and a named-estimator escape hatch bypasses the manual formula entirely.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::stats;

/// How to reduce the elementwise series to a scalar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalarize {
    #[default]
    None,
    Sum,
    Mean,
    Median,
}

/// Built-in named estimators, standing in for an external statistics
/// library. When one is selected every other option is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estimator {
    MeanSquaredError,
    MeanAbsoluteError,
    MedianAbsoluteError,
    MaxError,
}

impl FromStr for Estimator {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean_squared_error" => Ok(Estimator::MeanSquaredError),
            "mean_absolute_error" => Ok(Estimator::MeanAbsoluteError),
            "median_absolute_error" => Ok(Estimator::MedianAbsoluteError),
            "max_error" => Ok(Estimator::MaxError),
            other => Err(FitError::EstimatorNotFound(other.to_string())),
        }
    }
}

impl Estimator {
    fn compute(self, actual: &[f64], predicted: &[f64]) -> f64 {
        let abs_diffs: Vec<f64> = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).abs())
            .collect();
        match self {
            Estimator::MeanSquaredError => {
                stats::mean(&abs_diffs.iter().map(|d| d * d).collect::<Vec<_>>())
            }
            Estimator::MeanAbsoluteError => stats::mean(&abs_diffs),
            Estimator::MedianAbsoluteError => stats::median(&abs_diffs),
            Estimator::MaxError => abs_diffs.iter().copied().fold(0.0, f64::max),
        }
    }
}

/// Options controlling `compute_gof`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GofOptions {
    /// Divide absolute differences by `max(|actual|)` (skipped when that
    /// max is zero)
    pub normalize: bool,
    /// Divide by `max(actual, predicted) + eps` instead; takes precedence
    /// over `normalize`
    pub use_frac: bool,
    /// Square the (scaled) differences
    pub use_squared: bool,
    pub as_scalar: Scalarize,
    /// Stabilizer for the fractional-error denominator
    pub eps: f64,
    /// Delegate to a named estimator, ignoring every option above
    pub estimator: Option<Estimator>,
}

impl Default for GofOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            use_frac: false,
            use_squared: false,
            as_scalar: Scalarize::None,
            eps: 1e-9,
            estimator: None,
        }
    }
}

/// Elementwise series or reduced scalar, per `Scalarize`
#[derive(Debug, Clone, PartialEq)]
pub enum GofValue {
    Series(Vec<f64>),
    Scalar(f64),
}

impl GofValue {
    /// The scalar value, or the series summed if no reduction was requested
    #[must_use]
    pub fn scalar(&self) -> f64 {
        match self {
            GofValue::Scalar(v) => *v,
            GofValue::Series(s) => s.iter().sum(),
        }
    }

    /// The elementwise series, broadcasting a scalar to length one
    #[must_use]
    pub fn into_series(self) -> Vec<f64> {
        match self {
            GofValue::Series(s) => s,
            GofValue::Scalar(v) => vec![v],
        }
    }
}

/// Calculate the goodness of fit between `actual` (data) and `predicted`
/// (model) series of equal length.
pub fn compute_gof(
    actual: &[f64],
    predicted: &[f64],
    options: &GofOptions,
) -> Result<GofValue, FitError> {
    if actual.len() != predicted.len() {
        return Err(FitError::SeriesLengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }

    if let Some(estimator) = options.estimator {
        return Ok(GofValue::Scalar(estimator.compute(actual, predicted)));
    }

    let mut gofs: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .collect();

    if options.normalize && !options.use_frac {
        let actual_max = actual.iter().fold(0.0_f64, |m, a| m.max(a.abs()));
        if actual_max > 0.0 {
            for g in &mut gofs {
                *g /= actual_max;
            }
        }
    }

    if options.use_frac {
        if actual.iter().any(|&a| a < 0.0) || predicted.iter().any(|&p| p < 0.0) {
            // Fractional error is ill-defined for negative values; fall back
            // to the unscaled differences rather than fail
            tracing::warn!("fractional errors requested for non-positive series");
        } else {
            for (g, (a, p)) in gofs.iter_mut().zip(actual.iter().zip(predicted)) {
                *g /= a.max(*p) + options.eps;
            }
        }
    }

    if options.use_squared {
        for g in &mut gofs {
            *g *= *g;
        }
    }

    Ok(match options.as_scalar {
        Scalarize::None => GofValue::Series(gofs),
        Scalarize::Sum => GofValue::Scalar(gofs.iter().sum()),
        Scalarize::Mean => GofValue::Scalar(stats::mean(&gofs)),
        Scalarize::Median => GofValue::Scalar(stats::median(&gofs)),
    })
}
