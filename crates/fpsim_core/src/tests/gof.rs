//! Goodness-of-fit options

use crate::calibration::{Estimator, GofOptions, GofValue, Scalarize, compute_gof};

#[test]
fn test_identical_series_give_zero() {
    let x = [1.0, 2.5, 7.0, 0.0, -3.0];
    let options = GofOptions {
        as_scalar: Scalarize::Sum,
        ..Default::default()
    };
    let gof = compute_gof(&x, &x, &options).unwrap();
    assert_eq!(gof, GofValue::Scalar(0.0));
}

#[test]
fn test_unnormalized_mean_absolute_error() {
    let options = GofOptions {
        normalize: false,
        as_scalar: Scalarize::Mean,
        ..Default::default()
    };
    let gof = compute_gof(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0], &options).unwrap();
    assert_eq!(gof, GofValue::Scalar(1.0));
}

#[test]
fn test_normalization_divides_by_actual_max() {
    let gof = compute_gof(&[0.0, 10.0], &[5.0, 10.0], &GofOptions::default()).unwrap();
    assert_eq!(gof, GofValue::Series(vec![0.5, 0.0]));
}

#[test]
fn test_zero_actual_max_skips_normalization() {
    // All-zero actual would divide by zero; normalization is skipped
    let gof = compute_gof(&[0.0, 0.0], &[2.0, 4.0], &GofOptions::default()).unwrap();
    assert_eq!(gof, GofValue::Series(vec![2.0, 4.0]));
}

#[test]
fn test_use_frac_takes_precedence() {
    let options = GofOptions {
        normalize: true,
        use_frac: true,
        eps: 0.0,
        ..Default::default()
    };
    let gof = compute_gof(&[2.0, 4.0], &[4.0, 4.0], &options).unwrap();
    match gof {
        GofValue::Series(s) => {
            assert!((s[0] - 0.5).abs() < 1e-12);
            assert!(s[1].abs() < 1e-12);
        }
        GofValue::Scalar(_) => panic!("expected a series"),
    }
}

#[test]
fn test_use_frac_negative_inputs_fall_back() {
    // Negative values make fractional error ill-defined; the unscaled
    // differences come back instead of a failure
    let options = GofOptions {
        normalize: false,
        use_frac: true,
        ..Default::default()
    };
    let gof = compute_gof(&[-1.0, 2.0], &[1.0, 2.0], &options).unwrap();
    assert_eq!(gof, GofValue::Series(vec![2.0, 0.0]));
}

#[test]
fn test_use_squared() {
    let options = GofOptions {
        normalize: false,
        use_squared: true,
        as_scalar: Scalarize::Mean,
        ..Default::default()
    };
    let gof = compute_gof(&[0.0, 0.0], &[1.0, 3.0], &options).unwrap();
    assert_eq!(gof, GofValue::Scalar(5.0));
}

#[test]
fn test_median_reduction() {
    let options = GofOptions {
        normalize: false,
        as_scalar: Scalarize::Median,
        ..Default::default()
    };
    let gof = compute_gof(&[0.0, 0.0, 0.0], &[1.0, 2.0, 9.0], &options).unwrap();
    assert_eq!(gof, GofValue::Scalar(2.0));
}

#[test]
fn test_estimator_overrides_options() {
    // The estimator ignores normalize/use_squared entirely
    let options = GofOptions {
        normalize: true,
        use_squared: true,
        estimator: Some(Estimator::MeanSquaredError),
        ..Default::default()
    };
    let gof = compute_gof(&[0.0, 0.0], &[1.0, 3.0], &options).unwrap();
    assert_eq!(gof, GofValue::Scalar(5.0));
}

#[test]
fn test_estimator_lookup() {
    assert_eq!(
        "mean_squared_error".parse::<Estimator>().unwrap(),
        Estimator::MeanSquaredError
    );
    assert!("not_an_estimator".parse::<Estimator>().is_err());
}

#[test]
fn test_length_mismatch_rejected() {
    let result = compute_gof(&[1.0, 2.0], &[1.0], &GofOptions::default());
    assert!(result.is_err());
}
