//! Pairing, weighting, and mismatch computation

use rustc_hash::FxHashMap;

use crate::calibration::{CustomComparison, Fit, FitConfig, GofOptions, Weight};

fn series(entries: &[(&str, &[f64])]) -> FxHashMap<String, Vec<f64>> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.to_vec()))
        .collect()
}

fn plain_gof() -> GofOptions {
    GofOptions {
        normalize: false,
        ..Default::default()
    }
}

#[test]
fn test_perfect_fit_is_zero() {
    let data = series(&[("mcpr", &[10.0, 20.0, 30.0]), ("pop_size", &[5.0, 6.0])]);
    let fit = Fit::new(&data, &data.clone(), FitConfig::default()).unwrap();
    assert_eq!(fit.mismatch, 0.0);
    assert_eq!(fit.keys, vec!["mcpr", "pop_size"]);
}

#[test]
fn test_missing_requested_key_fails_fast() {
    let data = series(&[("mcpr", &[10.0])]);
    let sim = series(&[("mcpr", &[12.0])]);
    let config = FitConfig {
        keys: Some(vec!["mcpr".into(), "not_present".into()]),
        ..Default::default()
    };
    assert!(Fit::new(&data, &sim, config).is_err());
}

#[test]
fn test_keys_intersect_by_default() {
    let data = series(&[("mcpr", &[1.0]), ("data_only", &[1.0])]);
    let sim = series(&[("mcpr", &[1.0]), ("sim_only", &[1.0])]);
    let fit = Fit::new(&data, &sim, FitConfig::default()).unwrap();
    assert_eq!(fit.keys, vec!["mcpr"]);
}

#[test]
fn test_nonfinite_data_points_are_skipped() {
    let data = series(&[("mcpr", &[1.0, f64::NAN, 3.0, f64::INFINITY, 5.0])]);
    let sim = series(&[("mcpr", &[1.0, 2.0, 3.0, 4.0, 9.0])]);
    let config = FitConfig {
        gof: plain_gof(),
        ..Default::default()
    };
    let fit = Fit::new(&data, &sim, config).unwrap();

    let (paired_sim, paired_data) = fit.pair("mcpr").unwrap();
    assert_eq!(paired_sim, &[1.0, 3.0, 9.0]);
    assert_eq!(paired_data, &[1.0, 3.0, 5.0]);
    assert_eq!(fit.mismatch, 4.0);
}

#[test]
fn test_scalar_weight_broadcasts() {
    let data = series(&[("a", &[0.0, 0.0]), ("b", &[0.0, 0.0])]);
    let sim = series(&[("a", &[1.0, 1.0]), ("b", &[1.0, 1.0])]);
    let mut weights = FxHashMap::default();
    weights.insert("a".to_string(), Weight::Scalar(10.0));
    let config = FitConfig {
        weights,
        gof: plain_gof(),
        ..Default::default()
    };
    let fit = Fit::new(&data, &sim, config).unwrap();
    assert_eq!(fit.mismatches["a"], 20.0);
    assert_eq!(fit.mismatches["b"], 2.0);
    assert_eq!(fit.mismatch, 22.0);
}

#[test]
fn test_array_weight_slices_to_matched_indices() {
    // Weight spans the full series; the NaN'd index must be sliced away
    let data = series(&[("a", &[0.0, f64::NAN, 0.0])]);
    let sim = series(&[("a", &[1.0, 1.0, 1.0])]);
    let mut weights = FxHashMap::default();
    weights.insert("a".to_string(), Weight::Array(vec![2.0, 100.0, 3.0]));
    let config = FitConfig {
        weights,
        gof: plain_gof(),
        ..Default::default()
    };
    let fit = Fit::new(&data, &sim, config).unwrap();
    assert_eq!(fit.losses["a"], vec![2.0, 3.0]);
}

#[test]
fn test_bad_weight_length_rejected() {
    let data = series(&[("a", &[0.0, 0.0])]);
    let sim = series(&[("a", &[1.0, 1.0])]);
    let mut weights = FxHashMap::default();
    weights.insert("a".to_string(), Weight::Array(vec![1.0, 2.0, 3.0, 4.0]));
    let config = FitConfig {
        weights,
        ..Default::default()
    };
    assert!(Fit::new(&data, &sim, config).is_err());
}

#[test]
fn test_custom_comparisons() {
    let data = series(&[("a", &[0.0])]);
    let sim = series(&[("a", &[0.0])]);
    let mut custom = FxHashMap::default();
    custom.insert(
        "extra".to_string(),
        CustomComparison {
            sim: vec![1.0, 2.0],
            data: vec![0.0, 0.0],
            weight: Weight::Scalar(2.0),
        },
    );
    let config = FitConfig {
        custom,
        gof: plain_gof(),
        ..Default::default()
    };
    let fit = Fit::new(&data, &sim, config).unwrap();
    assert_eq!(fit.custom_keys, vec!["extra"]);
    assert_eq!(fit.mismatches["extra"], 6.0);
}

#[test]
fn test_custom_key_collision_rejected() {
    let data = series(&[("a", &[0.0])]);
    let sim = series(&[("a", &[0.0])]);
    let mut custom = FxHashMap::default();
    custom.insert(
        "a".to_string(),
        CustomComparison {
            sim: vec![1.0],
            data: vec![0.0],
            weight: Weight::Scalar(1.0),
        },
    );
    let config = FitConfig {
        custom,
        ..Default::default()
    };
    assert!(Fit::new(&data, &sim, config).is_err());
}

#[test]
fn test_custom_length_mismatch_rejected() {
    let data = series(&[("a", &[0.0])]);
    let sim = series(&[("a", &[0.0])]);
    let mut custom = FxHashMap::default();
    custom.insert(
        "extra".to_string(),
        CustomComparison {
            sim: vec![1.0, 2.0],
            data: vec![0.0],
            weight: Weight::Scalar(1.0),
        },
    );
    let config = FitConfig {
        custom,
        ..Default::default()
    };
    assert!(Fit::new(&data, &sim, config).is_err());
}

#[test]
fn test_median_mismatch_reduction() {
    let data = series(&[("a", &[0.0, 0.0, 0.0])]);
    let sim = series(&[("a", &[1.0, 2.0, 9.0])]);
    let config = FitConfig {
        gof: plain_gof(),
        use_median: true,
        ..Default::default()
    };
    let fit = Fit::new(&data, &sim, config).unwrap();
    assert_eq!(fit.mismatch, 2.0);
}
