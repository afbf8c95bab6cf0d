//! Orchestrated data/model comparison

use crate::calibration::{
    CalibFlags, Calibration, CalibrationData, FitConfig, GofOptions,
};
use crate::locations;

/// Reference data shaped like the test location's output; the pop series is
/// in raw census units to exercise agent-count rescaling
fn reference_data() -> CalibrationData {
    CalibrationData {
        pop_years: vec![2001.0, 2003.0, 2005.0, 2007.0, 2009.0],
        pop_size: vec![1_000_000.0, 1_030_000.0, 1_061_000.0, 1_093_000.0, 1_125_000.0],
        mcpr_years: vec![2002.0, 2005.0, 2008.0],
        mcpr: vec![10.0, 12.0, 14.0],
        method_counts: vec![0.85, 0.10, 0.05],
        spacing_bins: vec![10.0, 40.0, 35.0, 15.0],
        spacing_stats: vec![1.5, 2.5, 4.0],
        age_first_stats: vec![18.0, 20.0, 23.0],
        age_pregnant_stats: vec![20.0, 25.0, 31.0],
        skyscrapers: vec![2.0; 49],
    }
}

#[test]
fn test_calibration_produces_matching_keys() {
    let pars = locations::make_pars("test").unwrap();
    let calib = Calibration::new(pars, reference_data(), CalibFlags::default());
    let results = calib.run().unwrap();

    let mut data_keys: Vec<&String> = results.data.keys().collect();
    let mut model_keys: Vec<&String> = results.model.keys().collect();
    data_keys.sort();
    model_keys.sort();
    assert_eq!(data_keys, model_keys);
    assert_eq!(results.records.len(), results.data.len());

    // Every flagged group landed
    for key in [
        "pop_size",
        "pop_growth_rate",
        "mcpr",
        "method_counts",
        "spacing_bins",
        "spacing_stats",
        "age_first_stats",
        "age_pregnant_stats",
        "skyscrapers",
    ] {
        assert!(results.data.contains_key(key), "missing {key}");
    }
}

#[test]
fn test_flags_gate_statistic_groups() {
    let pars = locations::make_pars("test").unwrap();
    let flags = CalibFlags {
        popsize: false,
        skyscrapers: false,
        birth_space: false,
        age_pregnancy: false,
        ..Default::default()
    };
    let results = Calibration::new(pars, reference_data(), flags)
        .run()
        .unwrap();

    assert!(results.data.contains_key("mcpr"));
    assert!(results.data.contains_key("method_counts"));
    assert!(!results.data.contains_key("pop_size"));
    assert!(!results.data.contains_key("skyscrapers"));
    assert!(!results.data.contains_key("spacing_bins"));
}

#[test]
fn test_popsize_rescaled_to_agents() {
    let pars = locations::make_pars("test").unwrap();
    let results = Calibration::new(pars, reference_data(), CalibFlags::default())
        .run()
        .unwrap();

    // The first rescaled data point equals the model's population there
    let data_pop = &results.data["pop_size"];
    let model_pop = &results.model["pop_size"];
    assert_eq!(data_pop.len(), model_pop.len());
    assert!((data_pop[0] - model_pop[0]).abs() < 1e-9);
    // Rescaling preserves relative growth
    assert!((data_pop[1] / data_pop[0] - 1.03).abs() < 1e-9);
}

#[test]
fn test_mcpr_compared_at_data_years_in_percent() {
    let pars = locations::make_pars("test").unwrap();
    let results = Calibration::new(pars, reference_data(), CalibFlags::default())
        .run()
        .unwrap();
    let model_mcpr = &results.model["mcpr"];
    assert_eq!(model_mcpr.len(), 3);
    assert!(model_mcpr.iter().all(|&v| (0.0..=100.0).contains(&v)));
}

#[test]
fn test_method_mix_is_a_distribution() {
    let pars = locations::make_pars("test").unwrap();
    let results = Calibration::new(pars, reference_data(), CalibFlags::default())
        .run()
        .unwrap();
    let mix = &results.model["method_counts"];
    assert_eq!(mix.len(), 3);
    assert!((mix.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

#[test]
fn test_quartiles_are_ordered() {
    let pars = locations::make_pars("test").unwrap().with_n_agents(1_500);
    let results = Calibration::new(pars, reference_data(), CalibFlags::default())
        .run()
        .unwrap();
    for key in ["spacing_stats", "age_first_stats", "age_pregnant_stats"] {
        let q = &results.model[key];
        assert_eq!(q.len(), 3, "{key}");
        assert!(q[0] <= q[1] && q[1] <= q[2], "{key} quartiles out of order");
    }
}

#[test]
fn test_fit_scores_calibration_output() {
    let pars = locations::make_pars("test").unwrap();
    let results = Calibration::new(pars, reference_data(), CalibFlags::default())
        .run()
        .unwrap();

    let fit = results
        .compute_fit(FitConfig {
            gof: GofOptions::default(),
            ..Default::default()
        })
        .unwrap();

    assert!(fit.mismatch.is_finite());
    assert!(fit.mismatch > 0.0, "a real run never matches survey data exactly");
    assert_eq!(fit.keys.len(), results.data.len());
}

#[test]
fn test_fit_is_deterministic_across_runs() {
    let pars = locations::make_pars("test").unwrap().with_seed(3);
    let run = |pars| {
        Calibration::new(pars, reference_data(), CalibFlags::default())
            .run()
            .unwrap()
            .compute_fit(FitConfig::default())
            .unwrap()
            .mismatch
    };
    assert_eq!(run(pars.clone()), run(pars));
}
