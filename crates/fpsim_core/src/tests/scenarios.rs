//! Repeated labelled scenario runs

use crate::interventions::{ProbEdit, ScenarioSpec, ValueSpec};
use crate::locations;
use crate::scenarios::Scenarios;

fn uptake_scenario(value: f64) -> ScenarioSpec {
    ScenarioSpec {
        probs: Some(vec![ProbEdit {
            source: "None".into(),
            dest: "A".into(),
            factor: None,
            value: Some(ValueSpec::Const(value)),
            keys: Default::default(),
        }]),
        ..Default::default()
    }
}

#[test]
fn test_no_scenarios_is_an_error() {
    let pars = locations::make_pars("test").unwrap();
    let scens = Scenarios::new(pars, 2, Some(2005.0));
    assert!(scens.run().is_err());
}

#[test]
fn test_missing_year_is_an_error() {
    let pars = locations::make_pars("test").unwrap();
    let mut scens = Scenarios::new(pars, 1, None);
    scens.add_scen(uptake_scenario(0.5), Some("uptake"));
    assert!(scens.run().is_err());
}

#[test]
fn test_scenarios_run_with_repeats() {
    let pars = locations::make_pars("test").unwrap().with_n_agents(300);
    let mut scens = Scenarios::new(pars, 3, Some(2004.0));
    scens.add_scen(ScenarioSpec::default(), Some("baseline"));
    scens.add_scen(uptake_scenario(0.8), Some("high_uptake"));

    let results = scens.run().unwrap();
    assert_eq!(results.runs.len(), 2);
    assert_eq!(results.runs[0].0, "baseline");
    assert_eq!(results.runs[0].1.len(), 3);
    assert_eq!(results.runs[1].0, "high_uptake");

    // Replicates differ by seed only
    let seeds: Vec<u64> = results.runs[0].1.iter().map(|r| r.seed).collect();
    assert_eq!(seeds.len(), 3);
    assert!(seeds.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn test_analysis_window_summaries() {
    let pars = locations::make_pars("test").unwrap().with_n_agents(400);
    let mut scens = Scenarios::new(pars, 2, Some(2003.0));
    scens.add_scen(ScenarioSpec::default(), Some("baseline"));
    scens.add_scen(uptake_scenario(0.8), Some("high_uptake"));

    let results = scens.run().unwrap();
    let summaries = results.analyze(2004.0, 2010.0);
    assert_eq!(summaries.len(), 2);

    let baseline = &summaries[0];
    let uptake = &summaries[1];
    assert_eq!(baseline.label, "baseline");
    assert!(baseline.births.mean > 0.0);
    assert!(baseline.births.min <= baseline.births.mean);
    assert!(baseline.births.mean <= baseline.births.max);
    assert!(
        uptake.births.mean < baseline.births.mean,
        "pushing non-users onto an effective method should cut births"
    );
}

#[test]
fn test_scenarios_are_reproducible() {
    let run_once = || {
        let pars = locations::make_pars("test").unwrap().with_n_agents(200);
        let mut scens = Scenarios::new(pars, 2, Some(2004.0));
        scens.add_scen(uptake_scenario(0.6), Some("uptake"));
        let results = scens.run().unwrap();
        results.runs[0]
            .1
            .iter()
            .map(|r| r.total_births())
            .collect::<Vec<_>>()
    };
    assert_eq!(run_once(), run_once());
}

#[test]
fn test_scenario_label_fallbacks() {
    let pars = locations::make_pars("test").unwrap();
    let mut scens = Scenarios::new(pars, 1, Some(2004.0));
    scens.add_scen(
        ScenarioSpec {
            label: Some("from_spec".into()),
            ..Default::default()
        },
        None,
    );
    scens.add_scen(ScenarioSpec::default(), None);
    let results = scens.run().unwrap();
    assert_eq!(results.runs[0].0, "from_spec");
    assert_eq!(results.runs[1].0, "scenario_1");
}
