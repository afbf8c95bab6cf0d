//! Core simulation mechanics
//!
//! These tests verify that:
//! - A run completes with consistent channel lengths
//! - The population evolves (births and deaths occur)
//! - Identical seeds reproduce identical trajectories
//! - Different seeds diverge
//! - Unknown locations are rejected

use crate::locations;
use crate::model::Sex;
use crate::simulation::Sim;

#[test]
fn test_run_completes() {
    let pars = locations::make_pars("test").unwrap();
    let n_steps = pars.n_steps();
    let result = Sim::new(pars, vec![]).unwrap().run().unwrap();

    assert_eq!(result.t.len(), n_steps);
    assert_eq!(result.births.len(), n_steps);
    assert_eq!(result.deaths.len(), n_steps);
    assert_eq!(result.mcpr.len(), n_steps);
    assert_eq!(result.tfr_years.len(), n_steps / 12);
    assert_eq!(result.pop_size.len(), n_steps / 12);
    assert!(!result.people.is_empty());
}

#[test]
fn test_population_evolves() {
    let pars = locations::make_pars("test").unwrap().with_n_agents(1_000);
    let result = Sim::new(pars, vec![]).unwrap().run().unwrap();

    assert!(result.total_births() > 0, "expected births over a decade");
    let total_deaths: u32 = result.deaths.iter().sum();
    assert!(total_deaths > 0, "expected deaths over a decade");

    // Some women should have picked up a method through switching
    let users = result
        .people
        .iter()
        .filter(|p| p.alive && p.sex == Sex::Female && p.method.index() != 0)
        .count();
    assert!(users > 0, "expected some method uptake");
}

#[test]
fn test_deterministic_replay() {
    let pars = locations::make_pars("test").unwrap().with_seed(7);
    let a = Sim::new(pars.clone(), vec![]).unwrap().run().unwrap();
    let b = Sim::new(pars, vec![]).unwrap().run().unwrap();

    assert_eq!(a.births, b.births);
    assert_eq!(a.deaths, b.deaths);
    assert_eq!(a.mcpr, b.mcpr);
    assert_eq!(a.pop_size, b.pop_size);
    for (pa, pb) in a.people.iter().zip(&b.people) {
        assert_eq!(pa.method, pb.method);
        assert_eq!(pa.parity, pb.parity);
        assert_eq!(pa.dobs, pb.dobs);
    }
}

#[test]
fn test_seeds_diverge() {
    let pars = locations::make_pars("test").unwrap();
    let a = Sim::new(pars.clone().with_seed(1), vec![])
        .unwrap()
        .run()
        .unwrap();
    let b = Sim::new(pars.with_seed(2), vec![]).unwrap().run().unwrap();
    assert_ne!(a.births, b.births, "different seeds should diverge");
}

#[test]
fn test_unknown_location_rejected() {
    assert!(locations::make_pars("atlantis").is_err());
}

#[test]
fn test_kenya_parameters_load() {
    let pars = locations::make_pars("kenya").unwrap();
    assert_eq!(pars.methods.table.len(), 10);
    assert_eq!(pars.methods.matrices.n_brackets(), 5);
    pars.validate().unwrap();
}

#[test]
fn test_invalid_config_rejected() {
    let mut pars = locations::make_pars("test").unwrap();
    pars.end_year = pars.start_year;
    assert!(Sim::new(pars, vec![]).is_err());

    let mut pars = locations::make_pars("test").unwrap();
    pars.n_agents = 0;
    assert!(Sim::new(pars, vec![]).is_err());
}
