//! Minimal synthetic location for fast runs and regression tests
//!
//! Three methods (`None`, `A`, `B`), a single age bracket, a flat trend, and
//! simplified demographic tables. Small enough that every probability can be
//! checked by hand.

use crate::config::{DebutAgeDist, MethodConfig, SimulationConfig};
use crate::error::ConfigError;
use crate::interp::InterpTable;
use crate::model::{AgeBracket, MatrixSet, MethodTable, SwitchingMatrix};
use crate::trend::McprTrend;

/// Build the synthetic test configuration
pub fn make_pars() -> Result<SimulationConfig, ConfigError> {
    let table = MethodTable::new(&[
        ("None", false, 0.0),
        ("A", true, 0.95),
        ("B", false, 0.80),
    ])?;

    let annual = SwitchingMatrix::new(vec![
        vec![0.90, 0.05, 0.05],
        vec![0.10, 0.80, 0.10],
        vec![0.10, 0.10, 0.80],
    ]);
    let pp1to6 = SwitchingMatrix::new(vec![
        vec![0.80, 0.15, 0.05],
        vec![0.05, 0.90, 0.05],
        vec![0.05, 0.10, 0.85],
    ]);
    let pp0to1 = vec![0.85, 0.10, 0.05];

    let bracket = AgeBracket {
        name: "all".into(),
        lo: 0.0,
        hi: 100.0,
    };
    let matrices = MatrixSet::new(table.len(), vec![(bracket, annual, pp1to6, pp0to1)])?;

    // Flat trend so matrices pass through unchanged at every year
    let trend = McprTrend::new(
        vec![2000.0, 2010.0],
        vec![0.15, 0.15],
        0.0,
        0.90,
        2010.0,
    )?;

    Ok(SimulationConfig {
        location: "test".into(),
        n_agents: 500,
        start_year: 2000,
        end_year: 2010,
        seed: 1,
        switch_frequency: 12,

        method_age: 15.0,
        age_limit_fecundity: 50.0,
        max_age: 99.0,

        preg_dur_low: 9,
        preg_dur_high: 9,
        end_first_tri: 3,
        postpartum_dur: 23,
        max_lam_dur: 5,

        twins_prob: 0.015,
        lam_efficacy: 0.98,

        fecundity_var_low: 0.7,
        fecundity_var_high: 1.1,
        primary_infertility: 0.05,
        exposure_factor: 1.0,

        age_pyramid: vec![
            (0.0, 100.0, 100.0),
            (10.0, 90.0, 90.0),
            (20.0, 80.0, 80.0),
            (30.0, 70.0, 70.0),
            (40.0, 60.0, 60.0),
            (50.0, 40.0, 40.0),
            (60.0, 20.0, 20.0),
        ],
        mortality: InterpTable::new(
            vec![0.0, 15.0, 50.0, 70.0, 99.0],
            vec![0.02, 0.002, 0.006, 0.05, 0.3],
        )?,
        fecundity: InterpTable::new(
            vec![0.0, 10.0, 15.0, 25.0, 40.0, 45.0, 50.0],
            vec![0.0, 0.0, 0.65, 0.79, 0.55, 0.08, 0.0],
        )?,
        fecundity_ratio_nullip: InterpTable::new(vec![0.0, 50.0], vec![1.0, 1.0])?,
        sexual_activity: InterpTable::new(
            vec![0.0, 10.0, 15.0, 20.0, 30.0, 50.0],
            vec![0.0, 0.0, 0.3, 0.55, 0.7, 0.57],
        )?,
        miscarriage: InterpTable::new(
            vec![0.0, 15.0, 25.0, 40.0, 50.0],
            vec![0.5, 0.17, 0.10, 0.33, 0.57],
        )?,
        debut_age: DebutAgeDist {
            ages: vec![14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0],
            probs: vec![0.05, 0.15, 0.25, 0.25, 0.15, 0.10, 0.05],
        },

        methods: MethodConfig {
            table,
            matrices,
            trend,
        },
    })
}
