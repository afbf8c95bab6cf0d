//! MCPR trend factors and matrix trending

use crate::model::SwitchingMatrix;
use crate::trend::McprTrend;

fn trend() -> McprTrend {
    McprTrend::new(
        vec![2000.0, 2010.0, 2020.0],
        vec![0.10, 0.20, 0.40],
        0.02,
        0.90,
        2020.0,
    )
    .unwrap()
}

#[test]
fn test_factor_is_one_at_norm_year() {
    let t = trend();
    assert!((t.factor(2020.0) - 1.0).abs() < 1e-12);
}

#[test]
fn test_rate_interpolates() {
    let t = trend();
    assert!((t.rate_at(2005.0) - 0.15).abs() < 1e-12);
    assert!((t.rate_at(2015.0) - 0.30).abs() < 1e-12);
    // Clamped below the data range
    assert!((t.rate_at(1990.0) - 0.10).abs() < 1e-12);
}

#[test]
fn test_rate_extrapolates_with_growth() {
    let t = trend();
    let expected = 0.40 * 1.02_f64.powf(5.0);
    assert!((t.rate_at(2025.0) - expected).abs() < 1e-12);
}

#[test]
fn test_ceiling_clamps_extrapolation() {
    let t = McprTrend::new(
        vec![2000.0, 2010.0],
        vec![0.50, 0.80],
        0.10,
        0.90,
        2010.0,
    )
    .unwrap();
    // 0.8 * 1.1^10 would exceed 2; the ceiling holds it at 0.9
    assert!((t.rate_at(2040.0) - 0.90).abs() < 1e-12);
}

#[test]
fn test_trended_rows_remain_stochastic() {
    let t = trend();
    let raw = SwitchingMatrix::new(vec![
        vec![0.90, 0.05, 0.05],
        vec![0.10, 0.80, 0.10],
        vec![0.10, 0.10, 0.80],
    ]);
    for year in [2000.0, 2005.0, 2014.0, 2020.0, 2030.0] {
        let m = t.trended_matrix(&raw, year);
        for i in 0..m.n() {
            let total = m.row_sum(i);
            assert!(
                (total - 1.0).abs() < 1e-9,
                "year {year} row {i} sums to {total}"
            );
            assert!(m.row(i).iter().all(|&p| p >= 0.0));
        }
    }
}

#[test]
fn test_trend_scales_uptake() {
    let t = trend();
    let raw = SwitchingMatrix::new(vec![
        vec![0.90, 0.05, 0.05],
        vec![0.10, 0.80, 0.10],
        vec![0.10, 0.10, 0.80],
    ]);
    // At 2010 the factor is 0.2/0.4 = 0.5: uptake halves, non-use absorbs
    let m = t.trended_matrix(&raw, 2010.0);
    assert!((m.row(0)[1] - 0.025).abs() < 1e-12);
    assert!((m.row(0)[2] - 0.025).abs() < 1e-12);
    assert!((m.row(0)[0] - 0.95).abs() < 1e-12);
}

#[test]
fn test_overshooting_uptake_renormalizes() {
    let t = McprTrend::new(
        vec![2000.0, 2010.0],
        vec![0.05, 0.50],
        0.0,
        0.90,
        2000.0,
    )
    .unwrap();
    // Factor 10 at 2010 drives the uptake sum past 1; the row renormalizes
    // with the non-use share dropped to zero
    let raw = SwitchingMatrix::new(vec![vec![0.70, 0.20, 0.10]]);
    let m = t.trended_matrix(&raw, 2010.0);
    assert!((m.row_sum(0) - 1.0).abs() < 1e-9);
    assert_eq!(m.row(0)[0], 0.0);
}

#[test]
fn test_trended_vector() {
    let t = trend();
    let v = t.trended_vector(&[0.85, 0.10, 0.05], 2010.0);
    assert!((v.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!((v[1] - 0.05).abs() < 1e-12);
    assert!((v[2] - 0.025).abs() < 1e-12);
}

#[test]
fn test_invalid_trend_rejected() {
    assert!(McprTrend::new(vec![2000.0], vec![0.1, 0.2], 0.0, 0.9, 2000.0).is_err());
    assert!(McprTrend::new(vec![2010.0, 2000.0], vec![0.1, 0.2], 0.0, 0.9, 2000.0).is_err());
    assert!(McprTrend::new(vec![2000.0, 2010.0], vec![0.1, 1.5], 0.0, 0.9, 2000.0).is_err());
    // Zero MCPR at the normalization year cannot anchor the factor
    assert!(McprTrend::new(vec![2000.0, 2010.0], vec![0.0, 0.2], 0.0, 0.9, 1990.0).is_err());
}
