//! Kenya parameter set
//!
//! Switching matrices come from PMA Kenya contraceptive calendar data
//! (2019-2020); the CPR trend is from the UN Population Division Data
//! Portal; demographic tables are condensed from UN World Population
//! Prospects and DHS Kenya surveys. Rows of the raw matrices hold annual
//! transition probabilities (postpartum tables hold their own windows); the
//! store renormalizes rounding error on load.

use crate::config::{DebutAgeDist, MethodConfig, SimulationConfig};
use crate::error::ConfigError;
use crate::interp::InterpTable;
use crate::model::{AgeBracket, MatrixSet, MethodTable, SwitchingMatrix};
use crate::trend::McprTrend;

/// Build the full Kenya configuration
pub fn make_pars() -> Result<SimulationConfig, ConfigError> {
    let table = methods()?;
    let matrices = method_probs(table.len())?;
    let trend = mcpr_trend()?;

    Ok(SimulationConfig {
        location: "kenya".into(),
        n_agents: 1_000,
        start_year: 1960,
        end_year: 2020,
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

        twins_prob: 0.016,
        lam_efficacy: 0.98,

        fecundity_var_low: 0.7,
        fecundity_var_high: 1.1,
        primary_infertility: 0.05,
        exposure_factor: 1.0,

        age_pyramid: age_pyramid(),
        mortality: age_mortality()?,
        fecundity: female_age_fecundity()?,
        fecundity_ratio_nullip: fecundity_ratio_nullip()?,
        sexual_activity: sexual_activity()?,
        miscarriage: miscarriage()?,
        debut_age: debut_age(),

        methods: MethodConfig {
            table,
            matrices,
            trend,
        },
    })
}

/// Names, modern/traditional flag, and efficacies of contraceptive methods.
/// Efficacies are pooled rates for all women from published failure-rate
/// studies.
fn methods() -> Result<MethodTable, ConfigError> {
    MethodTable::new(&[
        ("None", false, 0.000),
        ("Withdrawal", false, 0.866),
        ("Other traditional", false, 0.861),
        ("Condoms", true, 0.946),
        ("Pill", true, 0.945),
        ("Injectables", true, 0.983),
        ("Implants", true, 0.994),
        ("IUDs", true, 0.986),
        ("BTL", true, 0.995),
        ("Other modern", true, 0.880),
    ])
}

/// Trend in contraceptive prevalence over time, in rate units.
/// Married women 1970-1986, all women 1990 onward.
fn mcpr_trend() -> Result<McprTrend, ConfigError> {
    McprTrend::new(
        vec![
            1970.0, 1975.0, 1980.0, 1985.0, 1990.0, 1995.0, 2000.0, 2005.0, 2010.0, 2015.0,
            2020.0,
        ],
        vec![0.05, 0.07, 0.10, 0.14, 0.20, 0.27, 0.32, 0.38, 0.46, 0.53, 0.58],
        0.02, // year-on-year change after the end of the data
        0.90, // do not allow MCPR to increase beyond this
        2020.0,
    )
}

fn brackets() -> Vec<AgeBracket> {
    vec![
        AgeBracket {
            name: "<18".into(),
            lo: 0.0,
            hi: 18.0,
        },
        AgeBracket {
            name: "18-20".into(),
            lo: 18.0,
            hi: 20.0,
        },
        AgeBracket {
            name: "21-25".into(),
            lo: 20.0,
            hi: 25.0,
        },
        AgeBracket {
            name: "26-35".into(),
            lo: 25.0,
            hi: 35.0,
        },
        AgeBracket {
            name: ">35".into(),
            lo: 35.0,
            hi: 100.0,
        },
    ]
}

fn method_probs(n_methods: usize) -> Result<MatrixSet, ConfigError> {
    let annual = [
        annual_u18(),
        annual_a18_20(),
        annual_a21_25(),
        annual_a26_35(),
        annual_o35(),
    ];
    let pp1to6 = [
        pp1to6_u18(),
        pp1to6_a18_20(),
        pp1to6_a21_25(),
        pp1to6_a26_35(),
        pp1to6_o35(),
    ];
    let pp0to1 = [
        pp0to1_u18(),
        pp0to1_a18_20(),
        pp0to1_a21_25(),
        pp0to1_a26_35(),
        pp0to1_o35(),
    ];

    let entries = brackets()
        .into_iter()
        .zip(annual)
        .zip(pp1to6)
        .zip(pp0to1)
        .map(|(((bracket, ann), pp), vec)| (bracket, ann, pp, vec))
        .collect();
    MatrixSet::new(n_methods, entries)
}

/// Starting age pyramid for Kenya 1960, from World Population Prospects:
/// `(age band start, males, females)`
fn age_pyramid() -> Vec<(f64, f64, f64)> {
    vec![
        (0.0, 801_895.0, 800_503.0),
        (5.0, 620_524.0, 625_424.0),
        (10.0, 463_547.0, 464_020.0),
        (15.0, 333_241.0, 331_921.0),
        (20.0, 307_544.0, 309_057.0),
        (25.0, 292_141.0, 287_621.0),
        (30.0, 247_826.0, 236_200.0),
        (35.0, 208_416.0, 190_234.0),
        (40.0, 177_914.0, 162_057.0),
        (45.0, 156_771.0, 138_943.0),
        (50.0, 135_912.0, 123_979.0),
        (55.0, 108_653.0, 111_939.0),
        (60.0, 85_407.0, 94_582.0),
        (65.0, 61_664.0, 71_912.0),
        (70.0, 40_797.0, 49_512.0),
        (75.0, 22_023.0, 29_298.0),
        (80.0, 11_025.0, 17_580.0),
    ]
}

/// Annual probability of dying by age, condensed from UN WPP life tables
fn age_mortality() -> Result<InterpTable, ConfigError> {
    InterpTable::new(
        vec![
            0.0, 1.0, 5.0, 15.0, 25.0, 35.0, 45.0, 55.0, 65.0, 75.0, 85.0, 99.0,
        ],
        vec![
            0.080, 0.012, 0.003, 0.0015, 0.0022, 0.0032, 0.006, 0.012, 0.030, 0.070, 0.150,
            0.300,
        ],
    )
}

/// Annual conception probability by age for women trying to conceive, from
/// the PRESTO study. Assumed linear from onset of fecundity to the first
/// data point at age 20; the 45-50 bin is set at a tenth of peak.
fn female_age_fecundity() -> Result<InterpTable, ConfigError> {
    InterpTable::new(
        vec![
            0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 28.0, 31.0, 34.0, 37.0, 40.0, 45.0, 50.0,
        ],
        vec![
            0.0, 0.0, 0.0, 0.65, 0.708, 0.793, 0.779, 0.766, 0.748, 0.674, 0.555, 0.079, 0.0,
        ],
    )
}

/// Fecundity ratio for a nulliparous woman vs a gravid woman, by age
fn fecundity_ratio_nullip() -> Result<InterpTable, ConfigError> {
    InterpTable::new(
        vec![
            0.0, 5.0, 10.0, 12.5, 15.0, 18.0, 20.0, 25.0, 30.0, 34.0, 37.0, 40.0, 45.0, 50.0,
        ],
        vec![
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.96, 0.95, 0.71, 0.73, 0.42, 0.42, 0.42,
        ],
    )
}

/// Fraction of women sexually active within the last four weeks, by age,
/// from DHS STAT Compiler. Applied only after sexual debut.
fn sexual_activity() -> Result<InterpTable, ConfigError> {
    InterpTable::new(
        vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0],
        vec![
            0.0, 0.0, 0.0, 0.314, 0.550, 0.644, 0.696, 0.653, 0.607, 0.574, 0.574,
        ],
    )
}

/// Likelihood of miscarriage by age, evaluated at the end of the first
/// trimester
fn miscarriage() -> Result<InterpTable, ConfigError> {
    InterpTable::new(
        vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0],
        vec![
            1.0, 1.0, 0.569, 0.167, 0.112, 0.097, 0.108, 0.167, 0.332, 0.569, 0.569,
        ],
    )
}

/// Distribution of fated sexual-debut ages, from DHS Kenya
fn debut_age() -> DebutAgeDist {
    DebutAgeDist {
        ages: vec![
            10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0, 21.0, 22.0, 23.0,
            24.0,
        ],
        probs: vec![
            0.002, 0.007, 0.018, 0.042, 0.079, 0.122, 0.151, 0.156, 0.141, 0.112, 0.079, 0.050,
            0.025, 0.011, 0.005,
        ],
    }
}

fn annual_u18() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.9578, 0.0003, 0.0023, 0.024, 0.0025, 0.005, 0.0043, 0.0002, 0.0002, 0.0035],
        vec![0.5684, 0.0179, 0.0038, 0.0752, 0.2552, 0.0295, 0.0024, 0.0001, 0.0001, 0.0475],
        vec![0.1187, 0.0001, 0.8034, 0.0471, 0.0173, 0.0021, 0.0003, 0.0, 0.0, 0.0111],
        vec![0.6347, 0.0006, 0.0016, 0.3171, 0.0078, 0.0131, 0.002, 0.0001, 0.0001, 0.0229],
        vec![0.1704, 0.0001, 0.0006, 0.0162, 0.7059, 0.0896, 0.0038, 0.0, 0.0, 0.0135],
        vec![0.1791, 0.0, 0.0007, 0.0027, 0.0169, 0.7371, 0.0629, 0.0, 0.0, 0.0006],
        vec![0.1138, 0.0, 0.0144, 0.002, 0.0006, 0.0302, 0.8386, 0.0, 0.0, 0.0004],
        vec![0.1352, 0.0, 0.0002, 0.0019, 0.0002, 0.0003, 0.0003, 0.8617, 0.0, 0.0003],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        vec![0.7052, 0.0003, 0.0166, 0.1279, 0.0253, 0.0282, 0.0032, 0.0001, 0.0001, 0.0931],
    ])
}

fn annual_a18_20() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.8392, 0.0014, 0.0132, 0.0705, 0.0131, 0.0331, 0.0199, 0.0003, 0.0001, 0.0091],
        vec![0.3917, 0.2362, 0.0072, 0.3268, 0.0115, 0.0138, 0.0093, 0.0001, 0.0, 0.0033],
        vec![0.1867, 0.0082, 0.6907, 0.0706, 0.0035, 0.0147, 0.0037, 0.0, 0.0, 0.0219],
        vec![0.4299, 0.0063, 0.0162, 0.4647, 0.0286, 0.0279, 0.0213, 0.0001, 0.0, 0.0049],
        vec![0.2567, 0.0005, 0.0031, 0.0339, 0.5704, 0.0974, 0.0262, 0.0, 0.0, 0.0117],
        vec![0.2396, 0.0002, 0.0047, 0.0134, 0.0189, 0.6235, 0.0971, 0.0, 0.0, 0.0025],
        vec![0.1203, 0.0001, 0.001, 0.0057, 0.0246, 0.0458, 0.8005, 0.0, 0.0, 0.002],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0612, 0.0, 0.0004, 0.0026, 0.0004, 0.0011, 0.0006, 0.0, 0.9332, 0.0004],
        vec![0.5869, 0.0079, 0.0513, 0.1252, 0.0303, 0.0183, 0.0228, 0.0001, 0.0, 0.1571],
    ])
}

fn annual_a21_25() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.7658, 0.0054, 0.0157, 0.0507, 0.0161, 0.0809, 0.0427, 0.0026, 0.0003, 0.0198],
        vec![0.4475, 0.1729, 0.1476, 0.0282, 0.0091, 0.0755, 0.0965, 0.0009, 0.0001, 0.0219],
        vec![0.1748, 0.0125, 0.6072, 0.0684, 0.0151, 0.0648, 0.03, 0.0004, 0.0, 0.0269],
        vec![0.3311, 0.011, 0.0225, 0.5046, 0.0152, 0.0625, 0.0344, 0.0019, 0.0001, 0.0168],
        vec![0.2285, 0.0069, 0.0112, 0.0189, 0.5645, 0.1011, 0.0465, 0.0115, 0.0, 0.0108],
        vec![0.1962, 0.0019, 0.0063, 0.0099, 0.0263, 0.6879, 0.0656, 0.0005, 0.0, 0.0054],
        vec![0.1346, 0.0013, 0.0028, 0.0084, 0.0107, 0.0481, 0.7906, 0.0006, 0.0, 0.003],
        vec![0.1184, 0.0005, 0.0011, 0.0038, 0.0014, 0.0208, 0.0221, 0.83, 0.0, 0.0019],
        vec![0.1765, 0.0007, 0.0016, 0.0057, 0.0017, 0.0085, 0.0043, 0.0003, 0.7981, 0.0028],
        vec![0.5085, 0.0085, 0.0829, 0.0964, 0.0422, 0.12, 0.04, 0.0015, 0.0001, 0.0999],
    ])
}

fn annual_a26_35() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.7865, 0.0028, 0.0097, 0.0245, 0.0209, 0.0864, 0.0506, 0.0057, 0.0016, 0.0113],
        vec![0.1941, 0.5082, 0.0085, 0.0392, 0.0435, 0.0802, 0.1139, 0.0011, 0.0002, 0.011],
        vec![0.1255, 0.0019, 0.6694, 0.0287, 0.0362, 0.0787, 0.0313, 0.0108, 0.0002, 0.0172],
        vec![0.3772, 0.0169, 0.0177, 0.462, 0.0312, 0.0451, 0.0171, 0.003, 0.0005, 0.0294],
        vec![0.1759, 0.0024, 0.0081, 0.0102, 0.6488, 0.0881, 0.052, 0.0076, 0.0002, 0.0068],
        vec![0.1732, 0.0022, 0.0081, 0.0087, 0.0257, 0.72, 0.0565, 0.002, 0.0004, 0.0031],
        vec![0.1008, 0.0019, 0.0025, 0.0021, 0.0075, 0.0383, 0.8418, 0.0026, 0.0001, 0.0024],
        vec![0.0852, 0.0034, 0.0059, 0.0015, 0.014, 0.0097, 0.0227, 0.8567, 0.0001, 0.0008],
        vec![0.0304, 0.0001, 0.0003, 0.0009, 0.0004, 0.0019, 0.001, 0.0001, 0.961, 0.0042],
        vec![0.3847, 0.0026, 0.0276, 0.1025, 0.0153, 0.1219, 0.0486, 0.0019, 0.0063, 0.2886],
    ])
}

fn annual_o35() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.9082, 0.0012, 0.0024, 0.0207, 0.0116, 0.0343, 0.014, 0.0007, 0.002, 0.0049],
        vec![0.1334, 0.775, 0.0004, 0.025, 0.0015, 0.0366, 0.027, 0.0002, 0.0002, 0.0007],
        vec![0.0334, 0.0026, 0.9284, 0.0049, 0.0056, 0.0204, 0.0011, 0.0011, 0.0, 0.0025],
        vec![0.2519, 0.0098, 0.0006, 0.6864, 0.0064, 0.0079, 0.0218, 0.0001, 0.0003, 0.0148],
        vec![0.1553, 0.0002, 0.0138, 0.0039, 0.7037, 0.0656, 0.0487, 0.0056, 0.0002, 0.003],
        vec![0.1269, 0.0013, 0.0111, 0.0047, 0.0218, 0.7748, 0.0499, 0.0044, 0.0017, 0.0033],
        vec![0.0765, 0.0022, 0.0044, 0.0033, 0.0148, 0.0389, 0.8536, 0.0019, 0.0012, 0.0032],
        vec![0.0605, 0.0001, 0.0013, 0.0007, 0.0006, 0.0126, 0.0063, 0.9143, 0.0001, 0.0034],
        vec![0.0061, 0.0, 0.0, 0.0001, 0.0001, 0.0002, 0.0027, 0.0, 0.9909, 0.0],
        vec![0.2256, 0.0004, 0.0198, 0.0236, 0.038, 0.0711, 0.0689, 0.0004, 0.0003, 0.5519],
    ])
}

fn pp1to6_u18() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.7005, 0.0, 0.0054, 0.026, 0.0172, 0.1096, 0.1413, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.6154, 0.3846, 0.0, 0.0, 0.0, 0.0],
        vec![0.0913, 0.0, 0.0, 0.0, 0.0, 0.7858, 0.1229, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
    ])
}

fn pp1to6_a18_20() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.565, 0.0, 0.0, 0.0078, 0.0146, 0.2205, 0.192, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.6788, 0.0, 0.0, 0.3212, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.397, 0.0, 0.603, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.9237, 0.0763, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
    ])
}

fn pp1to6_a21_25() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.4814, 0.0062, 0.0085, 0.0191, 0.0364, 0.2541, 0.1712, 0.0205, 0.0, 0.0025],
        vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.6549, 0.0, 0.0, 0.3451, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.5075, 0.0, 0.451, 0.0415, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.6087, 0.32, 0.0713, 0.0, 0.0, 0.0],
        vec![0.0329, 0.0, 0.0, 0.0, 0.0, 0.8558, 0.1014, 0.0098, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.3303, 0.0, 0.0, 0.0, 0.6697],
    ])
}

fn pp1to6_a26_35() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.5309, 0.0, 0.0128, 0.0119, 0.0355, 0.2012, 0.1932, 0.0144, 0.0, 0.0],
        vec![0.0, 0.8094, 0.0, 0.0, 0.0, 0.1906, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.9214, 0.0, 0.0, 0.0786, 0.0, 0.0, 0.0, 0.0],
        vec![0.096, 0.0, 0.0, 0.8052, 0.0, 0.0704, 0.0, 0.0, 0.0, 0.0285],
        vec![0.0, 0.0, 0.0, 0.0, 0.7361, 0.1569, 0.107, 0.0, 0.0, 0.0],
        vec![0.0445, 0.0, 0.0, 0.0, 0.0, 0.9078, 0.035, 0.0, 0.0127, 0.0],
        vec![0.0063, 0.0, 0.0, 0.0, 0.0052, 0.014, 0.9746, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.2318, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.7682, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
    ])
}

fn pp1to6_o35() -> SwitchingMatrix {
    SwitchingMatrix::new(vec![
        vec![0.6572, 0.0, 0.0115, 0.0184, 0.0639, 0.1318, 0.1068, 0.0031, 0.0047, 0.0025],
        vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.4391, 0.0, 0.0, 0.5609, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0392, 0.0, 0.0, 0.0, 0.0, 0.0, 0.9608, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
    ])
}

fn pp0to1_u18() -> Vec<f64> {
    vec![0.801, 0.0, 0.0052, 0.0099, 0.0089, 0.0508, 0.1243, 0.0, 0.0, 0.0]
}

fn pp0to1_a18_20() -> Vec<f64> {
    vec![0.7849, 0.0, 0.0066, 0.0134, 0.0082, 0.0793, 0.1007, 0.0038, 0.0, 0.0033]
}

fn pp0to1_a21_25() -> Vec<f64> {
    vec![0.7252, 0.003, 0.0104, 0.0151, 0.0108, 0.1242, 0.1068, 0.0015, 0.0, 0.0029]
}

fn pp0to1_a26_35() -> Vec<f64> {
    vec![0.7706, 0.004, 0.011, 0.0121, 0.0142, 0.0835, 0.0829, 0.0095, 0.0092, 0.0031]
}

fn pp0to1_o35() -> Vec<f64> {
    vec![0.8013, 0.0, 0.0037, 0.0093, 0.0059, 0.0594, 0.0622, 0.0075, 0.0406, 0.0101]
}
