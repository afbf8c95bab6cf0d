//! The monthly-step agent simulation
//!
//! Each step: interventions fire, the year's trended switching tables are
//! rebuilt, and every agent advances independently (mortality, aging,
//! pregnancy, delivery, postpartum progression, method switching,
//! conception). Agents interact with nothing but their own state, the
//! shared read-only tables, and the run's seeded random stream, so the
//! per-step loop carries no ordering requirements.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::interventions::Intervention;
use crate::model::{MethodId, Person, Pregnancy, SimulationResult};
use crate::switching::{MethodSwitcher, sample_weights};

/// Convert an annual probability to its per-month equivalent
#[must_use]
#[inline]
pub fn monthly_prob(annual: f64) -> f64 {
    1.0 - (1.0 - annual.clamp(0.0, 1.0)).powf(1.0 / 12.0)
}

/// One simulation run: an owned parameter set, a population, interventions,
/// and a seeded random stream
#[derive(Debug)]
pub struct Sim {
    config: SimulationConfig,
    interventions: Vec<Intervention>,
    people: Vec<Person>,
    rng: SmallRng,
    /// Months elapsed since `start_year`
    step: usize,
    result: SimulationResult,
}

impl Sim {
    /// Validate the configuration, initialize interventions, and bootstrap
    /// the starting population.
    ///
    /// The configuration is taken by value: the run owns its copy, so
    /// scenario edits never reach the caller's baseline.
    pub fn new(
        config: SimulationConfig,
        mut interventions: Vec<Intervention>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        for iv in &mut interventions {
            iv.initialize(&config)?;
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let people = bootstrap_population(&config, &mut rng)?;

        let result = SimulationResult {
            seed: config.seed,
            ..Default::default()
        };

        Ok(Self {
            config,
            interventions,
            people,
            rng,
            step: 0,
            result,
        })
    }

    /// Build a run for a named location with no interventions
    pub fn from_location(location: &str) -> Result<Self, ConfigError> {
        let config = crate::locations::make_pars(location)?;
        Self::new(config, Vec::new())
    }

    /// Current simulated time in fractional years
    #[must_use]
    pub fn year(&self) -> f64 {
        f64::from(self.config.start_year) + self.step as f64 / 12.0
    }

    #[must_use]
    pub fn pars(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Advance the whole run and return its results
    pub fn run(mut self) -> Result<SimulationResult, ConfigError> {
        let n_steps = self.config.n_steps();
        while self.step < n_steps {
            self.step_once()?;
        }
        self.result.people = self.people;
        Ok(self.result)
    }

    /// Advance one month
    fn step_once(&mut self) -> Result<(), ConfigError> {
        let year = self.year();

        for iv in self.interventions.iter_mut() {
            iv.apply(&mut self.config, year, &mut self.rng)?;
        }

        // Rebuilt after interventions so edits take effect the same step
        let switcher = MethodSwitcher::new(&self.config.methods, year)?;
        let config = &self.config;
        let rng = &mut self.rng;
        let annual_checkpoint = self.step % config.switch_frequency as usize == 0;

        let mut births = 0u32;
        let mut deaths = 0u32;
        let mut failures = 0u32;

        for p in self.people.iter_mut() {
            if !p.alive {
                continue;
            }

            // Mortality, then aging
            let death_prob = monthly_prob(config.mortality.eval_prob(p.age));
            if rng.random::<f64>() < death_prob {
                p.alive = false;
                deaths += 1;
                continue;
            }
            let prev_age = p.age;
            p.age += 1.0 / 12.0;
            if p.age >= config.max_age {
                p.alive = false;
                deaths += 1;
                continue;
            }

            if !p.is_female() {
                continue;
            }

            // Pregnancy progression and delivery
            if let Some(preg) = &mut p.pregnancy {
                preg.gestation += 1;
                if preg.gestation == config.end_first_tri {
                    let miscarriage_prob = config.miscarriage.eval_prob(p.age);
                    if rng.random::<f64>() < miscarriage_prob {
                        p.pregnancy = None;
                    }
                } else if preg.gestation >= preg.duration {
                    p.pregnancy = None;
                    let twins = rng.random::<f64>() < config.twins_prob;
                    let delivered = if twins { 2 } else { 1 };
                    p.parity += delivered;
                    births += delivered;
                    p.dobs.push(p.age);
                    p.postpartum = Some(0);
                    p.lam = true;
                }
            }

            // Method switching checkpoint
            if p.method_eligible(config.method_age, config.age_limit_fecundity) {
                let newly_eligible = prev_age < config.method_age && p.age >= config.method_age;
                let due = match p.postpartum {
                    Some(0..=6) => true,
                    _ => annual_checkpoint || newly_eligible,
                };
                if due {
                    let bracket = config.methods.matrices.bracket_for_age(p.age);
                    switcher.checkpoint(p, bracket, rng)?;
                }
            }

            // Conception
            if p.pregnancy.is_none()
                && p.age >= p.debut_age
                && p.age < config.age_limit_fecundity
                && p.fecundity_scale > 0.0
            {
                let mut annual_fecundity =
                    config.fecundity.eval_prob(p.age) * p.fecundity_scale;
                if p.parity == 0 {
                    annual_fecundity *= config.fecundity_ratio_nullip.eval(p.age);
                }
                let mut preg_prob = monthly_prob(annual_fecundity)
                    * config.sexual_activity.eval_prob(p.age)
                    * config.exposure_factor
                    * (1.0 - config.methods.table.efficacy(p.method));
                if p.lam {
                    preg_prob *= 1.0 - config.lam_efficacy;
                }
                if rng.random::<f64>() < preg_prob.clamp(0.0, 1.0) {
                    if p.method != MethodId::NONE {
                        failures += 1;
                    }
                    let duration = if config.preg_dur_high > config.preg_dur_low {
                        rng.random_range(config.preg_dur_low..=config.preg_dur_high)
                    } else {
                        config.preg_dur_low
                    };
                    p.pregnancy = Some(Pregnancy {
                        gestation: 0,
                        duration,
                    });
                    p.postpartum = None;
                    p.lam = false;
                }
            }

            // Postpartum month counter
            if let Some(m) = &mut p.postpartum {
                *m += 1;
                p.lam = *m < config.max_lam_dur;
                if *m >= config.postpartum_dur {
                    p.postpartum = None;
                    p.lam = false;
                }
            }
        }

        // Monthly channels
        self.result.t.push(year);
        self.result.births.push(births);
        self.result.deaths.push(deaths);
        self.result.method_failures.push(failures);
        self.result.mcpr.push(compute_mcpr(&self.people, config));

        self.step += 1;

        // Annual channels at each year boundary
        if self.step % 12 == 0 {
            let year_end = f64::from(self.config.start_year) + (self.step / 12) as f64;
            let alive = self.people.iter().filter(|p| p.alive).count() as f64;
            let women = self
                .people
                .iter()
                .filter(|p| {
                    p.alive
                        && p.is_female()
                        && p.age >= self.config.method_age
                        && p.age < self.config.age_limit_fecundity
                })
                .count() as f64;
            let annual_births: u32 = self.result.births.iter().rev().take(12).sum();
            let tfr = if women > 0.0 {
                f64::from(annual_births) / women * 35.0
            } else {
                0.0
            };
            self.result.tfr_years.push(year_end);
            self.result.pop_size.push(alive);
            self.result.tfr_rates.push(tfr);
        }

        Ok(())
    }
}

/// Modern contraceptive prevalence among alive, method-age-eligible women
fn compute_mcpr(people: &[Person], config: &SimulationConfig) -> f64 {
    let mut users = 0usize;
    let mut eligible = 0usize;
    for p in people {
        if p.alive
            && p.is_female()
            && p.age >= config.method_age
            && p.age < config.age_limit_fecundity
        {
            eligible += 1;
            if config.methods.table.is_modern(p.method) {
                users += 1;
            }
        }
    }
    if eligible == 0 {
        0.0
    } else {
        users as f64 / eligible as f64
    }
}

/// Draw the starting population from the location's age pyramid
fn bootstrap_population(
    config: &SimulationConfig,
    rng: &mut SmallRng,
) -> Result<Vec<Person>, ConfigError> {
    let pyramid = &config.age_pyramid;
    let total: f64 = pyramid.iter().map(|(_, m, f)| m + f).sum();
    if total <= 0.0 {
        return Err(ConfigError::InvalidParameters {
            reason: "age pyramid weights sum to zero".into(),
        });
    }
    let band_probs: Vec<f64> = pyramid.iter().map(|(_, m, f)| (m + f) / total).collect();

    let debut_total: f64 = config.debut_age.probs.iter().sum();
    let debut_probs: Vec<f64> = config
        .debut_age
        .probs
        .iter()
        .map(|p| p / debut_total)
        .collect();

    let mut people = Vec::with_capacity(config.n_agents);
    for _ in 0..config.n_agents {
        let band = sample_weights(&band_probs, rng);
        let (age_lo, males, females) = pyramid[band];
        let band_width = pyramid
            .get(band + 1)
            .map_or(5.0, |(next_lo, _, _)| next_lo - age_lo);
        let age = age_lo + rng.random::<f64>() * band_width;
        let female = rng.random::<f64>() < females / (males + females);

        if female {
            let debut_idx = sample_weights(&debut_probs, rng);
            let debut_age = config.debut_age.ages[debut_idx];
            let fecundity_scale = if rng.random::<f64>() < config.primary_infertility {
                0.0
            } else {
                config.fecundity_var_low
                    + rng.random::<f64>() * (config.fecundity_var_high - config.fecundity_var_low)
            };
            people.push(Person::new_female(age, debut_age, fecundity_scale));
        } else {
            people.push(Person::new_male(age));
        }
    }
    Ok(people)
}
