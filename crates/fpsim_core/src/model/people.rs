//! Per-agent state
//!
//! Agents are owned exclusively by the simulation's population vector. The
//! switching engine mutates `method` and reads the rest.

use serde::{Deserialize, Serialize};

use crate::model::MethodId;

/// Postpartum phase, which selects the matrix family at a checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostpartumPhase {
    /// Not postpartum: ordinary annual switching
    None,
    /// First month after delivery: initiation vector
    Month0,
    /// Months 1-6: early-adjustment matrix
    Month1to6,
    /// Beyond month 6: annual switching resumes
    Later,
}

/// Sex of an agent. Only women carry fertility state; men contribute to
/// population counts alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

/// An in-progress pregnancy
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pregnancy {
    /// Months since conception
    pub gestation: u32,
    /// Fated total duration in months
    pub duration: u32,
}

/// A single simulated person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub alive: bool,
    pub sex: Sex,
    /// Age in years, advanced by 1/12 per step
    pub age: f64,
    /// Current contraceptive method
    pub method: MethodId,
    /// Number of live births so far
    pub parity: u32,
    /// Months since the last delivery, while within the postpartum window
    pub postpartum: Option<u32>,
    pub pregnancy: Option<Pregnancy>,
    /// Whether lactational amenorrhea currently applies
    pub lam: bool,
    /// Fated age of sexual debut
    pub debut_age: f64,
    /// Personal fecundity multiplier (0 for primary infertility)
    pub fecundity_scale: f64,
    /// Ages at each live birth, for spacing statistics
    pub dobs: Vec<f64>,
}

impl Person {
    #[must_use]
    pub fn new_female(age: f64, debut_age: f64, fecundity_scale: f64) -> Self {
        Self {
            alive: true,
            sex: Sex::Female,
            age,
            method: MethodId::NONE,
            parity: 0,
            postpartum: None,
            pregnancy: None,
            lam: false,
            debut_age,
            fecundity_scale,
            dobs: Vec::new(),
        }
    }

    #[must_use]
    pub fn new_male(age: f64) -> Self {
        Self {
            alive: true,
            sex: Sex::Male,
            age,
            method: MethodId::NONE,
            parity: 0,
            postpartum: None,
            pregnancy: None,
            lam: false,
            debut_age: f64::INFINITY,
            fecundity_scale: 0.0,
            dobs: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }

    #[must_use]
    pub fn postpartum_phase(&self) -> PostpartumPhase {
        match self.postpartum {
            None => PostpartumPhase::None,
            Some(0) => PostpartumPhase::Month0,
            Some(1..=6) => PostpartumPhase::Month1to6,
            Some(_) => PostpartumPhase::Later,
        }
    }

    /// Whether this agent participates in method switching at all
    #[must_use]
    pub fn method_eligible(&self, method_age: f64, fecundity_age_limit: f64) -> bool {
        self.alive
            && self.is_female()
            && self.age >= method_age
            && self.age < fecundity_age_limit
            && self.pregnancy.is_none()
    }
}
