//! Family planning simulation library
//!
//! This crate provides an individual-based simulation of contraceptive
//! method choice and fertility dynamics over multi-decade horizons. It
//! supports:
//! - Per-agent method switching from age-bracketed, row-stochastic
//!   probability matrices with postpartum variants
//! - A secular MCPR trend that scales method uptake year by year under a
//!   prevalence ceiling
//! - One-shot scenario interventions editing efficacies, switching
//!   probabilities, and scalar parameters mid-run
//! - Repeated scenario replicates with independent seeded streams
//! - Calibration against demographic reference data through a weighted
//!   goodness-of-fit mismatch
//!
//! # Quick start
//!
//! ```ignore
//! use fpsim_core::locations;
//! use fpsim_core::simulation::Sim;
//!
//! let pars = locations::make_pars("kenya")?.with_seed(42);
//! let result = Sim::new(pars, vec![])?.run()?;
//! println!("births: {}", result.total_births());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod calibration;
pub mod error;
pub mod interp;
pub mod interventions;
pub mod scenarios;
pub mod simulation;
pub mod stats;
pub mod switching;
pub mod trend;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod locations;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use calibration::{Calibration, CalibrationData, Fit, FitConfig, compute_gof};
pub use config::SimulationConfig;
pub use error::{CalibrationError, ConfigError, FitError};
pub use interventions::{ChangePar, Intervention, ScenarioSpec, UpdateMethods};
pub use scenarios::Scenarios;
pub use simulation::Sim;
