//! Built-in location parameter sets
//!
//! A location supplies everything the engine needs: method definitions,
//! switching matrices per age bracket, the MCPR trend, and demographic
//! tables. The provenance of the numbers (survey extraction, CSV cleaning)
//! lives outside this crate; these modules hold the resulting static tables.

pub mod kenya;
pub mod test;

use crate::config::SimulationConfig;
use crate::error::ConfigError;

/// Build the parameter set for a named location.
///
/// Unknown names are a fatal configuration error, not a fallback to some
/// default.
pub fn make_pars(location: &str) -> Result<SimulationConfig, ConfigError> {
    match location {
        "kenya" => kenya::make_pars(),
        "test" => test::make_pars(),
        other => Err(ConfigError::LocationNotFound(other.to_string())),
    }
}
