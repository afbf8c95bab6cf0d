//! Contraceptive method definitions
//!
//! Methods are immutable records with a stable integer index used for matrix
//! row/column addressing. The collection for a location is built once at
//! parameter-load time; indices never change during a run.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Index of a contraceptive method within a location's method table.
///
/// Index 0 is always the "no method" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MethodId(pub u8);

impl MethodId {
    /// The "no method" state shared by every location
    pub const NONE: MethodId = MethodId(0);

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single contraceptive method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    pub id: MethodId,
    pub name: String,
    /// Whether this counts as a modern method for MCPR purposes
    pub modern: bool,
    /// Baseline probability per use-interval that pregnancy is prevented
    pub efficacy: f64,
}

/// The fixed collection of methods for a location, with name lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Method>", into = "Vec<Method>")]
pub struct MethodTable {
    methods: Vec<Method>,
    by_name: FxHashMap<String, MethodId>,
}

impl From<Vec<Method>> for MethodTable {
    fn from(methods: Vec<Method>) -> Self {
        let by_name = methods
            .iter()
            .map(|m| (m.name.clone(), m.id))
            .collect();
        Self { methods, by_name }
    }
}

impl From<MethodTable> for Vec<Method> {
    fn from(table: MethodTable) -> Self {
        table.methods
    }
}

impl MethodTable {
    /// Build a method table from `(name, modern, efficacy)` tuples in index order.
    ///
    /// The first entry must be the "no method" state with zero efficacy.
    pub fn new(entries: &[(&str, bool, f64)]) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::InvalidParameters {
                reason: "method table is empty".into(),
            });
        }
        if entries[0].1 || entries[0].2 != 0.0 {
            return Err(ConfigError::InvalidParameters {
                reason: format!(
                    "method index 0 must be the non-use state with zero efficacy, found {:?}",
                    entries[0].0
                ),
            });
        }
        let methods: Vec<Method> = entries
            .iter()
            .enumerate()
            .map(|(i, (name, modern, efficacy))| Method {
                id: MethodId(i as u8),
                name: (*name).to_string(),
                modern: *modern,
                efficacy: *efficacy,
            })
            .collect();
        let by_name = methods
            .iter()
            .map(|m| (m.name.clone(), m.id))
            .collect::<FxHashMap<_, _>>();
        if by_name.len() != methods.len() {
            return Err(ConfigError::InvalidParameters {
                reason: "duplicate method names in method table".into(),
            });
        }
        Ok(Self { methods, by_name })
    }

    /// Number of methods `M` (matrix dimension)
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    #[must_use]
    pub fn get(&self, id: MethodId) -> &Method {
        &self.methods[id.index()]
    }

    /// Resolve a method name to its index, e.g. "Condoms" -> 3
    pub fn index_of(&self, name: &str) -> Result<MethodId, ConfigError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::MethodNotFound(name.to_string()))
    }

    #[must_use]
    pub fn efficacy(&self, id: MethodId) -> f64 {
        self.methods[id.index()].efficacy
    }

    pub fn set_efficacy(&mut self, id: MethodId, efficacy: f64) {
        self.methods[id.index()].efficacy = efficacy;
    }

    #[must_use]
    pub fn is_modern(&self, id: MethodId) -> bool {
        self.methods[id.index()].modern
    }
}
