//! Pressure simulation settings.

use serde::{Deserialize, Serialize};

/// Pressure simulation configuration
///
/// The tick interval is fixed; only the random source is configurable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for a reproducible walk (unset = seeded from the OS)
    #[serde(default)]
    pub seed: Option<u64>,
}
