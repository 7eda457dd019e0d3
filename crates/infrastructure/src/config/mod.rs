//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: Gemini lookup and device location
//! - `simulation`: pressure random walk
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml` (or an explicit file), then `CLIMA_`-prefixed environment
//! variables using `__` between nested keys (`CLIMA_GEMINI__API_KEY`).

mod integrations;
mod simulation;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

pub use integrations::{GeminiAppConfig, GeoLocationConfig, LocationConfig};
pub use simulation::SimulationConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CLIMA";

/// Placeholder printed instead of secret values
pub const REDACTED: &str = "[REDACTED]";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini weather lookup
    #[serde(default)]
    pub gemini: GeminiAppConfig,

    /// Pressure simulation
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Default location and stand-in coordinates
    #[serde(default)]
    pub location: LocationConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(
            config::File::with_name("config").required(false),
            env_source(),
        )
    }

    /// Load configuration from an explicit file plus the environment
    ///
    /// Unlike [`AppConfig::load`], the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true), env_source())
    }

    fn build<F>(file: F, env: config::Environment) -> Result<Self, config::ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            // Start with defaults
            .set_default("location.default_query", application::DEFAULT_LOCATION)?
            .add_source(file)
            .add_source(env)
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(
            has_api_key = app.gemini.api_key().is_some(),
            seeded = app.simulation.seed.is_some(),
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Check values the type system cannot
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.location.default_query.trim().is_empty() {
            return Err("location.default_query must not be empty".to_string());
        }
        if let Some(coords) = &self.location.coordinates {
            if coords.to_geo_location().is_none() {
                return Err(format!(
                    "location.coordinates out of range: {}, {}",
                    coords.latitude, coords.longitude
                ));
            }
        }
        if self.gemini.timeout_secs == Some(0) {
            return Err("gemini.timeout_secs must be greater than 0".to_string());
        }
        if self.gemini.model.trim().is_empty() {
            return Err("gemini.model must not be empty".to_string());
        }
        Ok(())
    }

    /// Render the effective configuration as TOML with secrets masked
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut value = toml::Value::try_from(self)?;
        if self.gemini.api_key.is_some() {
            if let Some(gemini) = value.get_mut("gemini").and_then(toml::Value::as_table_mut) {
                gemini.insert(
                    "api_key".to_string(),
                    toml::Value::String(REDACTED.to_string()),
                );
            }
        }
        toml::to_string_pretty(&value)
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
