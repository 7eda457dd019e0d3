//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer, and owns
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, GeminiAppConfig, GeoLocationConfig, LocationConfig, SimulationConfig,
};
pub use telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
