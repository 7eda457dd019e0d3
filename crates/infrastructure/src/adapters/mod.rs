//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod configured_geolocation_adapter;
mod gemini_weather_adapter;

pub use configured_geolocation_adapter::ConfiguredGeolocationAdapter;
pub use gemini_weather_adapter::GeminiWeatherAdapter;
