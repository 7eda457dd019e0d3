//! Geolocation adapter backed by configured coordinates
//!
//! A terminal has no location sensor, so "current position" comes from
//! `location.coordinates` in the configuration or from command-line flags.

use application::error::ApplicationError;
use application::ports::GeolocationPort;
use async_trait::async_trait;
use domain::GeoLocation;
use tracing::debug;

use crate::config::{GeoLocationConfig, LocationConfig};

/// Position source that reports a fixed, preconfigured position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfiguredGeolocationAdapter {
    position: Option<GeoLocation>,
}

impl ConfiguredGeolocationAdapter {
    pub const fn new(position: Option<GeoLocation>) -> Self {
        Self { position }
    }

    /// Use the configured coordinates; out-of-range values count as unset
    pub fn from_config(config: &LocationConfig) -> Self {
        Self::new(
            config
                .coordinates
                .as_ref()
                .and_then(GeoLocationConfig::to_geo_location),
        )
    }

    pub const fn is_configured(&self) -> bool {
        self.position.is_some()
    }
}

#[async_trait]
impl GeolocationPort for ConfiguredGeolocationAdapter {
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError> {
        self.position.ok_or_else(|| {
            debug!("No coordinates configured");
            ApplicationError::Geolocation("no coordinates configured".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_position_is_returned() {
        let adapter = ConfiguredGeolocationAdapter::new(Some(GeoLocation::madrid()));
        assert_eq!(adapter.current_position().await.unwrap(), GeoLocation::madrid());
    }

    #[tokio::test]
    async fn missing_position_is_an_error() {
        let adapter = ConfiguredGeolocationAdapter::new(None);
        assert!(matches!(
            adapter.current_position().await,
            Err(ApplicationError::Geolocation(_))
        ));
    }

    #[test]
    fn invalid_config_counts_as_unset() {
        let config = LocationConfig {
            coordinates: Some(GeoLocationConfig {
                latitude: 120.0,
                longitude: 0.0,
            }),
            ..LocationConfig::default()
        };
        assert!(!ConfiguredGeolocationAdapter::from_config(&config).is_configured());
    }

    #[test]
    fn valid_config_is_used() {
        let config = LocationConfig {
            coordinates: Some(GeoLocationConfig {
                latitude: 43.2630,
                longitude: -2.9350,
            }),
            ..LocationConfig::default()
        };
        assert!(ConfiguredGeolocationAdapter::from_config(&config).is_configured());
    }
}
