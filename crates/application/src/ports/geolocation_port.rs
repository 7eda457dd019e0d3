//! Geolocation port
//!
//! Source of the device's current position for "use my location" lookups.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for resolving the current device position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeolocationPort: Send + Sync {
    /// Request the current position
    ///
    /// Failure means the user has to fall back to typing a location.
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError>;
}
