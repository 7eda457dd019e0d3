//! Geographic location value object
//!
//! Coordinates reported by the device (or configured as a stand-in for it)
//! and forwarded to the weather lookup as a grounding hint.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when coordinates are outside the valid range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
pub struct InvalidCoordinates;

/// A geographic position with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawGeoLocation) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Madrid, Spain (the lookup panel's default city)
    #[must_use]
    pub const fn madrid() -> Self {
        Self {
            latitude: 40.4168,
            longitude: -3.7038,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
