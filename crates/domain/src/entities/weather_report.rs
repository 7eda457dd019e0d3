//! Weather lookup request and result entities

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// A citation returned alongside a generative-AI answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GroundingSource {
    pub fn new(uri: impl Into<String>, title: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            title,
        }
    }

    /// Title if present, otherwise the URI
    #[must_use]
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.uri)
    }
}

/// Result of one weather lookup
///
/// Produced once per request and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

impl WeatherReport {
    pub fn new(summary: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        Self {
            summary: summary.into(),
            sources,
        }
    }
}

/// What to look up: free-text location, device coordinates, or both
///
/// When both are present the coordinates drive the lookup and the text is
/// only a hint ("near ...").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQuery {
    location: Option<String>,
    coordinates: Option<GeoLocation>,
}

impl WeatherQuery {
    /// Query by city or region name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuery` if the text is blank.
    pub fn for_location(location: impl Into<String>) -> Result<Self, DomainError> {
        let location = location.into();
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuery(
                "location text cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            location: Some(trimmed.to_string()),
            coordinates: None,
        })
    }

    /// Query by device coordinates
    #[must_use]
    pub const fn for_coordinates(coordinates: GeoLocation) -> Self {
        Self {
            location: None,
            coordinates: Some(coordinates),
        }
    }

    /// Attach a location hint to a coordinate query; blank hints are dropped
    #[must_use]
    pub fn near(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        let trimmed = location.trim();
        if !trimmed.is_empty() {
            self.location = Some(trimmed.to_string());
        }
        self
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub const fn coordinates(&self) -> Option<GeoLocation> {
        self.coordinates
    }
}
