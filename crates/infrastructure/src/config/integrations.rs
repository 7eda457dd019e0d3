//! Integration configurations: Gemini lookup and device location.

use domain::GeoLocation;
use integration_gemini::GeminiConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Gemini Configuration
// ==============================

/// Gemini weather lookup configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiAppConfig {
    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Request timeout in seconds (unset = no timeout)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for GeminiAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAppConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_gemini_base_url() -> String {
    GeminiConfig::default().base_url
}

fn default_gemini_model() -> String {
    GeminiConfig::default().model
}

impl Default for GeminiAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_secs: None,
        }
    }
}

impl GeminiAppConfig {
    /// Get the API key as a string slice, if present and non-blank
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .filter(|k| !k.trim().is_empty())
    }

    /// Replace the configured key when `key` is given (e.g. from a CLI flag)
    pub fn override_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(SecretString::from(key));
        }
    }

    /// Convert to the client configuration
    #[must_use]
    pub fn to_client_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// Location Configuration
// ==============================

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

/// Where lookups go when the user does not say
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Location looked up when none is given
    #[serde(default = "default_query")]
    pub default_query: String,

    /// Stand-in for the device position used by "current position" lookups
    ///
    /// Configured as inline table: `{ latitude = 40.4168, longitude = -3.7038 }`
    #[serde(default)]
    pub coordinates: Option<GeoLocationConfig>,
}

fn default_query() -> String {
    application::DEFAULT_LOCATION.to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_query: default_query(),
            coordinates: None,
        }
    }
}
