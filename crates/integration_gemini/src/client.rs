//! Gemini grounded-search client
//!
//! HTTP client for the Gemini `generateContent` endpoint with Google Search
//! and Google Maps grounding enabled.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{GenerateContentRequest, GenerateContentResponse, GroundedAnswer};
use crate::prompt::ForecastRequest;

/// Summary used when the model returned no text
pub const EMPTY_ANSWER_FALLBACK: &str = "No se pudo obtener el pronóstico del tiempo.";

/// Gemini client errors
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key configured; raised before any network attempt
    #[error("Gemini API key is not set")]
    MissingApiKey,

    /// Connection to the API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the API failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Failed to parse the API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The request names neither a location nor coordinates
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Gemini client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (sensitive, never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL (default: <https://generativelanguage.googleapis.com/v1beta>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name (default: gemini-2.5-flash)
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
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

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    /// Default configuration with the given key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Self::default()
        }
    }

    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }
}

/// Client trait for grounded forecast lookups
#[async_trait]
pub trait GroundedSearchClient: Send + Sync {
    /// Ask the model for a grounded forecast
    async fn forecast(&self, request: &ForecastRequest) -> Result<GroundedAnswer, GeminiError>;
}

/// Gemini HTTP client implementation
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client with the given configuration
    ///
    /// A missing API key is not an error here; it is reported by every
    /// lookup instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GeminiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn api_key(&self) -> Result<&str, GeminiError> {
        self.config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .filter(|k| !k.is_empty())
            .ok_or(GeminiError::MissingApiKey)
    }
}

#[async_trait]
impl GroundedSearchClient for GeminiClient {
    #[instrument(skip(self), fields(model = %self.config.model))]
    async fn forecast(&self, request: &ForecastRequest) -> Result<GroundedAnswer, GeminiError> {
        let api_key = self.api_key()?;

        if !request.is_valid() {
            return Err(GeminiError::InvalidQuery(
                "a location or coordinates are required".to_string(),
            ));
        }

        let body = GenerateContentRequest::grounded(request.prompt(), request.coordinates);
        let url = self.endpoint_url();
        debug!(url = %url, grounded_by_coordinates = request.coordinates.is_some(), "Requesting forecast");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    GeminiError::ConnectionFailed(e.to_string())
                } else {
                    GeminiError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeminiError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(GeminiError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeminiError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ParseError(e.to_string()))?;

        let text = api_response.text();
        let sources = api_response.sources();
        debug!(chars = text.len(), sources = sources.len(), "Received forecast");

        Ok(GroundedAnswer {
            text: if text.trim().is_empty() {
                EMPTY_ANSWER_FALLBACK.to_string()
            } else {
                text
            },
            sources,
        })
    }
}
