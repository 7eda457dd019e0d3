//! Gemini weather adapter - Implements WeatherLookupPort using integration_gemini

use application::error::ApplicationError;
use application::ports::WeatherLookupPort;
use async_trait::async_trait;
use domain::{DomainError, GroundingSource, WeatherQuery, WeatherReport};
use integration_gemini::{
    ForecastRequest, GeminiClient, GeminiError, GroundedAnswer, GroundedSearchClient,
};
use tracing::{debug, instrument};

use crate::config::GeminiAppConfig;

/// Adapter for natural-language weather lookups through Gemini
pub struct GeminiWeatherAdapter {
    client: GeminiClient,
}

impl std::fmt::Debug for GeminiWeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiWeatherAdapter")
            .field("client", &"GeminiClient")
            .field("model", &self.client.config().model)
            .finish()
    }
}

impl GeminiWeatherAdapter {
    /// Create an adapter from application configuration
    ///
    /// A missing API key is accepted here and reported on each lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &GeminiAppConfig) -> Result<Self, ApplicationError> {
        let client = GeminiClient::new(config.to_client_config())
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub const fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Map integration error to application error
    fn map_error(err: GeminiError) -> ApplicationError {
        match err {
            GeminiError::MissingApiKey => {
                ApplicationError::Configuration("Gemini API key is not set".into())
            },
            GeminiError::ConnectionFailed(e)
            | GeminiError::RequestFailed(e)
            | GeminiError::ServiceUnavailable(e)
            | GeminiError::ParseError(e) => ApplicationError::ExternalService(e),
            GeminiError::RateLimitExceeded => ApplicationError::RateLimited,
            GeminiError::InvalidQuery(e) => DomainError::InvalidQuery(e).into(),
        }
    }

    fn to_request(query: &WeatherQuery) -> ForecastRequest {
        let request = query.coordinates().map_or_else(ForecastRequest::default, |c| {
            ForecastRequest::for_coordinates(c.latitude(), c.longitude())
        });
        match query.location() {
            Some(location) => request.near(location),
            None => request,
        }
    }

    fn to_report(answer: GroundedAnswer) -> WeatherReport {
        WeatherReport::new(
            answer.text,
            answer
                .sources
                .into_iter()
                .map(|s| GroundingSource::new(s.uri, s.title))
                .collect(),
        )
    }
}

#[async_trait]
impl WeatherLookupPort for GeminiWeatherAdapter {
    #[instrument(skip(self), fields(location = query.location(), coordinates = query.coordinates().is_some()))]
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, ApplicationError> {
        let request = Self::to_request(query);

        let result = self
            .client
            .forecast(&request)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(answer) => {
                debug!(sources = answer.sources.len(), "Retrieved weather summary");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get weather summary");
            },
        }

        result.map(Self::to_report)
    }
}
