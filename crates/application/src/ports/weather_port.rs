//! Weather lookup port
//!
//! Defines the interface for the remote natural-language weather lookup.

use async_trait::async_trait;
use domain::{WeatherQuery, WeatherReport};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for remote weather lookups
///
/// Implementations must fail with [`ApplicationError::Configuration`] before
/// any network attempt when their access credential is missing. Every other
/// failure is reported as a generic error; callers never retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherLookupPort: Send + Sync {
    /// Look up the current weather and short-term forecast for a query
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, ApplicationError>;
}
