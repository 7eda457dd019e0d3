//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A required setting (such as the weather API key) is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Device position could not be determined
    #[error("Geolocation unavailable: {0}")]
    Geolocation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the failure came from the remote lookup or its configuration,
    /// as opposed to an unexpected internal fault
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::ExternalService(_) | Self::RateLimited | Self::Domain(_)
        )
    }
}
