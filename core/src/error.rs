//! Error types for the spaces API client.
//!
//! # Design
//! Variants are grouped by where the failure is detected. Configuration and
//! local validation errors are raised before any I/O, so a caller that sees
//! one knows no request left the process. `Status` carries only the numeric
//! code: the body of a non-2xx response is never parsed. Whether a failure is
//! worth retrying is the caller's decision; `is_retryable` is a hint only.

use thiserror::Error;

use crate::environment::Environment;

/// Errors returned by `SpacesClient` and the resource operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No app token configured. Call `SpacesClient::set_app_token` first.
    #[error("missing app token, call set_app_token(\"<your app token>\")")]
    MissingAppToken,

    /// The selected environment has no server URL and no override was given.
    #[error("no server URL configured for the {0} environment")]
    MissingServerUrl(Environment),

    /// Single-item updates need the owner id of the entity.
    #[error("missing owner id")]
    MissingOwnerId,

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Connection, DNS, timeout or request construction failure.
    #[error("unable to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a status outside 200..=299.
    #[error("invalid response code: {status}")]
    Status { status: u16 },

    /// A 2xx response body did not match the expected shape.
    #[error("can't parse response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result type for spaces API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub(crate) fn network<E>(url: &str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ApiError::Network {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// The HTTP status code, if the server answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// True for network failures and 5xx statuses.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Status { status } => (500..=599).contains(status),
            _ => false,
        }
    }
}
