//! Error types for service calls.

use thiserror::Error;

/// Errors that can occur while talking to the Lightkeeper service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Resource does not exist on the service (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Service returned an error response other than 404.
    #[error("Service error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response body doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Base URL could not be used to build request URLs.
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

impl ClientError {
    /// True for failures where the service could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Timeout(_))
    }
}
