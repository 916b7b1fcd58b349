//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or checking a `lightkeeper.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// `api.base_url` is not an absolute http(s) URL.
    #[error("Invalid value for 'api.base_url' ({url}): {reason}")]
    InvalidApiUrl { url: String, reason: String },

    /// A log level that tracing cannot filter on.
    #[error("Invalid value for '{field}': unknown log level '{level}' (use trace, debug, info, warn, error or off)")]
    UnknownLogLevel { field: String, level: String },

    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}
