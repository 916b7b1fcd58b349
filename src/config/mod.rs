//! Configuration module for Lightkeeper
//!
//! Layered configuration: CLI arguments override `LIGHTKEEPER_*` environment
//! variables, which override the TOML file, which overrides defaults.
//!
//! # Example
//!
//! ```rust
//! use lightkeeper::config::LightkeeperConfig;
//!
//! let config = LightkeeperConfig::default();
//! assert_eq!(config.api.base_url, "http://localhost:8000");
//!
//! let toml = r#"
//! [api]
//! base_url = "http://audits.internal:8000"
//! "#;
//! let config: LightkeeperConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.api.base_url, "http://audits.internal:8000");
//! ```

pub mod api;
pub mod display;
pub mod error;
pub mod logging;

pub use api::{check_base_url, ApiConfig};
pub use display::DisplayConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the service base URL.
pub const API_URL_ENV: &str = "LIGHTKEEPER_API_URL";

/// Commented example written by `lightkeeper config init`.
pub const EXAMPLE_CONFIG: &str = include_str!("../../lightkeeper.example.toml");

/// Unified client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LightkeeperConfig {
    /// Service connection
    pub api: ApiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Chart and table rendering
    pub display: DisplayConfig,
}

impl LightkeeperConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are ignored and the previous value is kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(timeout) = std::env::var("LIGHTKEEPER_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.api.timeout_seconds = t;
            }
        }

        if let Ok(level) = std::env::var("LIGHTKEEPER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LIGHTKEEPER_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        api::check_base_url(&self.api.base_url)?;
        self.logging.validate()?;

        if self.display.chart_height == 0 {
            return Err(ConfigError::Validation {
                field: "display.chart_height".to_string(),
                message: "must be non-zero".to_string(),
            });
        }
        if self.display.chart_width == 0 {
            return Err(ConfigError::Validation {
                field: "display.chart_width".to_string(),
                message: "must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
