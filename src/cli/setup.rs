//! Shared command setup: configuration, tracing, service client

use crate::cli::GlobalArgs;
use crate::client::ApiClient;
use crate::config::{LightkeeperConfig, LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &GlobalArgs,
) -> Result<LightkeeperConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        LightkeeperConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        LightkeeperConfig::default()
    };

    config = config.with_env_overrides();

    // CLI overrides (highest priority)
    if let Some(ref url) = args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_color {
        config.display.color = false;
    }

    config.validate()?;
    Ok(config)
}

/// Initialize tracing based on configuration
///
/// Logs go to stderr so command output on stdout can be piped.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Applies the color setting to everything rendered with `colored`.
pub fn apply_color(config: &LightkeeperConfig) {
    if !config.display.color {
        colored::control::set_override(false);
    }
}

/// Builds the service client from the resolved configuration.
pub fn connect(config: &LightkeeperConfig) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let client = ApiClient::from_config(&config.api)?;
    tracing::debug!(base_url = %client.base_url(), "Using Lightkeeper service");
    Ok(client)
}
