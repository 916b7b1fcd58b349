//! Tracing filter construction
//!
//! Log levels come from [`LoggingConfig`](crate::config::LoggingConfig);
//! `RUST_LOG` overrides them when set.

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Returns
///
/// A filter string in the format: "base_level,lightkeeper::component1=level1,lightkeeper::component2=level2"
///
/// # Examples
///
/// ```
/// use lightkeeper::config::logging::{LogFormat, LoggingConfig};
/// use lightkeeper::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("client".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "warn".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "warn,lightkeeper::client=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        // Sorted so the directive string is stable across runs
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",lightkeeper::{}={}", component, level));
        }
    }

    filter_str
}
