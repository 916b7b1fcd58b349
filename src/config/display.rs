//! Terminal rendering configuration

use serde::{Deserialize, Serialize};

/// Chart geometry and color output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Plot rows, excluding axis and legend
    pub chart_height: usize,
    /// Plot columns, excluding the y-axis gutter
    pub chart_width: usize,
    /// Emit ANSI colors
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            chart_height: 12,
            chart_width: 64,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.chart_height, 12);
        assert_eq!(config.chart_width, 64);
        assert!(config.color);
    }

    #[test]
    fn test_display_config_partial_toml() {
        let config: DisplayConfig = toml::from_str("color = false").unwrap();
        assert!(!config.color);
        assert_eq!(config.chart_height, 12);
    }
}
