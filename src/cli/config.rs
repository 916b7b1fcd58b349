//! Config command handlers

use crate::cli::ConfigInitArgs;
use crate::config::{check_base_url, EXAMPLE_CONFIG};
use std::fs;

/// The example config, pointed at `api_url` when one is given.
pub fn render_example_config(api_url: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let Some(url) = api_url else {
        return Ok(EXAMPLE_CONFIG.to_string());
    };
    check_base_url(url)?;

    let line = format!("base_url = {}", toml::Value::String(url.to_string()));
    let mut replaced = false;
    let mut content = String::with_capacity(EXAMPLE_CONFIG.len() + url.len());
    for example_line in EXAMPLE_CONFIG.lines() {
        if !replaced && example_line.starts_with("base_url =") {
            content.push_str(&line);
            replaced = true;
        } else {
            content.push_str(example_line);
        }
        content.push('\n');
    }
    Ok(content)
}

/// Handle `lightkeeper config init` command
///
/// `api_url` comes from `--api-url` / `LIGHTKEEPER_API_URL` and replaces the
/// example's base URL.
pub fn handle_config_init(
    args: &ConfigInitArgs,
    api_url: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let content = render_example_config(api_url)?;

    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, content)?;

    let hint = match api_url {
        Some(url) => format!("Service: {}", url),
        None => "Set [api] base_url to your Lightkeeper service.".to_string(),
    };
    Ok(format!(
        "✓ Configuration file created: {}\n  {}",
        args.output.display(),
        hint
    ))
}
