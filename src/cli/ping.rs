//! Ping command handler

use crate::client::LightkeeperApi;
use colored::Colorize;
use std::time::Instant;

/// Handle `lightkeeper ping`
pub async fn handle_ping(
    api: &dyn LightkeeperApi,
    base_url: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let reply = api.ping().await?;
    Ok(format!(
        "{} {} answered '{}' in {}ms",
        "✓".green(),
        base_url,
        reply.message,
        start.elapsed().as_millis()
    ))
}
