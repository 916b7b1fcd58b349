//! Trends command handler

use crate::cli::chart::render_charts;
use crate::cli::output::format_trends_header;
use crate::cli::TrendsArgs;
use crate::client::LightkeeperApi;
use crate::config::DisplayConfig;
use crate::trends::{load_trends, TrendsReport};

/// Render a report as header plus charts.
pub fn format_trends(report: &TrendsReport, width: usize, height: usize) -> String {
    let mut output = format_trends_header(report);
    output.push('\n');
    output.push_str(&render_charts(&report.charts, &report.rows, width, height));
    output
}

/// Handle `lightkeeper trends`
pub async fn handle_trends(
    args: &TrendsArgs,
    api: &dyn LightkeeperApi,
    display: &DisplayConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let report = load_trends(api, &args.id).await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let width = args.width.unwrap_or(display.chart_width);
    let height = args.height.unwrap_or(display.chart_height);
    Ok(format_trends(&report, width, height))
}
