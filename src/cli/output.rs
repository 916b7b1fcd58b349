//! Output formatting helpers for CLI commands

use crate::model::{MetricValue, Page, RunResult};
use crate::trends::{series_label, ScoreBand, TrendsReport};
use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde_json::json;
use std::fmt::Write;

/// View model for one row of the page table
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageView {
    pub id: String,
    pub name: String,
    pub url: String,
    pub env: String,
    pub device: String,
    pub enabled: bool,
    pub benchmark_score: u32,
    pub threshold_percentage: u32,
}

impl From<&Page> for PageView {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            name: page.name.clone(),
            url: page.url.clone(),
            env: page.env.clone(),
            device: page.device.to_string(),
            enabled: page.is_enabled,
            benchmark_score: page.benchmark_score,
            threshold_percentage: page.threshold_percentage,
        }
    }
}

/// Format pages as a numbered table. Row numbers are what the interactive
/// dashboard accepts as page references.
pub fn format_pages_table(pages: &[PageView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Status", "Page Name", "Target URL", "Config", "Benchmark", "ID"]);

    for (i, p) in pages.iter().enumerate() {
        let status = if p.enabled {
            "● on".green().to_string()
        } else {
            "○ off".dimmed().to_string()
        };

        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(status),
            Cell::new(&p.name),
            Cell::new(&p.url),
            Cell::new(format!("{} · {}", p.env.to_uppercase(), p.device)),
            Cell::new(format!("{} / ±{}%", p.benchmark_score, p.threshold_percentage)),
            Cell::new(&p.id),
        ]);
    }

    table.to_string()
}

/// Format pages as JSON
pub fn format_pages_json(pages: &[PageView]) -> String {
    serde_json::to_string_pretty(&json!({ "pages": pages })).unwrap_or_default()
}

/// Format a single page as key/value lines
pub fn format_page_detail(page: &Page) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{} [{}]", page.name.bold(), page.device.as_str().to_uppercase());
    let _ = writeln!(output, "  ID:        {}", page.id);
    let _ = writeln!(output, "  URL:       {}", page.url);
    let _ = writeln!(output, "  Env:       {}", page.env);
    let _ = writeln!(
        output,
        "  Status:    {}",
        if page.is_enabled { "enabled".green() } else { "disabled".dimmed() }
    );
    let _ = writeln!(
        output,
        "  Benchmark: {} / ±{}%",
        page.benchmark_score, page.threshold_percentage
    );
    if !page.created_at.is_empty() {
        let _ = writeln!(output, "  Created:   {}", page.created_at);
    }
    output
}

/// Color a performance score by its band
pub fn colored_score(score: u32) -> ColoredString {
    let text = score.to_string();
    match ScoreBand::of(score) {
        ScoreBand::Good => text.green().bold(),
        ScoreBand::NeedsImprovement => text.yellow().bold(),
        ScoreBand::Poor => text.red().bold(),
    }
}

/// Format the result panel shown after an on-demand run
pub fn format_run_result(page_id: &str, result: &RunResult) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", "Audit Result".bold());
    let _ = writeln!(output, "  Performance: {}", colored_score(result.psi_score));
    let _ = writeln!(output, "  SEO:         {}", result.seo_score.to_string().blue().bold());

    if !result.metrics.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Metric", "Value"]);
        for (key, value) in &result.metrics {
            let rendered = MetricValue::from_json(value)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![
                Cell::new(series_label(key)),
                Cell::new(rendered).set_alignment(CellAlignment::Right),
            ]);
        }
        let _ = writeln!(output, "{}", table);
    }

    let _ = writeln!(output, "View trends: lightkeeper trends {}", page_id);
    output
}

/// Format the trends header: page identity and latest scores
pub fn format_trends_header(report: &TrendsReport) -> String {
    let mut output = String::new();

    if let Some(page) = &report.page {
        let _ = writeln!(
            output,
            "{} [{}]",
            page.name.bold(),
            page.device.as_str().to_uppercase()
        );
        let _ = writeln!(output, "{}", page.url.cyan());
    }

    match &report.latest {
        Some(latest) => {
            let _ = writeln!(
                output,
                "PSI Score: {}   SEO Score: {}   ({} audits, latest {})",
                colored_score(latest.psi),
                latest.seo.to_string().blue().bold(),
                report.rows.len(),
                report
                    .rows
                    .last()
                    .map(|r| r.full_date.as_str())
                    .unwrap_or(latest.created_at.as_str()),
            );
        }
        None => {
            let _ = writeln!(output, "{}", "No audits yet".dimmed());
        }
    }

    output
}

/// Format a blocking alert
pub fn format_alert(message: &str) -> String {
    format!("{} {}", "!".red().bold(), message.red())
}
