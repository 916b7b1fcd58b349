//! Line charts drawn on a character grid
//!
//! Each series gets a marker glyph and a palette color; consecutive points
//! are joined with dots so trends read left to right. Gaps (missing or
//! textual values) break the line.

use crate::trends::{Chart, ChartRow, PALETTE};
use colored::Colorize;
use std::fmt::Write;

/// Marker per palette slot, so series stay distinguishable without color.
const GLYPHS: [char; 6] = ['●', '◆', '▲', '■', '✚', '○'];

/// Width of the y-axis label gutter.
const GUTTER: usize = 9;

#[derive(Clone, Copy)]
struct Mark {
    glyph: char,
    color: usize,
}

fn rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(255)
    };
    (channel(0), channel(2), channel(4))
}

fn paint(mark: Mark) -> String {
    let (r, g, b) = rgb(PALETTE[mark.color % PALETTE.len()]);
    mark.glyph.to_string().truecolor(r, g, b).to_string()
}

/// Compact tick label.
fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 100.0 || value == value.trunc() {
        format!("{:.0}", value)
    } else if abs >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

/// Y range to plot: the fixed domain, or the data range padded so a flat
/// series still sits inside the grid.
fn y_range(chart: &Chart, values: &[Vec<Option<f64>>]) -> Option<(f64, f64)> {
    if let Some(domain) = chart.y_domain {
        return Some(domain);
    }
    let mut iter = values.iter().flatten().flatten().copied();
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if (max - min).abs() < f64::EPSILON {
        let pad = if max == 0.0 { 1.0 } else { max.abs() * 0.1 };
        Some((min - pad, max + pad))
    } else {
        Some((min, max))
    }
}

/// Renders one chart. `width` and `height` size the plot area.
pub fn render_chart(chart: &Chart, rows: &[ChartRow], width: usize, height: usize) -> String {
    let width = width.max(2);
    let height = height.max(2);
    let mut output = String::new();

    let _ = writeln!(output, "{}", chart.title.bold());
    let _ = writeln!(output, "{}", chart.description.dimmed());

    let values: Vec<Vec<Option<f64>>> = chart.series.iter().map(|s| s.values(rows)).collect();
    let Some((lo, hi)) = y_range(chart, &values).filter(|_| !rows.is_empty()) else {
        let _ = writeln!(output, "{}", "  (no data)".dimmed());
        return output;
    };

    let column = |i: usize| -> usize {
        if rows.len() == 1 {
            width / 2
        } else {
            i * (width - 1) / (rows.len() - 1)
        }
    };
    let line = |v: f64| -> usize {
        let ratio = ((hi - v) / (hi - lo)).clamp(0.0, 1.0);
        (ratio * (height - 1) as f64).round() as usize
    };

    let mut grid: Vec<Vec<Option<Mark>>> = vec![vec![None; width]; height];

    for (series, points) in chart.series.iter().zip(&values) {
        let dot = Mark {
            glyph: '·',
            color: series.color,
        };
        let marker = Mark {
            glyph: GLYPHS[series.color % GLYPHS.len()],
            color: series.color,
        };

        // Connectors first so markers win shared cells
        for (i, pair) in points.windows(2).enumerate() {
            if let [Some(a), Some(b)] = pair {
                let (x0, x1) = (column(i), column(i + 1));
                for x in x0 + 1..x1 {
                    let t = (x - x0) as f64 / (x1 - x0) as f64;
                    let y = line(a + (b - a) * t);
                    if grid[y][x].is_none() {
                        grid[y][x] = Some(dot);
                    }
                }
            }
        }
        for (i, point) in points.iter().enumerate() {
            if let Some(v) = point {
                grid[line(*v)][column(i)] = Some(marker);
            }
        }
    }

    for (r, cells) in grid.iter().enumerate() {
        let label = if r == 0 {
            format_tick(hi)
        } else if r == height - 1 {
            format_tick(lo)
        } else if r == (height - 1) / 2 {
            format_tick((hi + lo) / 2.0)
        } else {
            String::new()
        };
        let plotted: String = cells
            .iter()
            .map(|cell| match cell {
                Some(mark) => paint(*mark),
                None => " ".to_string(),
            })
            .collect();
        let _ = writeln!(output, "{:>w$} ┤{}", label, plotted, w = GUTTER - 2);
    }
    let _ = writeln!(output, "{:>w$} └{}", "", "─".repeat(width), w = GUTTER - 2);

    let first = rows.first().map(|r| r.date.as_str()).unwrap_or_default();
    let last = rows.last().map(|r| r.date.as_str()).unwrap_or_default();
    let axis = if rows.len() > 1 && first.len() + last.len() < width {
        format!("{}{}{}", first, " ".repeat(width - first.len() - last.len()), last)
    } else {
        first.to_string()
    };
    let _ = writeln!(output, "{:w$}{}", "", axis, w = GUTTER);

    let legend: Vec<String> = chart
        .series
        .iter()
        .map(|s| {
            let mark = Mark {
                glyph: GLYPHS[s.color % GLYPHS.len()],
                color: s.color,
            };
            format!("{} {}", paint(mark), s.label)
        })
        .collect();
    let _ = writeln!(output, "{:w$}{}", "", legend.join("   "), w = GUTTER);

    output
}

/// Renders every chart in the report, separated by blank lines.
pub fn render_charts(charts: &[Chart], rows: &[ChartRow], width: usize, height: usize) -> String {
    charts
        .iter()
        .map(|chart| render_chart(chart, rows, width, height))
        .collect::<Vec<_>>()
        .join("\n")
}
