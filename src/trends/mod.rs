//! Trends view: audit history shaped for charts
//!
//! The pipeline is pure:
//!
//! 1. sort the fetched audits oldest first,
//! 2. project each audit into a [`ChartRow`],
//! 3. collect metric keys in first-appearance order,
//! 4. bucket the keys into layout stability, paint timing and other,
//! 5. emit a chart per non-empty bucket plus the headline score chart.
//!
//! "Latest" scores always come from the chronologically last audit, never
//! from the first element the service happened to return.

pub mod classify;
pub mod series;

pub use classify::{collect_metric_keys, partition_metric_keys, MetricBuckets, MetricCategory};
pub use series::{chart_rows, sort_chronologically, ChartRow};

use crate::client::{ClientError, LightkeeperApi};
use crate::model::{AuditRecord, Page};
use serde::Serialize;

/// Series palette, cycled by series index within a chart.
pub const PALETTE: [&str; 6] = [
    "#2563eb", "#0891b2", "#d97706", "#db2777", "#7c3aed", "#059669",
];

/// Which chart a [`Chart`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// PSI and SEO, always rendered
    Scores,
    Metrics(MetricCategory),
}

/// Where a series reads its values from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSource {
    Psi,
    Seo,
    Metric(String),
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub source: SeriesSource,
    /// Legend label
    pub label: String,
    /// Index into [`PALETTE`]
    pub color: usize,
}

impl Series {
    /// Numeric values per row. Missing or textual metrics are `None`.
    pub fn values(&self, rows: &[ChartRow]) -> Vec<Option<f64>> {
        rows.iter()
            .map(|row| match &self.source {
                SeriesSource::Psi => Some(f64::from(row.psi)),
                SeriesSource::Seo => Some(f64::from(row.seo)),
                SeriesSource::Metric(key) => row.metric(key).and_then(|v| v.as_f64()),
            })
            .collect()
    }
}

/// A line chart over the report's rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub description: String,
    pub series: Vec<Series>,
    /// Fixed y-axis domain; `None` scales to the data
    pub y_domain: Option<(f64, f64)>,
}

impl Chart {
    /// Headline PSI/SEO chart on a fixed 0-100 axis.
    pub fn scores() -> Self {
        Self {
            kind: ChartKind::Scores,
            title: "Core Scores History".to_string(),
            description: "Trend of PSI (Performance) and SEO scores over time.".to_string(),
            series: vec![
                Series {
                    source: SeriesSource::Psi,
                    label: "PSI Score".to_string(),
                    color: 5,
                },
                Series {
                    source: SeriesSource::Seo,
                    label: "SEO Score".to_string(),
                    color: 0,
                },
            ],
            y_domain: Some((0.0, 100.0)),
        }
    }

    /// Chart for one metric bucket, or `None` when the bucket is empty.
    pub fn metrics(category: MetricCategory, keys: &[String]) -> Option<Self> {
        if keys.is_empty() {
            return None;
        }

        let (title, description) = match category {
            MetricCategory::LayoutStability => (
                "Layout Stability (CLS)",
                "Cumulative Layout Shift measures visual stability.",
            ),
            MetricCategory::PaintTiming => (
                "Paint Timing (Loading)",
                "First Contentful Paint & Largest Contentful Paint.",
            ),
            MetricCategory::Other => (
                "Interactivity & Others",
                "Total Blocking Time, Speed Index, and miscellaneous metrics.",
            ),
        };

        let series = keys
            .iter()
            .enumerate()
            .map(|(i, key)| Series {
                source: SeriesSource::Metric(key.clone()),
                label: series_label(key),
                color: i % PALETTE.len(),
            })
            .collect();

        Some(Self {
            kind: ChartKind::Metrics(category),
            title: title.to_string(),
            description: description.to_string(),
            series,
            y_domain: None,
        })
    }
}

/// Legend label for a metric key: dashes become spaces.
pub fn series_label(key: &str) -> String {
    key.replace('-', " ")
}

/// Coarse quality band for a performance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// 90 and above
    Good,
    /// 50 to 89
    NeedsImprovement,
    /// Below 50
    Poor,
}

impl ScoreBand {
    pub fn of(score: u32) -> Self {
        if score >= 90 {
            ScoreBand::Good
        } else if score >= 50 {
            ScoreBand::NeedsImprovement
        } else {
            ScoreBand::Poor
        }
    }
}

/// Header values from the most recent audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestScores {
    pub psi: u32,
    pub seo: u32,
    pub band: ScoreBand,
    pub created_at: String,
}

impl From<&AuditRecord> for LatestScores {
    fn from(record: &AuditRecord) -> Self {
        Self {
            psi: record.psi_score,
            seo: record.seo_score,
            band: ScoreBand::of(record.psi_score),
            created_at: record.created_at.clone(),
        }
    }
}

/// Everything the trends view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsReport {
    /// Page metadata, when it could be fetched
    pub page: Option<Page>,
    /// Rows in chronological order
    pub rows: Vec<ChartRow>,
    pub buckets: MetricBuckets,
    pub latest: Option<LatestScores>,
    /// Score chart first, then one chart per non-empty bucket
    pub charts: Vec<Chart>,
}

impl TrendsReport {
    /// Runs the pipeline over audits in fetch order.
    pub fn build(page: Option<Page>, mut audits: Vec<AuditRecord>) -> Self {
        sort_chronologically(&mut audits);

        let rows = chart_rows(&audits);
        let keys = collect_metric_keys(&audits);
        let buckets = partition_metric_keys(&keys);
        let latest = audits.last().map(LatestScores::from);

        let mut charts = vec![Chart::scores()];
        charts.extend(
            [
                MetricCategory::LayoutStability,
                MetricCategory::PaintTiming,
                MetricCategory::Other,
            ]
            .into_iter()
            .filter_map(|category| Chart::metrics(category, buckets.get(category))),
        );

        tracing::debug!(
            audits = rows.len(),
            metric_keys = keys.len(),
            charts = charts.len(),
            "Built trends report"
        );

        Self {
            page,
            rows,
            buckets,
            latest,
            charts,
        }
    }
}

/// Fetches a page and its audit history and builds the report.
///
/// The two requests are independent. A page that cannot be fetched leaves
/// `page` empty, and a history that cannot be fetched is treated as empty
/// (the service answers 404 for a page with no audits yet). Only
/// connectivity failures propagate.
pub async fn load_trends(api: &dyn LightkeeperApi, page_id: &str) -> Result<TrendsReport, ClientError> {
    let (page, audits) = tokio::join!(api.get_page(page_id), api.page_audits(page_id));

    let page = match page {
        Ok(page) => Some(page),
        Err(e) if e.is_connectivity() => return Err(e),
        Err(e) => {
            tracing::warn!(page_id = %page_id, error = %e, "Page details unavailable");
            None
        }
    };

    let audits = match audits {
        Ok(audits) => audits,
        Err(ClientError::NotFound(_)) => {
            tracing::debug!(page_id = %page_id, "No audit history yet");
            Vec::new()
        }
        Err(e) if e.is_connectivity() => return Err(e),
        Err(e) => {
            tracing::warn!(page_id = %page_id, error = %e, "Audit history unavailable");
            Vec::new()
        }
    };

    Ok(TrendsReport::build(page, audits))
}
