//! Chronological ordering and chart-row projection

use crate::model::{AuditRecord, MetricMap, MetricValue};
use serde::Serialize;

/// Short axis label format (`MM/dd HH:mm`).
pub const SHORT_LABEL_FORMAT: &str = "%m/%d %H:%M";

/// Full timestamp shown in legends and tables.
pub const FULL_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One audit flattened for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    /// Short x-axis label
    pub date: String,
    /// Full timestamp
    #[serde(rename = "fullDate")]
    pub full_date: String,
    pub psi: u32,
    pub seo: u32,
    /// Every metric of the audit, flattened into the row
    #[serde(flatten)]
    pub metrics: MetricMap,
}

impl ChartRow {
    pub fn from_record(record: &AuditRecord) -> Self {
        let (date, full_date) = match record.timestamp() {
            Some(ts) => (
                ts.format(SHORT_LABEL_FORMAT).to_string(),
                ts.format(FULL_LABEL_FORMAT).to_string(),
            ),
            None => (record.created_at.clone(), record.created_at.clone()),
        };

        Self {
            date,
            full_date,
            psi: record.psi_score,
            seo: record.seo_score,
            metrics: record.metrics.clone(),
        }
    }

    /// Value of a metric in this row, if the audit reported it.
    pub fn metric(&self, key: &str) -> Option<MetricValue> {
        self.metrics.get(key).and_then(MetricValue::from_json)
    }
}

/// Sorts audits oldest first.
///
/// The sort is stable, so audits sharing a timestamp keep their fetch order.
/// Audits whose timestamp cannot be parsed sort before all others.
pub fn sort_chronologically(records: &mut [AuditRecord]) {
    records.sort_by_key(|r| r.timestamp());
}

/// Projects sorted audits into chart rows.
pub fn chart_rows(sorted: &[AuditRecord]) -> Vec<ChartRow> {
    sorted.iter().map(ChartRow::from_record).collect()
}
