//! Metric key classification
//!
//! Keys are partitioned by sequential filter: the layout-stability rule is
//! applied first and whatever it claims is never offered to the paint-timing
//! rule. A key such as `cumulative_paint_shift` therefore only ever shows up
//! under layout stability.

use crate::model::AuditRecord;
use serde::Serialize;
use std::collections::HashSet;

/// Chart category a metric key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// CLS and friends
    LayoutStability,
    /// FCP, LCP and other paint timings
    PaintTiming,
    /// Everything else (TBT, speed index, TTI, ...)
    Other,
}

impl MetricCategory {
    /// Classifies a single key. Matching is a case-insensitive substring test.
    pub fn of(key: &str) -> Self {
        let key = key.to_lowercase();
        if key.contains("cumulative") || key.contains("shift") {
            MetricCategory::LayoutStability
        } else if key.contains("paint") || key.contains("contentful") {
            MetricCategory::PaintTiming
        } else {
            MetricCategory::Other
        }
    }
}

/// Metric keys split into the three chart categories. Each key appears in
/// exactly one bucket, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricBuckets {
    pub layout_stability: Vec<String>,
    pub paint_timing: Vec<String>,
    pub other: Vec<String>,
}

impl MetricBuckets {
    pub fn get(&self, category: MetricCategory) -> &[String] {
        match category {
            MetricCategory::LayoutStability => &self.layout_stability,
            MetricCategory::PaintTiming => &self.paint_timing,
            MetricCategory::Other => &self.other,
        }
    }

    pub fn len(&self) -> usize {
        self.layout_stability.len() + self.paint_timing.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every metric key seen across `records`, deduplicated, in order of first
/// appearance.
pub fn collect_metric_keys(records: &[AuditRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for record in records {
        for key in record.metrics.keys() {
            if seen.insert(key.as_str()) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// Partitions keys into buckets, preserving input order within each bucket.
pub fn partition_metric_keys(keys: &[String]) -> MetricBuckets {
    let mut buckets = MetricBuckets::default();
    for key in keys {
        match MetricCategory::of(key) {
            MetricCategory::LayoutStability => buckets.layout_stability.push(key.clone()),
            MetricCategory::PaintTiming => buckets.paint_timing.push(key.clone()),
            MetricCategory::Other => buckets.other.push(key.clone()),
        }
    }
    buckets
}
