use super::page::DeviceType;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Metric name to value, in the order the service reported them.
pub type MetricMap = serde_json::Map<String, Value>;

/// One completed audit of a monitored page. Produced by the service, never
/// by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// Identity of the owning page
    pub page_id: String,
    /// Audit timestamp as reported by the service
    pub created_at: String,
    /// Final URL after redirects
    #[serde(default)]
    pub url: String,
    pub device: DeviceType,
    /// Performance score, 0-100
    pub psi_score: u32,
    /// SEO score, 0-100
    pub seo_score: u32,
    #[serde(default)]
    pub metrics: MetricMap,
}

impl AuditRecord {
    /// Parsed `created_at`, or `None` when the service sent something
    /// unparseable.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }
}

/// Response of an on-demand audit run.
///
/// The service answers with a full audit record, but only the scores and
/// metrics are guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub psi_score: u32,
    pub seo_score: u32,
    #[serde(default)]
    pub metrics: MetricMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Filters for a bulk run over enabled pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

/// Plain `{"message": ...}` acknowledgement used by `/` and `/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceMessage {
    pub message: String,
}

/// A single metric value. The service mostly reports numbers but the
/// mapping is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Converts a raw JSON value. `null` carries no value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => n.as_f64().map(MetricValue::Number),
            Value::String(s) => Some(MetricValue::Text(s.clone())),
            other => Some(MetricValue::Text(other.to_string())),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parses the service's ISO 8601 timestamps as local wall-clock time.
///
/// Naive values (the service's default) are read as local time.
/// Offset-qualified values are converted to the local zone so both kinds
/// order and label consistently.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
