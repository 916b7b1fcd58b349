use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device class a page is audited as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Mobile emulation
    Mobile,
    /// Desktop viewport
    Desktop,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mobile" => Ok(DeviceType::Mobile),
            "desktop" => Ok(DeviceType::Desktop),
            _ => Err(format!("Invalid device: {}. Use: mobile, desktop", s)),
        }
    }
}

/// A monitored page as owned by the remote service.
///
/// Field names follow the service's JSON contract, which mixes camelCase
/// page settings with snake_case bookkeeping fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Service-assigned identity
    #[serde(rename = "_id")]
    pub id: String,
    /// Creation timestamp as reported by the service
    #[serde(default)]
    pub created_at: String,
    /// Whether scheduled audits run for this page
    #[serde(rename = "isEnabled")]
    pub is_enabled: bool,
    /// Target URL
    pub url: String,
    /// Display name
    pub name: String,
    /// Environment label (e.g. "production", "staging")
    pub env: String,
    pub device: DeviceType,
    /// Expected performance score
    #[serde(rename = "benchmarkScore")]
    pub benchmark_score: u32,
    /// Acceptable deviation from the benchmark, in percent
    #[serde(rename = "thresholdPercentage")]
    pub threshold_percentage: u32,
    /// Opaque auth configuration passed through to the auditor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<serde_json::Value>,
}

/// Create payload: a page without identity or creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPage {
    #[serde(rename = "isEnabled")]
    pub is_enabled: bool,
    pub url: String,
    pub name: String,
    pub env: String,
    pub device: DeviceType,
    #[serde(rename = "benchmarkScore")]
    pub benchmark_score: u32,
    #[serde(rename = "thresholdPercentage")]
    pub threshold_percentage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<serde_json::Value>,
}

/// Partial update. Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageUpdate {
    #[serde(rename = "isEnabled", skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceType>,
    #[serde(rename = "benchmarkScore", skip_serializing_if = "Option::is_none")]
    pub benchmark_score: Option<u32>,
    #[serde(
        rename = "thresholdPercentage",
        skip_serializing_if = "Option::is_none"
    )]
    pub threshold_percentage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<serde_json::Value>,
}

impl PageUpdate {
    /// Update that only flips the enabled flag.
    pub fn enabled(is_enabled: bool) -> Self {
        Self {
            is_enabled: Some(is_enabled),
            ..Self::default()
        }
    }

    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.is_enabled.is_none()
            && self.url.is_none()
            && self.name.is_none()
            && self.env.is_none()
            && self.device.is_none()
            && self.benchmark_score.is_none()
            && self.threshold_percentage.is_none()
            && self.auth.is_none()
    }
}

impl From<NewPage> for PageUpdate {
    fn from(page: NewPage) -> Self {
        Self {
            is_enabled: Some(page.is_enabled),
            url: Some(page.url),
            name: Some(page.name),
            env: Some(page.env),
            device: Some(page.device),
            benchmark_score: Some(page.benchmark_score),
            threshold_percentage: Some(page.threshold_percentage),
            auth: page.auth,
        }
    }
}
