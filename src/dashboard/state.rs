//! Dashboard UI state
//!
//! A single union replaces independent "modal open", "edit mode",
//! "selected page" and "run result" flags, so impossible combinations
//! (an edit modal without a page, a result without its page) cannot be
//! represented.

use super::error::DashboardError;
use crate::model::{DeviceType, NewPage, Page, PageUpdate, RunResult};
use serde::Serialize;

/// What the create/edit modal is doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalMode {
    Create,
    /// Editing an existing page. The enabled flag is carried so the
    /// submit does not silently re-enable a disabled page.
    Edit { page_id: String, is_enabled: bool },
}

/// The fields of the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageForm {
    pub name: String,
    pub url: String,
    pub env: String,
    pub device: DeviceType,
    pub benchmark_score: u32,
    pub threshold_percentage: u32,
}

impl Default for PageForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            env: "prod".to_string(),
            device: DeviceType::Desktop,
            benchmark_score: 90,
            threshold_percentage: 10,
        }
    }
}

impl From<&Page> for PageForm {
    fn from(page: &Page) -> Self {
        Self {
            name: page.name.clone(),
            url: page.url.clone(),
            env: page.env.clone(),
            device: page.device,
            benchmark_score: page.benchmark_score,
            threshold_percentage: page.threshold_percentage,
        }
    }
}

impl PageForm {
    /// Checks required fields and ranges.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.name.trim().is_empty() {
            return Err(DashboardError::invalid_form("name", "is required"));
        }
        if self.url.trim().is_empty() {
            return Err(DashboardError::invalid_form("url", "is required"));
        }
        match reqwest::Url::parse(self.url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(_) => return Err(DashboardError::invalid_form("url", "must be http or https")),
            Err(e) => return Err(DashboardError::invalid_form("url", &e.to_string())),
        }
        if self.benchmark_score > 100 {
            return Err(DashboardError::invalid_form("benchmarkScore", "must be between 0 and 100"));
        }
        if self.threshold_percentage > 100 {
            return Err(DashboardError::invalid_form(
                "thresholdPercentage",
                "must be between 0 and 100",
            ));
        }
        Ok(())
    }

    pub fn into_new_page(self) -> NewPage {
        NewPage {
            is_enabled: true,
            url: self.url.trim().to_string(),
            name: self.name.trim().to_string(),
            env: self.env,
            device: self.device,
            benchmark_score: self.benchmark_score,
            threshold_percentage: self.threshold_percentage,
            auth: None,
        }
    }

    /// Full update carrying every form field plus the preserved enabled flag.
    pub fn into_update(self, is_enabled: bool) -> PageUpdate {
        let mut page = self.into_new_page();
        page.is_enabled = is_enabled;
        PageUpdate::from(page)
    }
}

/// Everything the dashboard can be showing besides the list itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UiState {
    /// Only the page list
    #[default]
    Idle,
    /// Create/edit form, with its current field values
    ModalOpen { mode: ModalMode, prefill: PageForm },
    /// Waiting for the user to confirm a delete
    ConfirmingDelete { page_id: String },
    /// Result of the most recent run, keyed to the page that triggered it
    ResultShown { page_id: String, result: RunResult },
}

impl UiState {
    pub fn is_idle(&self) -> bool {
        matches!(self, UiState::Idle)
    }

    /// Result currently on screen, if any.
    pub fn run_result(&self) -> Option<(&str, &RunResult)> {
        match self {
            UiState::ResultShown { page_id, result } => Some((page_id.as_str(), result)),
            _ => None,
        }
    }
}
