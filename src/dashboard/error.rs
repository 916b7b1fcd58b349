//! Dashboard error types

use crate::client::ClientError;
use thiserror::Error;

/// Errors surfaced by the dashboard view.
///
/// `Unavailable` is the static "cannot reach the service" screen shown when
/// the page list cannot be loaded. Everything else is a blocking alert that
/// leaves the current view untouched.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Unable to connect to service.")]
    Unavailable(#[source] ClientError),

    /// A mutation or run failed on the service.
    #[error("{action}: {source}")]
    Action {
        action: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("Invalid {field}: {message}")]
    InvalidForm { field: String, message: String },

    #[error("Page not found: {0}")]
    UnknownPage(String),

    /// The requested transition does not apply to the current state.
    #[error("Nothing to {0}")]
    InvalidState(&'static str),
}

impl DashboardError {
    pub(crate) fn invalid_form(field: &str, message: &str) -> Self {
        DashboardError::InvalidForm {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Short text for the alert dialog.
    pub fn alert(&self) -> String {
        match self {
            DashboardError::Action { action, .. } => action.to_string(),
            other => other.to_string(),
        }
    }
}
