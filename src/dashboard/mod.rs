//! Dashboard view: the monitored-page list and its actions
//!
//! [`Dashboard`] owns the page-list cache and the [`UiState`] union. Every
//! action follows the same flow: call the service, and on success invalidate
//! the cache so the next render re-fetches the list. Failures leave both the
//! cache and the UI state as they were.
//!
//! The controller is rendering-agnostic; the `lightkeeper dashboard` command
//! drives it from an interactive terminal session.

pub mod cache;
pub mod error;
pub mod state;

pub use cache::PageCache;
pub use error::DashboardError;
pub use state::{ModalMode, PageForm, UiState};

use crate::client::LightkeeperApi;
use crate::model::{Page, PageUpdate, RunResult};
use std::sync::Arc;

pub struct Dashboard {
    api: Arc<dyn LightkeeperApi>,
    cache: PageCache,
    state: UiState,
}

impl Dashboard {
    pub fn new(api: Arc<dyn LightkeeperApi>) -> Self {
        Self {
            api,
            cache: PageCache::new(),
            state: UiState::Idle,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn api(&self) -> &dyn LightkeeperApi {
        self.api.as_ref()
    }

    /// Last fetched list, without touching the service.
    pub fn cached_pages(&self) -> Option<&[Page]> {
        self.cache.cached()
    }

    /// Whether the next [`Dashboard::pages`] call is served from cache.
    pub fn is_fresh(&self) -> bool {
        self.cache.is_fresh()
    }

    /// Page list, re-fetched if a mutation invalidated it.
    pub async fn pages(&mut self) -> Result<&[Page], DashboardError> {
        self.cache
            .pages(self.api.as_ref())
            .await
            .map_err(DashboardError::Unavailable)
    }

    async fn find_page(&mut self, page_id: &str) -> Result<Page, DashboardError> {
        self.pages().await?;
        self.cache
            .find(page_id)
            .cloned()
            .ok_or_else(|| DashboardError::UnknownPage(page_id.to_string()))
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        tracing::debug!("Opening create form");
        self.state = UiState::ModalOpen {
            mode: ModalMode::Create,
            prefill: PageForm::default(),
        };
    }

    /// Opens the edit form preloaded with the page's current settings.
    pub async fn open_edit(&mut self, page_id: &str) -> Result<(), DashboardError> {
        let page = self.find_page(page_id).await?;
        tracing::debug!(page_id = %page_id, "Opening edit form");
        self.state = UiState::ModalOpen {
            mode: ModalMode::Edit {
                page_id: page.id.clone(),
                is_enabled: page.is_enabled,
            },
            prefill: PageForm::from(&page),
        };
        Ok(())
    }

    /// Mutable access to the open form's fields.
    pub fn form_mut(&mut self) -> Option<&mut PageForm> {
        match &mut self.state {
            UiState::ModalOpen { prefill, .. } => Some(prefill),
            _ => None,
        }
    }

    pub fn close_modal(&mut self) {
        if matches!(self.state, UiState::ModalOpen { .. }) {
            self.state = UiState::Idle;
        }
    }

    /// Submits the open form as a create or an update.
    ///
    /// On success the modal closes and the list is invalidated. On failure
    /// the modal stays open with the user's input intact.
    pub async fn submit(&mut self) -> Result<Page, DashboardError> {
        let (mode, form) = match &self.state {
            UiState::ModalOpen { mode, prefill } => (mode.clone(), prefill.clone()),
            _ => return Err(DashboardError::InvalidState("submit")),
        };
        form.validate()?;

        let result = match &mode {
            ModalMode::Create => self.api.create_page(&form.into_new_page()).await,
            ModalMode::Edit {
                page_id,
                is_enabled,
            } => {
                self.api
                    .update_page(page_id, &form.into_update(*is_enabled))
                    .await
            }
        };

        let page = result.map_err(|source| DashboardError::Action {
            action: "Error saving page",
            source,
        })?;

        tracing::info!(page_id = %page.id, mode = ?mode, "Page saved");
        self.state = UiState::Idle;
        self.cache.invalidate();
        Ok(page)
    }

    /// Flips a page's enabled flag.
    pub async fn toggle(&mut self, page_id: &str) -> Result<Page, DashboardError> {
        let page = self.find_page(page_id).await?;
        let updated = self
            .api
            .update_page(page_id, &PageUpdate::enabled(!page.is_enabled))
            .await
            .map_err(|source| DashboardError::Action {
                action: "Error updating page",
                source,
            })?;

        tracing::info!(page_id = %page_id, enabled = !page.is_enabled, "Page toggled");
        self.cache.invalidate();
        Ok(updated)
    }

    /// First step of a delete: ask for confirmation.
    pub fn request_delete(&mut self, page_id: &str) {
        self.state = UiState::ConfirmingDelete {
            page_id: page_id.to_string(),
        };
    }

    /// Second step of a delete. Returns the deleted page's id.
    ///
    /// The confirmation is consumed either way; a failed delete returns to
    /// the list without invalidating it.
    pub async fn confirm_delete(&mut self) -> Result<String, DashboardError> {
        let page_id = match &self.state {
            UiState::ConfirmingDelete { page_id } => page_id.clone(),
            _ => return Err(DashboardError::InvalidState("delete")),
        };
        self.state = UiState::Idle;

        self.api
            .delete_page(&page_id)
            .await
            .map_err(|source| DashboardError::Action {
                action: "Error deleting page",
                source,
            })?;

        self.cache.invalidate();
        Ok(page_id)
    }

    /// Abandons a pending delete confirmation or an open form.
    pub fn cancel(&mut self) {
        if matches!(
            self.state,
            UiState::ConfirmingDelete { .. } | UiState::ModalOpen { .. }
        ) {
            self.state = UiState::Idle;
        }
    }

    /// Runs an audit now and shows its result.
    ///
    /// A completed run replaces whatever result was on screen.
    pub async fn run_audit(&mut self, page_id: &str) -> Result<RunResult, DashboardError> {
        let result = self
            .api
            .run_audit(page_id)
            .await
            .map_err(|source| DashboardError::Action {
                action: "Failed to start audit",
                source,
            })?;

        tracing::info!(
            page_id = %page_id,
            psi = result.psi_score,
            seo = result.seo_score,
            "Audit completed"
        );
        self.state = UiState::ResultShown {
            page_id: page_id.to_string(),
            result: result.clone(),
        };
        Ok(result)
    }

    pub fn dismiss_result(&mut self) {
        if matches!(self.state, UiState::ResultShown { .. }) {
            self.state = UiState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::MemoryApi;
    use crate::model::DeviceType;

    fn dashboard_with(api: Arc<MemoryApi>) -> Dashboard {
        Dashboard::new(api)
    }

    #[tokio::test]
    async fn test_pages_fetches_once_until_invalidated() {
        let api = Arc::new(MemoryApi::with_pages(vec![MemoryApi::page("p1", "Home")]));
        let mut dashboard = dashboard_with(api.clone());

        assert_eq!(dashboard.pages().await.unwrap().len(), 1);
        dashboard.pages().await.unwrap();
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_pages_failure_is_unavailable() {
        let api = Arc::new(MemoryApi::default());
        api.fail("list_pages");
        let mut dashboard = dashboard_with(api);

        let err = dashboard.pages().await.unwrap_err();
        assert!(matches!(err, DashboardError::Unavailable(_)));
        assert_eq!(err.to_string(), "Unable to connect to service.");
    }

    #[tokio::test]
    async fn test_create_round_trips_device() {
        let api = Arc::new(MemoryApi::default());
        let mut dashboard = dashboard_with(api.clone());

        dashboard.open_create();
        {
            let form = dashboard.form_mut().unwrap();
            form.name = "Checkout".to_string();
            form.url = "https://shop.example.com/checkout".to_string();
            form.device = DeviceType::Mobile;
        }
        dashboard.submit().await.unwrap();

        assert!(dashboard.state().is_idle());
        let pages = dashboard.pages().await.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].device, DeviceType::Mobile);
        assert!(pages[0].is_enabled);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_keeps_modal_open() {
        let api = Arc::new(MemoryApi::default());
        let mut dashboard = dashboard_with(api.clone());

        dashboard.open_create();
        let err = dashboard.submit().await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidForm { .. }));
        assert!(matches!(dashboard.state(), UiState::ModalOpen { .. }));
        assert_eq!(api.page_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_modal_and_cache() {
        let api = Arc::new(MemoryApi::with_pages(vec![MemoryApi::page("p1", "Home")]));
        let mut dashboard = dashboard_with(api.clone());
        dashboard.pages().await.unwrap();

        dashboard.open_create();
        {
            let form = dashboard.form_mut().unwrap();
            form.name = "Blog".to_string();
            form.url = "https://example.com/blog".to_string();
        }
        api.fail("create_page");
        let err = dashboard.submit().await.unwrap_err();
        assert_eq!(err.alert(), "Error saving page");
        assert!(matches!(dashboard.state(), UiState::ModalOpen { .. }));

        // No invalidation, so no re-fetch
        dashboard.pages().await.unwrap();
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_edit_prefills_and_preserves_enabled() {
        let mut page = MemoryApi::page("p1", "Home");
        page.is_enabled = false;
        let api = Arc::new(MemoryApi::with_pages(vec![page]));
        let mut dashboard = dashboard_with(api.clone());

        dashboard.open_edit("p1").await.unwrap();
        match dashboard.state() {
            UiState::ModalOpen { mode, prefill } => {
                assert_eq!(prefill.name, "Home");
                assert!(matches!(mode, ModalMode::Edit { is_enabled: false, .. }));
            }
            other => panic!("Expected ModalOpen, got {:?}", other),
        }

        dashboard.form_mut().unwrap().name = "Homepage".to_string();
        let saved = dashboard.submit().await.unwrap();
        assert_eq!(saved.name, "Homepage");
        assert!(!saved.is_enabled);
    }

    #[tokio::test]
    async fn test_open_edit_unknown_page() {
        let api = Arc::new(MemoryApi::default());
        let mut dashboard = dashboard_with(api);
        let err = dashboard.open_edit("nope").await.unwrap_err();
        assert!(matches!(err, DashboardError::UnknownPage(_)));
        assert!(dashboard.state().is_idle());
    }

    #[tokio::test]
    async fn test_toggle_flips_enabled_and_refetches() {
        let api = Arc::new(MemoryApi::with_pages(vec![MemoryApi::page("p1", "Home")]));
        let mut dashboard = dashboard_with(api.clone());

        dashboard.toggle("p1").await.unwrap();
        let pages = dashboard.pages().await.unwrap();
        assert!(!pages[0].is_enabled);
        assert_eq!(api.list_calls(), 2);

        dashboard.toggle("p1").await.unwrap();
        assert!(dashboard.pages().await.unwrap()[0].is_enabled);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let api = Arc::new(MemoryApi::with_pages(vec![MemoryApi::page("p1", "Home")]));
        let mut dashboard = dashboard_with(api.clone());

        assert!(matches!(
            dashboard.confirm_delete().await,
            Err(DashboardError::InvalidState(_))
        ));

        dashboard.request_delete("p1");
        dashboard.cancel();
        assert!(dashboard.state().is_idle());
        assert_eq!(api.page_count(), 1);

        dashboard.request_delete("p1");
        assert_eq!(dashboard.confirm_delete().await.unwrap(), "p1");
        assert!(dashboard.pages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_result_overwrites_previous() {
        let api = Arc::new(MemoryApi::with_pages(vec![
            MemoryApi::page("p1", "Home"),
            MemoryApi::page("p2", "Blog"),
        ]));
        let mut dashboard = dashboard_with(api);

        dashboard.run_audit("p1").await.unwrap();
        dashboard.run_audit("p2").await.unwrap();
        let (page_id, _) = dashboard.state().run_result().unwrap();
        assert_eq!(page_id, "p2");

        dashboard.dismiss_result();
        assert!(dashboard.state().is_idle());
    }

    #[tokio::test]
    async fn test_run_failure_leaves_state_intact() {
        let api = Arc::new(MemoryApi::with_pages(vec![MemoryApi::page("p1", "Home")]));
        let mut dashboard = dashboard_with(api.clone());

        dashboard.run_audit("p1").await.unwrap();
        api.fail("run_audit");
        let err = dashboard.run_audit("p1").await.unwrap_err();
        assert_eq!(err.alert(), "Failed to start audit");
        assert!(dashboard.state().run_result().is_some());
    }
}
