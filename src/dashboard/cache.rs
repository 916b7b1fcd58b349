//! Invalidate-on-write cache of the page list

use crate::client::{ClientError, LightkeeperApi};
use crate::model::Page;

/// Last fetched page list.
///
/// The service is the source of truth: every successful mutation calls
/// [`PageCache::invalidate`] and the next read re-fetches.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: Option<Vec<Page>>,
    stale: bool,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
        tracing::trace!("Page cache invalidated");
    }

    pub fn is_fresh(&self) -> bool {
        self.pages.is_some() && !self.stale
    }

    /// Cached pages without fetching, stale or not.
    pub fn cached(&self) -> Option<&[Page]> {
        self.pages.as_deref()
    }

    pub fn find(&self, id: &str) -> Option<&Page> {
        self.pages.as_ref()?.iter().find(|p| p.id == id)
    }

    /// Returns the page list, re-fetching when empty or stale.
    ///
    /// On failure the previous list (if any) is kept and stays stale.
    pub async fn pages(&mut self, api: &dyn LightkeeperApi) -> Result<&[Page], ClientError> {
        if !self.is_fresh() {
            let pages = api.list_pages().await?;
            tracing::debug!(count = pages.len(), "Fetched page list");
            self.pages = Some(pages);
            self.stale = false;
        }
        Ok(self.pages.as_deref().unwrap_or_default())
    }
}
