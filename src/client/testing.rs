//! In-memory service double for unit tests.

use super::{ClientError, LightkeeperApi};
use crate::model::{
    AuditRecord, DeviceType, MetricMap, NewPage, Page, PageUpdate, RunFilter, RunResult,
    ServiceMessage,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Behaves like the service for the subset of semantics the views rely on.
#[derive(Default)]
pub struct MemoryApi {
    pages: Mutex<Vec<Page>>,
    audits: Mutex<HashMap<String, Vec<AuditRecord>>>,
    failing: Mutex<HashSet<&'static str>>,
    list_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MemoryApi {
    pub fn with_pages(pages: Vec<Page>) -> Self {
        Self {
            pages: Mutex::new(pages),
            ..Self::default()
        }
    }

    pub fn page(id: &str, name: &str) -> Page {
        Page {
            id: id.to_string(),
            created_at: "2024-10-01T09:00:00".to_string(),
            is_enabled: true,
            url: format!("https://example.com/{}", id),
            name: name.to_string(),
            env: "prod".to_string(),
            device: DeviceType::Desktop,
            benchmark_score: 90,
            threshold_percentage: 10,
            auth: None,
        }
    }

    pub fn set_audits(&self, page_id: &str, audits: Vec<AuditRecord>) {
        self.audits
            .lock()
            .unwrap()
            .insert(page_id.to_string(), audits);
    }

    /// Makes every later call to `op` fail with a 500.
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn page_count(&self) -> usize {
        self.pages.lock().unwrap().len()
    }

    fn check(&self, op: &'static str) -> Result<(), ClientError> {
        if self.failing.lock().unwrap().contains(op) {
            return Err(ClientError::Upstream {
                status: 500,
                message: format!("{} failed", op),
            });
        }
        Ok(())
    }

    fn not_found() -> ClientError {
        ClientError::NotFound("Page not found".to_string())
    }
}

#[async_trait]
impl LightkeeperApi for MemoryApi {
    async fn list_pages(&self) -> Result<Vec<Page>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check("list_pages")?;
        Ok(self.pages.lock().unwrap().clone())
    }

    async fn get_page(&self, id: &str) -> Result<Page, ClientError> {
        self.check("get_page")?;
        self.pages
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_page(&self, page: &NewPage) -> Result<Page, ClientError> {
        self.check("create_page")?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Page {
            id: format!("page-{}", n),
            created_at: "2024-10-01T09:00:00".to_string(),
            is_enabled: page.is_enabled,
            url: page.url.clone(),
            name: page.name.clone(),
            env: page.env.clone(),
            device: page.device,
            benchmark_score: page.benchmark_score,
            threshold_percentage: page.threshold_percentage,
            auth: page.auth.clone(),
        };
        self.pages.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_page(&self, id: &str, update: &PageUpdate) -> Result<Page, ClientError> {
        self.check("update_page")?;
        let mut pages = self.pages.lock().unwrap();
        let page = pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)?;
        if let Some(v) = update.is_enabled {
            page.is_enabled = v;
        }
        if let Some(v) = &update.url {
            page.url = v.clone();
        }
        if let Some(v) = &update.name {
            page.name = v.clone();
        }
        if let Some(v) = &update.env {
            page.env = v.clone();
        }
        if let Some(v) = update.device {
            page.device = v;
        }
        if let Some(v) = update.benchmark_score {
            page.benchmark_score = v;
        }
        if let Some(v) = update.threshold_percentage {
            page.threshold_percentage = v;
        }
        if let Some(v) = &update.auth {
            page.auth = Some(v.clone());
        }
        Ok(page.clone())
    }

    async fn delete_page(&self, id: &str) -> Result<(), ClientError> {
        self.check("delete_page")?;
        let mut pages = self.pages.lock().unwrap();
        let before = pages.len();
        pages.retain(|p| p.id != id);
        if pages.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn run_audit(&self, id: &str) -> Result<RunResult, ClientError> {
        self.check("run_audit")?;
        let mut metrics = MetricMap::new();
        metrics.insert("first_contentful_paint".to_string(), 1200.into());
        metrics.insert("cumulative_layout_shift".to_string(), 0.05.into());
        Ok(RunResult {
            psi_score: 80,
            seo_score: 95,
            metrics,
            url: Some(format!("https://example.com/{}", id)),
            created_at: None,
        })
    }

    async fn run_all(&self, _filter: &RunFilter) -> Result<ServiceMessage, ClientError> {
        self.check("run_all")?;
        Ok(ServiceMessage {
            message: "audits ran successfully".to_string(),
        })
    }

    async fn page_audits(&self, id: &str) -> Result<Vec<AuditRecord>, ClientError> {
        self.check("page_audits")?;
        match self.audits.lock().unwrap().get(id) {
            Some(audits) if !audits.is_empty() => Ok(audits.clone()),
            _ => Err(Self::not_found()),
        }
    }

    async fn ping(&self) -> Result<ServiceMessage, ClientError> {
        self.check("ping")?;
        Ok(ServiceMessage {
            message: "pong".to_string(),
        })
    }
}
