//! HTTP client for the Lightkeeper service
//!
//! Thin wrappers over the service's REST endpoints. There is no retry,
//! backoff or auth-header injection: every failure is returned to the caller
//! as a [`ClientError`].
//!
//! Views talk to the service through the [`LightkeeperApi`] trait so they can
//! be driven by an in-memory double in tests.

pub mod error;
#[cfg(test)]
pub(crate) mod testing;

pub use error::ClientError;

use crate::config::ApiConfig;
use crate::model::{
    AuditRecord, NewPage, Page, PageUpdate, RunFilter, RunResult, ServiceMessage,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Operations the dashboard needs from the service.
#[async_trait]
pub trait LightkeeperApi: Send + Sync {
    /// `GET /pages/`
    async fn list_pages(&self) -> Result<Vec<Page>, ClientError>;

    /// `GET /pages/{id}`
    async fn get_page(&self, id: &str) -> Result<Page, ClientError>;

    /// `POST /pages/`
    async fn create_page(&self, page: &NewPage) -> Result<Page, ClientError>;

    /// `PUT /pages/{id}` with only the fields set in `update`
    async fn update_page(&self, id: &str, update: &PageUpdate) -> Result<Page, ClientError>;

    /// `DELETE /pages/{id}`
    async fn delete_page(&self, id: &str) -> Result<(), ClientError>;

    /// `POST /run/{id}`: audit one page now and return its scores
    async fn run_audit(&self, id: &str) -> Result<RunResult, ClientError>;

    /// `POST /run`: audit every enabled page matching `filter`
    async fn run_all(&self, filter: &RunFilter) -> Result<ServiceMessage, ClientError>;

    /// `GET /audits/{id}`: full audit history, in whatever order the service
    /// returns it
    async fn page_audits(&self, id: &str) -> Result<Vec<AuditRecord>, ClientError>;

    /// `GET /`
    async fn ping(&self) -> Result<ServiceMessage, ClientError>;
}

/// FastAPI-style error body.
#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// reqwest-backed implementation of [`LightkeeperApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL without a trailing slash
    base_url: String,
    /// Parsed base that endpoint paths are appended to
    base: Url,
    client: Client,
    /// Per-request timeout, if any
    timeout: Option<Duration>,
}

impl ApiClient {
    /// Creates a client for `base_url`. A zero timeout disables the deadline.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            base: parsed,
            client,
            timeout: (!timeout.is_zero()).then_some(timeout),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for an endpoint. Each segment is percent-encoded, so an ID
    /// containing `/`, `?` or `#` stays a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: "cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    /// Sends the request, logs it, and maps transport and status failures.
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, ClientError> {
        let start = Instant::now();
        let response = builder.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();

        tracing::debug!(
            path = %path,
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Service request completed"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| match b.detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("unknown").to_string()
                } else {
                    body
                }
            });

        tracing::warn!(path = %path, status = status.as_u16(), error = %message, "Service request failed");

        if status == reqwest::StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(message))
        } else {
            Err(ClientError::Upstream {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn map_transport(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            let ms = self.timeout.map(|t| t.as_millis() as u64).unwrap_or(0);
            ClientError::Timeout(ms)
        } else {
            ClientError::Network(e.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let body = response.text().await.map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to read response body: {}", e))
        })?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        let response = self.send(self.request(Method::GET, url), &path).await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl LightkeeperApi for ApiClient {
    async fn list_pages(&self) -> Result<Vec<Page>, ClientError> {
        self.get_json(&["pages", ""]).await
    }

    async fn get_page(&self, id: &str) -> Result<Page, ClientError> {
        self.get_json(&["pages", id]).await
    }

    async fn create_page(&self, page: &NewPage) -> Result<Page, ClientError> {
        let url = self.endpoint(&["pages", ""])?;
        let path = url.path().to_string();
        let response = self
            .send(self.request(Method::POST, url).json(page), &path)
            .await?;
        let created: Page = Self::decode(response).await?;
        tracing::info!(id = %created.id, url = %created.url, "Page created");
        Ok(created)
    }

    async fn update_page(&self, id: &str, update: &PageUpdate) -> Result<Page, ClientError> {
        let url = self.endpoint(&["pages", id])?;
        let path = url.path().to_string();
        let response = self
            .send(self.request(Method::PUT, url).json(update), &path)
            .await?;
        Self::decode(response).await
    }

    async fn delete_page(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["pages", id])?;
        let path = url.path().to_string();
        self.send(self.request(Method::DELETE, url), &path).await?;
        tracing::info!(id = %id, "Page deleted");
        Ok(())
    }

    async fn run_audit(&self, id: &str) -> Result<RunResult, ClientError> {
        let url = self.endpoint(&["run", id])?;
        let path = url.path().to_string();
        tracing::info!(id = %id, "Triggering audit");
        let response = self.send(self.request(Method::POST, url), &path).await?;
        Self::decode(response).await
    }

    async fn run_all(&self, filter: &RunFilter) -> Result<ServiceMessage, ClientError> {
        let url = self.endpoint(&["run"])?;
        let path = url.path().to_string();
        let response = self
            .send(self.request(Method::POST, url).query(filter), &path)
            .await?;
        Self::decode(response).await
    }

    async fn page_audits(&self, id: &str) -> Result<Vec<AuditRecord>, ClientError> {
        self.get_json(&["audits", id]).await
    }

    async fn ping(&self) -> Result<ServiceMessage, ClientError> {
        self.get_json(&[""]).await
    }
}
