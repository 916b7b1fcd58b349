//! Shared test utilities for Lightkeeper integration tests.
//!
//! Builders for the service's JSON documents and a client pointed at a
//! wiremock server.

#![allow(dead_code)]

use lightkeeper::client::ApiClient;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

// =============================================================================
// Service Documents
// =============================================================================

/// A page document as the service returns it.
pub fn page_json(id: &str, name: &str, device: &str, enabled: bool) -> Value {
    json!({
        "_id": id,
        "created_at": "2024-10-01T09:00:00.123000",
        "isEnabled": enabled,
        "url": format!("https://example.com/{}", id),
        "name": name,
        "env": "prod",
        "device": device,
        "benchmarkScore": 90,
        "thresholdPercentage": 10,
        "auth": null
    })
}

/// An audit record with PSI/SEO scores and a metric map.
pub fn audit_json(page_id: &str, created_at: &str, psi: u32, seo: u32, metrics: Value) -> Value {
    json!({
        "_id": format!("{}-{}", page_id, created_at),
        "page_id": page_id,
        "created_at": created_at,
        "url": format!("https://example.com/{}", page_id),
        "device": "desktop",
        "psi_score": psi,
        "seo_score": seo,
        "metrics": metrics
    })
}

/// The `/run/{id}` response.
pub fn run_result_json(psi: u32, seo: u32) -> Value {
    json!({
        "psi_score": psi,
        "seo_score": seo,
        "metrics": {
            "first-contentful-paint": 1100,
            "cumulative-layout-shift": 0.02,
            "speed-index": 2300
        }
    })
}

// =============================================================================
// Clients
// =============================================================================

/// Client for a running mock server.
pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}
