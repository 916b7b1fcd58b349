//! Dashboard and trends views driven against a mock Lightkeeper service.

mod common;

use common::{audit_json, client_for, page_json, run_result_json};
use lightkeeper::client::ApiClient;
use lightkeeper::dashboard::{Dashboard, DashboardError, UiState};
use lightkeeper::model::DeviceType;
use lightkeeper::trends::{load_trends, ChartKind, MetricCategory};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard_for(server: &MockServer) -> Dashboard {
    Dashboard::new(Arc::new(client_for(server)))
}

async fn mount_list(server: &MockServer, pages: serde_json::Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/pages/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pages))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_unreachable_service_is_unavailable() {
    let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let mut dashboard = Dashboard::new(Arc::new(client));

    let err = dashboard.pages().await.unwrap_err();
    assert!(matches!(err, DashboardError::Unavailable(_)));
    assert_eq!(err.to_string(), "Unable to connect to service.");
}

#[tokio::test]
async fn test_toggle_invalidates_and_refetches() {
    let server = MockServer::start().await;
    mount_list(&server, json!([page_json("p1", "Home", "desktop", true)]), 2).await;
    Mock::given(method("PUT"))
        .and(path("/pages/p1"))
        .and(body_partial_json(json!({"isEnabled": false})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json("p1", "Home", "desktop", false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    dashboard.pages().await.unwrap();
    dashboard.pages().await.unwrap();
    dashboard.toggle("p1").await.unwrap();
    assert!(!dashboard.is_fresh());
    dashboard.pages().await.unwrap();
}

#[tokio::test]
async fn test_edit_keeps_disabled_flag() {
    let server = MockServer::start().await;
    mount_list(&server, json!([page_json("p1", "Home", "desktop", false)]), 1).await;
    Mock::given(method("PUT"))
        .and(path("/pages/p1"))
        .and(body_partial_json(json!({
            "isEnabled": false,
            "name": "Homepage",
            "device": "mobile"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json("p1", "Homepage", "mobile", false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    dashboard.open_edit("p1").await.unwrap();
    {
        let form = dashboard.form_mut().unwrap();
        form.name = "Homepage".to_string();
        form.device = DeviceType::Mobile;
    }
    let saved = dashboard.submit().await.unwrap();
    assert_eq!(saved.device, DeviceType::Mobile);
    assert!(dashboard.state().is_idle());
}

#[tokio::test]
async fn test_failed_save_keeps_modal_open() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pages/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "db down"})))
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    dashboard.open_create();
    {
        let form = dashboard.form_mut().unwrap();
        form.name = "Blog".to_string();
        form.url = "https://example.com/blog".to_string();
    }
    let err = dashboard.submit().await.unwrap_err();
    assert_eq!(err.alert(), "Error saving page");
    match dashboard.state() {
        UiState::ModalOpen { prefill, .. } => assert_eq!(prefill.name, "Blog"),
        other => panic!("Expected ModalOpen, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_audit_shows_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/run/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_result_json(64, 100)))
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    dashboard.run_audit("p1").await.unwrap();
    let (page_id, result) = dashboard.state().run_result().unwrap();
    assert_eq!(page_id, "p1");
    assert_eq!(result.psi_score, 64);
}

#[tokio::test]
async fn test_trends_for_page_without_audits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json("p1", "Home", "desktop", true)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/audits/p1"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "No audits found for this page"})),
        )
        .mount(&server)
        .await;

    let report = load_trends(&client_for(&server), "p1").await.unwrap();
    assert!(report.rows.is_empty());
    assert!(report.latest.is_none());
    assert_eq!(report.charts.len(), 1);
}

#[tokio::test]
async fn test_trends_latest_ignores_fetch_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json("p1", "Home", "desktop", true)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/audits/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            audit_json(
                "p1",
                "2024-10-02T10:00:00",
                85,
                92,
                json!({"cumulative-layout-shift": 0.01, "first-contentful-paint": 900})
            ),
            audit_json(
                "p1",
                "2024-10-01T10:00:00",
                80,
                90,
                json!({"cumulative-layout-shift": 0.03, "first-contentful-paint": 1000})
            ),
        ])))
        .mount(&server)
        .await;

    let report = load_trends(&client_for(&server), "p1").await.unwrap();
    let latest = report.latest.unwrap();
    assert_eq!((latest.psi, latest.seo), (85, 92));
    assert_eq!(report.rows[0].date, "10/01 10:00");
    assert_eq!(
        report.charts.iter().map(|c| c.kind).collect::<Vec<_>>(),
        vec![
            ChartKind::Scores,
            ChartKind::Metrics(MetricCategory::LayoutStability),
            ChartKind::Metrics(MetricCategory::PaintTiming),
        ]
    );
}

#[tokio::test]
async fn test_trends_render_history_when_page_fetch_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/p1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/audits/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            audit_json("p1", "2024-10-02T10:00:00", 85, 92, json!({"speed-index": 2100})),
            audit_json("p1", "2024-10-01T10:00:00", 80, 90, json!({"speed-index": 2400})),
        ])))
        .mount(&server)
        .await;

    let report = load_trends(&client_for(&server), "p1").await.unwrap();
    assert!(report.page.is_none());
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.latest.unwrap().psi, 85);
    assert_eq!(
        report.charts.iter().map(|c| c.kind).collect::<Vec<_>>(),
        vec![ChartKind::Scores, ChartKind::Metrics(MetricCategory::Other)]
    );
}

#[tokio::test]
async fn test_trends_treat_failed_history_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json("p1", "Home", "desktop", true)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/audits/p1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "db down"})))
        .mount(&server)
        .await;

    let report = load_trends(&client_for(&server), "p1").await.unwrap();
    assert_eq!(report.page.unwrap().name, "Home");
    assert!(report.rows.is_empty());
    assert_eq!(report.charts.len(), 1);
}
