use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pageprobe_core::report::{PerformanceReport, ResourceTotals};
use pageprobe_server::{ANALYSIS_FAILED_MSG, Analyzer, AppState, build_router};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

/// Stub analyzer so the router can be exercised without launching Chrome.
struct StubAnalyzer {
    fail: bool,
    load_time: u64,
    js_bytes: u64,
}

impl StubAnalyzer {
    fn ok() -> Self {
        Self {
            fail: false,
            load_time: 800,
            js_bytes: 0,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            load_time: 0,
            js_bytes: 0,
        }
    }
}

#[async_trait]
impl Analyzer for StubAnalyzer {
    async fn analyze(&self, url: &Url) -> pageprobe_browser::Result<PerformanceReport> {
        if self.fail {
            return Err(pageprobe_browser::Error::Browser(
                "chrome exploded".to_string(),
            ));
        }
        let page_size = ResourceTotals {
            total: 1500 + self.js_bytes,
            html: 1000,
            css: 500,
            js: self.js_bytes,
            ..Default::default()
        };
        Ok(PerformanceReport::assemble(
            url,
            self.load_time,
            page_size,
            3,
        ))
    }
}

fn router_with(analyzer: StubAnalyzer) -> axum::Router {
    build_router(AppState::new(Arc::new(analyzer), 2))
}

fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_analyze_rejects_missing_url() {
    let response = router_with(StubAnalyzer::ok())
        .oneshot(analyze_request("{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn test_analyze_rejects_whitespace_url() {
    let response = router_with(StubAnalyzer::ok())
        .oneshot(analyze_request(r#"{"url": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn test_analyze_rejects_malformed_url() {
    let response = router_with(StubAnalyzer::ok())
        .oneshot(analyze_request(r#"{"url": "not a url"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid URL format");
}

#[tokio::test]
async fn test_analyze_returns_camel_case_report() {
    let response = router_with(StubAnalyzer::ok())
        .oneshot(analyze_request(r#"{"url": "example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["url"], "https://example.com/");
    assert_eq!(body["loadTime"], 800);
    assert_eq!(body["requestCount"], 3);
    assert_eq!(body["pageSize"]["html"], 1000);
    assert_eq!(body["pageSize"]["total"], 1500);
    // Quiet metrics: the recommendations field is omitted, not empty.
    assert!(body.as_object().unwrap().get("recommendations").is_none());
}

#[tokio::test]
async fn test_analyze_reports_threshold_recommendations() {
    let analyzer = StubAnalyzer {
        fail: false,
        load_time: 3500,
        js_bytes: 600_000,
    };
    let response = router_with(analyzer)
        .oneshot(analyze_request(r#"{"url": "https://example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["recommendations"],
        serde_json::json!([
            "Consider optimizing overall page load performance",
            "Large JavaScript bundles - consider code splitting",
        ])
    );
}

#[tokio::test]
async fn test_analyze_maps_driver_failure_to_generic_error() {
    let response = router_with(StubAnalyzer::failing())
        .oneshot(analyze_request(r#"{"url": "example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], ANALYSIS_FAILED_MSG);
}

#[tokio::test]
async fn test_index_serves_analyzer_page() {
    let response = router_with(StubAnalyzer::ok())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("URL Performance Analyzer"));
    assert!(page.contains("/api/analyze"));
}

#[tokio::test]
async fn test_health_reports_ok() {
    let response = router_with(StubAnalyzer::ok())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
