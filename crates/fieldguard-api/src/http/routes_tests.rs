use super::*;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use fieldguard_core::{ScanOptions, ScanOrchestrator};
use fieldguard_protocols::{
    Document, DocumentProvider, ElementData, FetchRequest, FrameError, FrameRef, LoadedPage,
    ProviderError, RawStyle,
};

// ============================================================================
// Test Helpers
// ============================================================================

enum Behavior {
    Serve,
    Fail,
    Panic,
}

struct StubProvider(Behavior);

struct StubPage(Document);

#[async_trait]
impl LoadedPage for StubPage {
    fn document(&self) -> &Document {
        &self.0
    }

    async fn frames(&self) -> Result<Vec<FrameRef>, FrameError> {
        Ok(Vec::new())
    }

    async fn evaluate_in_frame(&self, frame: &FrameRef) -> Result<Document, FrameError> {
        Err(FrameError::Detached(frame.id.clone()))
    }

    async fn close(&self) {}
}

fn checkout() -> Document {
    let mut doc = Document::new("https://shop.example/checkout");
    let form = doc.push(None, ElementData::new("form").with_attr("action", "/pay"));
    doc.push(Some(form), ElementData::new("input").with_attr("name", "email"));
    doc.push(
        Some(form),
        ElementData::new("input")
            .with_attr("name", "cc")
            .with_style(RawStyle::from_inline("display:none")),
    );
    doc.push(
        Some(form),
        ElementData::new("input")
            .with_attr("name", "token")
            .with_attr("type", "hidden"),
    );
    doc
}

#[async_trait]
impl DocumentProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch(&self, _request: &FetchRequest) -> Result<Box<dyn LoadedPage>, ProviderError> {
        match self.0 {
            Behavior::Serve => Ok(Box::new(StubPage(checkout()))),
            Behavior::Fail => Err(ProviderError::Unreachable("connection refused".into())),
            Behavior::Panic => panic!("provider exploded"),
        }
    }
}

fn router(behavior: Behavior) -> Router {
    let provider: Arc<dyn DocumentProvider> = Arc::new(StubProvider(behavior));
    let orchestrator = ScanOrchestrator::new(provider.clone(), provider, ScanOptions::default());
    create_router(Arc::new(AppState::new(Arc::new(orchestrator))))
}

async fn post_scan(app: Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/scan")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

// ============================================================================
// POST /scan
// ============================================================================

#[tokio::test]
async fn test_scan_returns_report() {
    let body = json!({"url": "https://shop.example/checkout", "level": "simple"});
    let (status, value) = post_scan(router(Behavior::Serve), &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["scanLevel"], "simple");
    assert_eq!(value["url"], "https://shop.example/checkout");
    let names: Vec<_> = value["hiddenFields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["cc", "token"]);
    assert_eq!(value["hiddenFields"][1]["reason"]["kind"], "explicit_hidden_type");
    assert_eq!(value["metadata"]["riskLevel"], "low");
    assert_eq!(value["metadata"]["degraded"], false);
}

#[tokio::test]
async fn test_scan_skip_explicit_hidden() {
    let body = json!({
        "url": "https://shop.example/checkout",
        "level": "simple",
        "reportExplicitHidden": false
    });
    let (status, value) = post_scan(router(Behavior::Serve), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["hiddenFields"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_url_is_400() {
    let body = json!({"url": "not a url", "level": "simple"});
    let (status, value) = post_scan(router(Behavior::Serve), &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "validation_error");
    assert!(value["message"].as_str().unwrap().contains("Invalid URL"));
}

#[tokio::test]
async fn test_unsupported_scheme_is_400() {
    let body = json!({"url": "file:///etc/passwd", "level": "simple"});
    let (status, value) = post_scan(router(Behavior::Serve), &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "validation_error");
}

#[tokio::test]
async fn test_unknown_level_is_400() {
    let body = json!({"url": "https://shop.example/", "level": "extreme"});
    let (status, value) = post_scan(router(Behavior::Serve), &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["message"].as_str().unwrap().contains("extreme"));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (status, value) = post_scan(router(Behavior::Serve), "{\"url\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "validation_error");

    let (status, _) = post_scan(router(Behavior::Serve), r#"{"level": "simple"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_failure_is_degraded_200() {
    let body = json!({"url": "https://down.example/", "level": "medium"});
    let (status, value) = post_scan(router(Behavior::Fail), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["metadata"]["degraded"], true);
    assert_eq!(value["metadata"]["riskLevel"], "low");
    assert!(value["hiddenFields"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_panicking_scan_is_500() {
    let body = json!({"url": "https://shop.example/", "level": "simple"});
    let (status, value) = post_scan(router(Behavior::Panic), &body.to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "internal_error");
    assert!(!value.to_string().contains("exploded"));
}

// ============================================================================
// Monitoring
// ============================================================================

#[tokio::test]
async fn test_livez() {
    let response = router(Behavior::Serve)
        .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_health() {
    let response = router(Behavior::Serve)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}
