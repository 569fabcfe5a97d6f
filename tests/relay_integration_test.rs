//! Relay server tests: routes driven in-process with `tower::ServiceExt`,
//! upstream clients against mock servers, and the gateway client against a
//! live relay.

mod common;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

use negin::domain::models::{
    GatewayConfig, RelayConfig, SummarizerConfig, UpstreamConfig,
};
use negin::infrastructure::relay::ErrorResponse;
use negin::infrastructure::upstream::{DrugSiteClient, GenerativeSummarizer, UpstreamError};
use negin::{DrugSource, InteractionGateway, RelayGatewayClient, RelayServer, ReportSummarizer};

/// Upstream stand-in that records what it was asked
#[derive(Default)]
struct FakeUpstream {
    fail: bool,
    seen: Mutex<Vec<String>>,
}

impl FakeUpstream {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn result<T>(&self, value: T) -> Result<T, UpstreamError> {
        if self.fail {
            Err(UpstreamError::MissingApiKey)
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl DrugSource for FakeUpstream {
    async fn autocomplete(&self, query: &str) -> Result<Value, UpstreamError> {
        self.seen.lock().unwrap().push(format!("autocomplete:{query}"));
        self.result(json!({
            "categories": [{ "results": [
                { "suggestion": "Aspirin", "ddc_id": "1", "brand_name_id": "2" }
            ] }]
        }))
    }

    async fn interactions(&self, drug_list: &str) -> Result<String, UpstreamError> {
        self.seen.lock().unwrap().push(format!("interactions:{drug_list}"));
        self.result(common::MARKED_PAGE.to_string())
    }
}

#[async_trait]
impl ReportSummarizer for FakeUpstream {
    async fn summarize(&self, report_text: &str) -> Result<Value, UpstreamError> {
        self.seen.lock().unwrap().push(format!("summarize:{}", report_text.len()));
        self.result(json!([{
            "content": { "parts": [{ "text": "{\"overall_interaction\":\"Yes\",\"highest_severity_level\":\"Major\"}" }] }
        }]))
    }
}

fn relay_with(upstream: Arc<FakeUpstream>) -> RelayServer {
    RelayServer::new(upstream.clone(), upstream, RelayConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn error_body(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice::<ErrorResponse>(&bytes).unwrap().error
}

#[tokio::test]
async fn test_health() {
    let app = relay_with(Arc::new(FakeUpstream::default())).build_router();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_autocomplete_passes_payload_through() {
    let upstream = Arc::new(FakeUpstream::default());
    let app = relay_with(upstream.clone()).build_router();

    let response = app
        .oneshot(
            Request::get("/api/autocomplete?s=asp%20irin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["categories"][0]["results"][0]["suggestion"], "Aspirin");
    assert_eq!(*upstream.seen.lock().unwrap(), vec!["autocomplete:asp irin"]);
}

#[tokio::test]
async fn test_missing_parameters_are_bad_requests() {
    let app = relay_with(Arc::new(FakeUpstream::default())).build_router();

    let response = app
        .clone()
        .oneshot(Request::get("/api/autocomplete").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await, "Search query \"s\" is required.");

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/check-interactions?drug_list=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await, "drug_list parameter is required.");

    let response = app
        .oneshot(
            Request::post("/api/summarize")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"other": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await, "reportText is required.");
}

#[tokio::test]
async fn test_upstream_failures_are_server_errors() {
    let app = relay_with(Arc::new(FakeUpstream::failing())).build_router();

    let cases = [
        (
            Request::get("/api/autocomplete?s=asp").body(Body::empty()).unwrap(),
            "Failed to fetch autocomplete data.",
        ),
        (
            Request::get("/api/check-interactions?drug_list=1-2,3-4")
                .body(Body::empty())
                .unwrap(),
            "Failed to fetch data from the external source.",
        ),
        (
            Request::post("/api/summarize")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"reportText": "report"}"#))
                .unwrap(),
            "Failed to generate AI summary.",
        ),
    ];

    for (request, message) in cases {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_body(response).await, message);
    }
}

#[tokio::test]
async fn test_check_interactions_returns_html() {
    let upstream = Arc::new(FakeUpstream::default());
    let app = relay_with(upstream.clone()).build_router();

    let response = app
        .oneshot(
            Request::get("/api/check-interactions?drug_list=1-2%2C3-4")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(
        *upstream.seen.lock().unwrap(),
        vec!["interactions:1-2,3-4"]
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = relay_with(Arc::new(FakeUpstream::default())).build_router();
    let response = app
        .oneshot(
            Request::get("/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_drug_site_client_forwards_requests() {
    let mut server = Server::new_async().await;
    let autocomplete = server
        .mock("GET", "/api/autocomplete/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "interaction".into()),
            Matcher::UrlEncoded("s".into(), "asp".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"categories": []}"#)
        .create_async()
        .await;
    let interactions = server
        .mock("GET", "/interactions-check.php")
        .match_query(Matcher::UrlEncoded("drug_list".into(), "1-2,3-4".into()))
        .match_header("user-agent", Matcher::Regex("Mozilla/5.0".into()))
        .with_status(200)
        .with_body("<html>page</html>")
        .create_async()
        .await;

    let client = DrugSiteClient::new(&UpstreamConfig {
        base_url: server.url(),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(client.autocomplete("asp").await.unwrap(), json!({"categories": []}));
    assert_eq!(client.interactions("1-2,3-4").await.unwrap(), "<html>page</html>");
    autocomplete.assert_async().await;
    interactions.assert_async().await;
}

#[tokio::test]
async fn test_drug_site_client_surfaces_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/interactions-check.php")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("blocked")
        .create_async()
        .await;

    let client = DrugSiteClient::new(&UpstreamConfig {
        base_url: server.url(),
        ..Default::default()
    })
    .unwrap();

    assert!(matches!(
        client.interactions("1-2").await,
        Err(UpstreamError::Status(status, _)) if status.as_u16() == 403
    ));
}

#[tokio::test]
async fn test_summarizer_returns_candidates() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/test-model:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .with_status(200)
        .with_body(
            json!({
                "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }],
                "usageMetadata": { "totalTokenCount": 12 }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let summarizer = GenerativeSummarizer::new(&SummarizerConfig {
        base_url: server.url(),
        model: "test-model".to_string(),
        api_key: Some("test-key".to_string()),
        ..Default::default()
    })
    .unwrap();

    let envelope = summarizer.summarize("report").await.unwrap();
    mock.assert_async().await;
    assert!(envelope.is_array());
    assert_eq!(envelope[0]["content"]["parts"][0]["text"], "{}");
}

#[tokio::test]
async fn test_gateway_against_live_relay() {
    let upstream = Arc::new(FakeUpstream::default());
    let router = relay_with(upstream.clone()).build_router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = RelayGatewayClient::new(&GatewayConfig {
        base_url: format!("http://{addr}"),
    })
    .unwrap();

    let suggestions = client.autocomplete("asp").await;
    assert_eq!(suggestions[0].suggestion, "Aspirin");

    let page = client.check_interactions("1-2,3-4").await;
    assert!(!page.is_failed());

    let summary = client.summarize("report text").await.expect("summary");
    assert_eq!(summary.highest_severity_level.as_deref(), Some("Major"));

    server.abort();
}
