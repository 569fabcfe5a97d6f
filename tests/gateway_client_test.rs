//! Integration tests for the relay gateway client
//!
//! Each test points the client at a mock relay and checks that failures of
//! every kind collapse into the documented fallback values.

use mockito::{Matcher, Server};
use serde_json::json;

use negin::domain::models::{GatewayConfig, InteractionFetch};
use negin::{InteractionGateway, RelayGatewayClient};

fn client_for(url: String) -> RelayGatewayClient {
    RelayGatewayClient::new(&GatewayConfig { base_url: url }).expect("Failed to create client")
}

#[tokio::test]
async fn test_autocomplete_returns_first_category_results() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/autocomplete")
        .match_query(Matcher::UrlEncoded("s".into(), "asp irin&co".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "categories": [
                    { "results": [
                        { "suggestion": "Aspirin", "ddc_id": 1, "brand_name_id": "2" },
                        { "ddc_id": 3, "brand_name_id": 4 },
                        { "suggestion": "Aspirin Low Strength", "ddc_id": "5", "brand_name_id": 6 }
                    ] },
                    { "results": [ { "suggestion": "Ignored", "ddc_id": 9, "brand_name_id": 9 } ] }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(server.url());
    let suggestions = client.autocomplete("asp irin&co").await;

    mock.assert_async().await;
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].suggestion, "Aspirin");
    assert_eq!(suggestions[0].ddc_id, "1");
    assert_eq!(suggestions[1].brand_name_id, "6");
}

#[tokio::test]
async fn test_autocomplete_without_categories_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/autocomplete")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"categories": []}"#)
        .create_async()
        .await;

    assert!(client_for(server.url()).autocomplete("zz").await.is_empty());
}

#[tokio::test]
async fn test_autocomplete_category_without_results_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/autocomplete")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"categories": [{"name": "drugs"}]}"#)
        .create_async()
        .await;

    assert!(client_for(server.url()).autocomplete("zz").await.is_empty());
}

#[tokio::test]
async fn test_autocomplete_failures_fall_back_to_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/autocomplete")
        .match_query(Matcher::UrlEncoded("s".into(), "err".into()))
        .with_status(500)
        .with_body(r#"{"error": "Failed to fetch autocomplete data."}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/autocomplete")
        .match_query(Matcher::UrlEncoded("s".into(), "junk".into()))
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = client_for(server.url());
    assert!(client.autocomplete("err").await.is_empty());
    assert!(client.autocomplete("junk").await.is_empty());
}

#[tokio::test]
async fn test_check_interactions_sends_drug_list() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/check-interactions")
        .match_query(Matcher::UrlEncoded("drug_list".into(), "1-2,3-4".into()))
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body>report</body></html>")
        .create_async()
        .await;

    let fetch = client_for(server.url()).check_interactions("1-2,3-4").await;

    mock.assert_async().await;
    assert_eq!(
        fetch,
        InteractionFetch::Report("<html><body>report</body></html>".to_string())
    );
}

#[tokio::test]
async fn test_check_interactions_failure_is_renderable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/check-interactions")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"error": "Failed to fetch data from the external source."}"#)
        .create_async()
        .await;

    let fetch = client_for(server.url()).check_interactions("1-2,3-4").await;

    assert!(fetch.is_failed());
    let text = fetch.into_text();
    assert!(text.contains("Could not connect to the backend server"));
    assert!(text.contains("HTTP error! status: 500"));
}

#[tokio::test]
async fn test_unreachable_relay_never_errors() {
    // Nothing listens on port 9 (discard) on a test host.
    let client = client_for("http://127.0.0.1:9".to_string());

    assert!(client.autocomplete("asp").await.is_empty());
    assert!(client.check_interactions("1-2,3-4").await.is_failed());
    assert!(client.summarize("text").await.is_none());
}

#[tokio::test]
async fn test_summarize_sequence_envelope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/summarize")
        .match_body(Matcher::Json(json!({ "reportText": "extracted text" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "content": { "parts": [ { "text": "{\"overall_interaction\":\"No\"}" } ] } }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let summary = client_for(server.url())
        .summarize("extracted text")
        .await
        .expect("summary");

    mock.assert_async().await;
    assert_eq!(summary.overall_interaction.as_deref(), Some("No"));
    assert!(summary.highest_severity_level.is_none());
}

#[tokio::test]
async fn test_summarize_single_object_envelope() {
    let inner = json!({
        "overall_interaction": "Yes",
        "highest_severity_level": "Moderate",
        "clinical_summary": "Monitor blood pressure.",
        "pharmacist_recommendation": "Space doses.",
        "affected_drugs": "lisinopril",
        "interaction_types": ["drug-drug"]
    })
    .to_string();

    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/summarize")
        .with_status(200)
        .with_body(json!({ "content": { "parts": [ { "text": inner } ] } }).to_string())
        .create_async()
        .await;

    let summary = client_for(server.url()).summarize("x").await.expect("summary");
    assert_eq!(summary.highest_severity_level.as_deref(), Some("Moderate"));
    assert_eq!(summary.affected_drugs, Some(vec!["lisinopril".to_string()]));
}

#[tokio::test]
async fn test_summarize_unrecognised_envelope_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/summarize")
        .with_status(200)
        .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
        .create_async()
        .await;

    assert!(client_for(server.url()).summarize("x").await.is_none());
}

#[tokio::test]
async fn test_summarize_server_error_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/summarize")
        .with_status(500)
        .with_body(r#"{"error": "Failed to generate AI summary."}"#)
        .create_async()
        .await;

    assert!(client_for(server.url()).summarize("x").await.is_none());
}
