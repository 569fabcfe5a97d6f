use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use super::server::RelayState;

/// Error response structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure reason
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Query parameters for the autocomplete endpoint.
#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    s: Option<String>,
}

/// Query parameters for the interaction-check endpoint.
#[derive(Debug, Deserialize)]
pub struct InteractionsQuery {
    drug_list: Option<String>,
}

/// Body of a summarize request.
#[derive(Debug, Deserialize)]
struct SummarizeRequest {
    #[serde(rename = "reportText")]
    report_text: Option<String>,
}

/// Parameter present and not blank
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Forward an autocomplete lookup.
pub async fn autocomplete(
    State(state): State<Arc<RelayState>>,
    Query(params): Query<AutocompleteQuery>,
) -> Response {
    let Some(query) = required(params.s) else {
        return error_response(StatusCode::BAD_REQUEST, "Search query \"s\" is required.");
    };

    match state.drugs.autocomplete(&query).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            error!("Error fetching autocomplete data: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch autocomplete data.",
            )
        }
    }
}

/// Forward an interaction check.
pub async fn check_interactions(
    State(state): State<Arc<RelayState>>,
    Query(params): Query<InteractionsQuery>,
) -> Response {
    let Some(drug_list) = required(params.drug_list) else {
        return error_response(StatusCode::BAD_REQUEST, "drug_list parameter is required.");
    };

    match state.drugs.interactions(&drug_list).await {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!("Error fetching interaction data: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data from the external source.",
            )
        }
    }
}

/// Forward report text to the summarisation service.
pub async fn summarize(State(state): State<Arc<RelayState>>, body: Bytes) -> Response {
    let report_text = serde_json::from_slice::<SummarizeRequest>(&body)
        .ok()
        .and_then(|request| required(request.report_text));
    let Some(report_text) = report_text else {
        return error_response(StatusCode::BAD_REQUEST, "reportText is required.");
    };

    match state.summarizer.summarize(&report_text).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => {
            error!("Error generating summary: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate AI summary.",
            )
        }
    }
}

/// Liveness probe.
pub async fn health_check() -> &'static str {
    "ok"
}
