use reqwest::StatusCode;
use thiserror::Error;

/// Errors the relay can hit while forwarding a request
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {0}: {1}")]
    Status(StatusCode, String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// No API key configured for the summarisation service
    #[error("Summarizer API key is not configured")]
    MissingApiKey,

    /// Invalid upstream URL
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}
