use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the relay
///
/// These never leave the gateway adapter; they are logged and replaced with
/// fallback values at the port boundary.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Relay answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Summary envelope matched neither known shape
    #[error("Unrecognised summary envelope: {0}")]
    Envelope(String),

    /// Invalid base URL
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Whether the relay could not be reached at all
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = GatewayError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "HTTP error! status: 500 Internal Server Error");
        assert!(!err.is_connection());
    }

    #[test]
    fn test_envelope_message() {
        let err = GatewayError::Envelope("missing content".to_string());
        assert!(err.to_string().contains("missing content"));
    }
}
