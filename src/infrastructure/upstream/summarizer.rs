use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Url};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::errors::UpstreamError;
use super::prompt::build_summary_prompt;
use crate::domain::models::SummarizerConfig;
use crate::domain::ports::ReportSummarizer;

/// Client for a generative language API's `generateContent` endpoint
///
/// The relay hands back the `candidates` array untouched (or the whole body
/// when there is none); unwrapping it is the gateway client's job.
pub struct GenerativeSummarizer {
    http_client: ReqwestClient,
    base_url: Url,
    model: String,
    api_key: Option<String>,
    max_report_chars: usize,
}

impl GenerativeSummarizer {
    /// Create a summarizer from configuration
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &SummarizerConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let api_key = config.api_key.clone().filter(|key| !key.trim().is_empty());
        info!(
            "Initializing summarizer: base_url={}, model={}, api_key={}",
            base_url,
            config.model,
            api_key.as_deref().map_or_else(|| "[UNSET]".to_string(), scrub_key)
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            model: config.model.clone(),
            api_key,
            max_report_chars: config.max_report_chars,
        })
    }

    fn endpoint(&self) -> Result<Url, UpstreamError> {
        self.base_url
            .join(&format!("/v1beta/models/{}:generateContent", self.model))
            .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))
    }
}

/// Keep the first eight characters of an API key for log correlation
fn scrub_key(key: &str) -> String {
    match key.char_indices().nth(8) {
        Some((idx, _)) => format!("{}...[REDACTED]", &key[..idx]),
        None => "[REDACTED]".to_string(),
    }
}

#[async_trait]
impl ReportSummarizer for GenerativeSummarizer {
    #[instrument(skip(self, report_text), fields(model = %self.model, chars = report_text.len()))]
    async fn summarize(&self, report_text: &str) -> Result<Value, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;
        let url = self.endpoint()?;
        info!("Forwarding summarize request to: {}", url);

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_summary_prompt(report_text, self.max_report_chars) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": 0.2
            }
        });

        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!("Summarizer error ({}): {}", status, body);
            return Err(UpstreamError::Status(status, body));
        }

        let bytes = response.bytes().await?;
        let mut value: Value = serde_json::from_slice(&bytes)?;
        Ok(match value.get_mut("candidates") {
            Some(candidates) => candidates.take(),
            None => value,
        })
    }
}
