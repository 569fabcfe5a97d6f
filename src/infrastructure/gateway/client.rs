use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Url};
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::envelope::decode_summary;
use super::errors::GatewayError;
use crate::domain::models::{
    AutocompletePayload, GatewayConfig, InteractionFetch, InteractionSummary, Suggestion,
};
use crate::domain::ports::InteractionGateway;

/// HTTP client for the relay's three endpoints
///
/// Each port operation has a fallible `try_*` counterpart; the port methods
/// log the error and substitute a fallback. No retries are attempted and the
/// transport's default timeout applies.
pub struct RelayGatewayClient {
    /// Reusable HTTP client with connection pooling
    http_client: ReqwestClient,

    /// Base URL of the relay
    base_url: Url,
}

impl RelayGatewayClient {
    /// Create a client for the relay at `config.base_url`
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))
    }

    /// Fetch suggestions, surfacing any failure
    pub async fn try_autocomplete(&self, query: &str) -> Result<Vec<Suggestion>, GatewayError> {
        let url = self.endpoint("/api/autocomplete")?;
        debug!("GET {} s={}", url, query);

        let response = self
            .http_client
            .get(url)
            .query(&[("s", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }

        let bytes = response.bytes().await?;
        let payload: AutocompletePayload = serde_json::from_slice(&bytes)?;
        Ok(payload.into_suggestions())
    }

    /// Fetch the interaction page, surfacing any failure
    pub async fn try_check_interactions(&self, drug_list: &str) -> Result<String, GatewayError> {
        let url = self.endpoint("/api/check-interactions")?;
        debug!("GET {} drug_list={}", url, drug_list);

        let response = self
            .http_client
            .get(url)
            .query(&[("drug_list", drug_list)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }

        Ok(response.text().await?)
    }

    /// Summarise report text, surfacing any failure
    pub async fn try_summarize(
        &self,
        report_text: &str,
    ) -> Result<InteractionSummary, GatewayError> {
        let url = self.endpoint("/api/summarize")?;
        debug!("POST {} ({} chars)", url, report_text.len());

        let response = self
            .http_client
            .post(url)
            .json(&json!({ "reportText": report_text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }

        let bytes = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        decode_summary(value)
    }
}

/// Error fragment shown in place of the report when the check fails
pub fn interaction_error_fragment(err: &GatewayError) -> String {
    format!(
        "<p class=\"text-red-400\">Error: Could not connect to the backend server. Is it running? Details: {err}</p>"
    )
}

#[async_trait]
impl InteractionGateway for RelayGatewayClient {
    #[instrument(skip(self))]
    async fn autocomplete(&self, query: &str) -> Vec<Suggestion> {
        match self.try_autocomplete(query).await {
            Ok(suggestions) => {
                debug!(count = suggestions.len(), "autocomplete succeeded");
                suggestions
            }
            Err(err) => {
                warn!("Autocomplete fetch problem: {}", err);
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    async fn check_interactions(&self, drug_list: &str) -> InteractionFetch {
        match self.try_check_interactions(drug_list).await {
            Ok(body) => InteractionFetch::Report(body),
            Err(err) => {
                if err.is_connection() {
                    warn!("Relay unreachable during interaction check: {}", err);
                } else {
                    warn!("Interaction check failed: {}", err);
                }
                InteractionFetch::Failed(interaction_error_fragment(&err))
            }
        }
    }

    #[instrument(skip(self, report_text), fields(chars = report_text.len()))]
    async fn summarize(&self, report_text: &str) -> Option<InteractionSummary> {
        match self.try_summarize(report_text).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!("Summary unavailable: {}", err);
                None
            }
        }
    }
}
