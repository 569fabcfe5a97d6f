use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Url};
use tracing::{debug, info, instrument, warn};

use super::errors::UpstreamError;
use crate::domain::models::UpstreamConfig;
use crate::domain::ports::DrugSource;

/// Client for the drug site's autocomplete and interaction-check endpoints
pub struct DrugSiteClient {
    http_client: ReqwestClient,
    base_url: Url,
    user_agent: String,
}

impl DrugSiteClient {
    /// Create a client for the site at `config.base_url`
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            user_agent: config.user_agent.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        self.base_url
            .join(path)
            .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        warn!("Upstream error ({}): {}", status, body);
        Err(UpstreamError::Status(status, body))
    }
}

#[async_trait]
impl DrugSource for DrugSiteClient {
    #[instrument(skip(self))]
    async fn autocomplete(&self, query: &str) -> Result<serde_json::Value, UpstreamError> {
        let url = self.endpoint("/api/autocomplete/")?;
        info!("Forwarding autocomplete request to: {}?type=interaction&s={}", url, query);

        let response = self
            .http_client
            .get(url)
            .query(&[("type", "interaction"), ("s", query)])
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    #[instrument(skip(self))]
    async fn interactions(&self, drug_list: &str) -> Result<String, UpstreamError> {
        let url = self.endpoint("/interactions-check.php")?;
        info!("Forwarding interaction check request to: {}?drug_list={}", url, drug_list);

        let response = self
            .http_client
            .get(url)
            .query(&[("drug_list", drug_list)])
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        debug!(bytes = body.len(), "interaction page received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(DrugSiteClient::new(&UpstreamConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let config = UpstreamConfig {
            base_url: "::".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            DrugSiteClient::new(&config),
            Err(UpstreamError::InvalidUrl(_))
        ));
    }
}
