use async_trait::async_trait;

use crate::infrastructure::upstream::UpstreamError;

/// Port trait for the third-party drug site the relay forwards to
///
/// Unlike [`super::InteractionGateway`], these operations surface errors: the
/// relay turns them into HTTP 500 responses.
#[async_trait]
pub trait DrugSource: Send + Sync {
    /// Raw autocomplete JSON for a partial drug name
    async fn autocomplete(&self, query: &str) -> Result<serde_json::Value, UpstreamError>;

    /// Raw interaction page HTML for a comma-joined `ddc-brand` list
    async fn interactions(&self, drug_list: &str) -> Result<String, UpstreamError>;
}

/// Port trait for the AI service that summarises interaction reports
#[async_trait]
pub trait ReportSummarizer: Send + Sync {
    /// Summary envelope for the given report text, as returned by the service
    async fn summarize(&self, report_text: &str) -> Result<serde_json::Value, UpstreamError>;
}
