use async_trait::async_trait;

use crate::domain::models::{InteractionFetch, InteractionSummary, Suggestion};

/// Port trait for the client side of the relay
///
/// Every operation is infallible from the caller's point of view: transport
/// failures, non-success statuses and malformed payloads are converted into
/// safe fallback values inside the adapter. Callers never special-case errors.
///
/// # Hexagonal Architecture
///
/// The session and checker services depend on this trait only, so tests can
/// drive them with an in-memory gateway and the CLI can plug in the HTTP one.
#[async_trait]
pub trait InteractionGateway: Send + Sync {
    /// Look up drugs matching a partial name
    ///
    /// Returns an empty list on any failure.
    async fn autocomplete(&self, query: &str) -> Vec<Suggestion>;

    /// Fetch the interaction report for a comma-joined `ddc-brand` list
    ///
    /// A failed fetch yields [`InteractionFetch::Failed`] carrying a
    /// human-readable error fragment.
    async fn check_interactions(&self, drug_list: &str) -> InteractionFetch;

    /// Summarise extracted report text with the AI service
    ///
    /// Returns `None` when no summary is available.
    async fn summarize(&self, report_text: &str) -> Option<InteractionSummary>;
}
