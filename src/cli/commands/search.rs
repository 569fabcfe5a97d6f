//! Autocomplete lookup command.

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, Suggestion};
use crate::domain::ports::InteractionGateway;
use crate::infrastructure::gateway::RelayGatewayClient;
use crate::services::Session;

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    /// Query as typed
    pub query: String,
    /// Matching drugs
    pub suggestions: Vec<Suggestion>,
}

impl CommandOutput for SearchOutput {
    fn to_human(&self) -> String {
        if self.suggestions.is_empty() {
            return format!("No suggestions for '{}'", self.query.trim());
        }
        TableFormatter::new().format_suggestions(&self.suggestions)
    }
}

/// Run one query through the session's debounced feed and print the result
pub async fn execute(config: Config, query: String, json: bool) -> Result<()> {
    let gateway: Arc<dyn InteractionGateway> = Arc::new(
        RelayGatewayClient::new(&config.gateway).context("Failed to create gateway client")?,
    );
    let session = Session::new(gateway, &config.search);

    let mut updates = session.subscribe_suggestions();
    session.input(&query);
    updates
        .changed()
        .await
        .context("Suggestion feed closed before answering")?;

    let suggestions = updates.borrow_and_update().clone();
    output(&SearchOutput { query, suggestions }, json);
    Ok(())
}
