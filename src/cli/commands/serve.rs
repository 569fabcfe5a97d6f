//! Relay server command.

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::Config;
use crate::infrastructure::relay::RelayServer;
use crate::infrastructure::upstream::{DrugSiteClient, GenerativeSummarizer};

/// Run the relay until Ctrl-C
pub async fn execute(config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut relay = config.relay.clone();
    if let Some(host) = host {
        relay.host = host;
    }
    if let Some(port) = port {
        if port == 0 {
            bail!("Invalid relay port: 0");
        }
        relay.port = port;
    }

    let drugs = DrugSiteClient::new(&config.upstream).context("Failed to create drug site client")?;
    let summarizer =
        GenerativeSummarizer::new(&config.summarizer).context("Failed to create summarizer")?;

    if config
        .summarizer
        .api_key
        .as_deref()
        .is_none_or(|key| key.trim().is_empty())
    {
        warn!("No summarizer API key configured; /api/summarize will answer 500");
    }

    RelayServer::new(Arc::new(drugs), Arc::new(summarizer), relay)
        .serve_with_shutdown(shutdown_signal())
        .await
        .context("Relay server failed")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", err);
        return;
    }
    info!("Shutting down relay");
}
