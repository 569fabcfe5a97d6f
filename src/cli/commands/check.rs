//! Interaction check command.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::cli::output::progress::{create_spinner, hidden_spinner, ProgressBarExt};
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::Config;
use crate::domain::ports::InteractionGateway;
use crate::infrastructure::gateway::RelayGatewayClient;
use crate::services::renderer::{render_report, ReportView, SUBMIT_BUSY_LABEL};
use crate::services::Session;

/// Outcome of `negin check`
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    /// Drugs that were checked
    pub drugs: Vec<String>,
    /// `drug_list` sent to the relay
    pub drug_list: String,
    /// Names with no autocomplete match
    pub unresolved: Vec<String>,
    /// When the check finished
    pub checked_at: DateTime<Utc>,
    /// Rendered report
    pub report: ReportView,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "{} {}",
            style("Interactions between").bold(),
            style(self.drugs.join(", ")).cyan()
        )];
        if !self.unresolved.is_empty() {
            lines.push(format!(
                "{} {}",
                style("Not found:").yellow(),
                self.unresolved.join(", ")
            ));
        }
        lines.push(String::new());
        lines.push(TableFormatter::new().format_report(&self.report));
        lines.join("\n")
    }
}

/// Resolve each name to its first suggestion, submit, and print the report
pub async fn execute(config: Config, names: Vec<String>, json: bool) -> Result<()> {
    let gateway: Arc<dyn InteractionGateway> = Arc::new(
        RelayGatewayClient::new(&config.gateway).context("Failed to create gateway client")?,
    );
    let mut session = Session::new(gateway, &config.search);

    let mut unresolved = Vec::new();
    for name in names {
        match session.lookup(&name).await.into_iter().next() {
            Some(suggestion) => {
                session.select(suggestion);
            }
            None => {
                warn!(name = %name, "no autocomplete match");
                unresolved.push(name);
            }
        }
    }

    let spinner = if json {
        hidden_spinner()
    } else {
        create_spinner(SUBMIT_BUSY_LABEL)
    };

    let mut phases = session.subscribe_phase();
    let phase_spinner = spinner.clone();
    let phase_watch = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = *phases.borrow_and_update();
            if phase.is_busy() {
                phase_spinner.set_message(format!("{SUBMIT_BUSY_LABEL} ({phase:?})"));
            }
        }
    });

    let result = session.submit().await.cloned();
    phase_watch.abort();

    let report = match result {
        Ok(report) => {
            spinner.finish_success("Check complete");
            report
        }
        Err(err) => {
            spinner.finish_and_clear();
            return Err(err).context("Cannot check interactions");
        }
    };

    let view = render_report(&report);
    output(
        &CheckOutput {
            drugs: report.drugs,
            drug_list: report.drug_list,
            unresolved,
            checked_at: report.checked_at,
            report: view,
        },
        json,
    );
    session.close_report();
    Ok(())
}
