//! Submit flow: fetch the interaction page, extract the report, summarise it.
//!
//! Phases run `Idle → Fetching → Extracting → Summarizing → Rendering → Idle`.
//! A failed fetch or a missing report region skips straight to `Rendering`
//! with an error outcome, so every submit yields a report.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::SessionError;
use crate::domain::models::{
    drug_list_param, InteractionFetch, InteractionReport, ReportOutcome, SelectedDrug,
    SubmitPhase,
};
use crate::domain::ports::InteractionGateway;
use crate::services::report_parser::{extract_report, ExtractOptions};
use crate::services::selection::MIN_SELECTIONS;

/// Runs interaction checks and publishes the current submit phase
pub struct InteractionChecker {
    gateway: Arc<dyn InteractionGateway>,
    extract_options: ExtractOptions,
    phase: watch::Sender<SubmitPhase>,
}

/// Returns the phase to `Idle` however the check ends
struct PhaseGuard<'a>(&'a watch::Sender<SubmitPhase>);

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(SubmitPhase::Idle);
    }
}

impl InteractionChecker {
    /// Create an idle checker backed by `gateway`
    pub fn new(gateway: Arc<dyn InteractionGateway>) -> Self {
        let (phase, _) = watch::channel(SubmitPhase::Idle);
        Self {
            gateway,
            extract_options: ExtractOptions::default(),
            phase,
        }
    }

    /// Override how the report region is located
    #[must_use]
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Current phase
    pub fn phase(&self) -> SubmitPhase {
        *self.phase.borrow()
    }

    /// Watch phase transitions
    pub fn subscribe(&self) -> watch::Receiver<SubmitPhase> {
        self.phase.subscribe()
    }

    /// Check interactions between `drugs`
    ///
    /// `check_interactions` always completes before `summarize` starts.
    ///
    /// # Errors
    /// Returns [`SessionError::NotEnoughSelections`] for fewer than two drugs and
    /// [`SessionError::CheckInProgress`] while another check is running. Network
    /// failures are never errors; they end up in the report outcome.
    #[instrument(skip_all, fields(drugs = drugs.len()))]
    pub async fn check(&self, drugs: &[SelectedDrug]) -> Result<InteractionReport, SessionError> {
        if drugs.len() < MIN_SELECTIONS {
            return Err(SessionError::NotEnoughSelections {
                required: MIN_SELECTIONS,
                selected: drugs.len(),
            });
        }

        let claimed = self.phase.send_if_modified(|phase| {
            if phase.is_busy() {
                false
            } else {
                *phase = SubmitPhase::Fetching;
                true
            }
        });
        if !claimed {
            return Err(SessionError::CheckInProgress);
        }
        let _guard = PhaseGuard(&self.phase);

        let drug_list = drug_list_param(drugs);
        let names = drugs.iter().map(|d| d.suggestion.clone()).collect();
        info!(drug_list = %drug_list, "checking interactions");

        let outcome = self.run(&drug_list).await;
        self.enter(SubmitPhase::Rendering);

        Ok(InteractionReport::new(names, drug_list, outcome))
    }

    async fn run(&self, drug_list: &str) -> ReportOutcome {
        let body = match self.gateway.check_interactions(drug_list).await {
            InteractionFetch::Report(body) => body,
            InteractionFetch::Failed(message) => {
                warn!("interaction check failed, rendering error");
                return ReportOutcome::Error { message };
            }
        };

        self.enter(SubmitPhase::Extracting);
        let extract = match extract_report(&body, &self.extract_options) {
            Ok(extract) => extract,
            Err(err) => {
                return ReportOutcome::Error {
                    message: err.to_string(),
                }
            }
        };

        self.enter(SubmitPhase::Summarizing);
        match self.gateway.summarize(&extract.text).await {
            Some(summary) => ReportOutcome::Summarized { extract, summary },
            None => {
                debug!("no summary available, rendering extract");
                ReportOutcome::Extracted { extract }
            }
        }
    }

    fn enter(&self, phase: SubmitPhase) {
        debug!(?phase, "submit phase");
        self.phase.send_replace(phase);
    }
}
