//! A single checking session: search input, selection, and the current report.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::SessionError;
use crate::domain::models::{InteractionReport, SearchConfig, SubmitPhase, Suggestion};
use crate::domain::ports::InteractionGateway;
use crate::services::checker::InteractionChecker;
use crate::services::renderer::{
    render_report, render_selection, render_suggestions, SessionView,
};
use crate::services::report_parser::ExtractOptions;
use crate::services::search::SuggestionFeed;
use crate::services::selection::SelectionState;

/// State container for one user's checking session
///
/// Owns the selection and the report; the suggestion feed is shared so input
/// can keep flowing while a submit is awaiting the network.
pub struct Session {
    id: Uuid,
    gateway: Arc<dyn InteractionGateway>,
    feed: Arc<SuggestionFeed>,
    selection: SelectionState,
    checker: InteractionChecker,
    report: Option<InteractionReport>,
}

impl Session {
    /// Start an empty session backed by `gateway`
    pub fn new(gateway: Arc<dyn InteractionGateway>, search: &SearchConfig) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "session created");
        Self {
            id,
            feed: Arc::new(SuggestionFeed::new(Arc::clone(&gateway), search)),
            checker: InteractionChecker::new(Arc::clone(&gateway)),
            gateway,
            selection: SelectionState::new(),
            report: None,
        }
    }

    /// Override how the report region is located
    #[must_use]
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.checker = self.checker.with_extract_options(options);
        self
    }

    /// Identifier used to correlate this session's log lines
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Feed raw search-box text into the debounced autocomplete
    pub fn input(&self, text: &str) -> u64 {
        self.feed.on_input(text)
    }

    /// Clear the search box
    pub fn clear_query(&self) {
        self.feed.clear();
    }

    /// Hide the suggestion panel, keeping the typed query
    pub fn dismiss_suggestions(&self) {
        self.feed.dismiss();
    }

    /// Shared handle to the suggestion feed
    pub fn feed(&self) -> Arc<SuggestionFeed> {
        Arc::clone(&self.feed)
    }

    /// Suggestions currently on display
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.feed.current()
    }

    /// Watch suggestion updates
    pub fn subscribe_suggestions(&self) -> watch::Receiver<Vec<Suggestion>> {
        self.feed.subscribe()
    }

    /// Immediate lookup without debouncing, for non-interactive callers
    pub async fn lookup(&self, query: &str) -> Vec<Suggestion> {
        self.gateway.autocomplete(query.trim()).await
    }

    /// Pick a suggestion
    ///
    /// The query and suggestion list are cleared whether or not the drug was
    /// already selected. Returns `true` if it was added.
    #[instrument(skip(self, suggestion), fields(session = %self.id, name = %suggestion.suggestion))]
    pub fn select(&mut self, suggestion: Suggestion) -> bool {
        let added = self.selection.add(suggestion.into());
        self.feed.clear();
        if added {
            info!(selected = self.selection.len(), "drug selected");
        }
        added
    }

    /// Remove a selected drug by name
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.selection.remove(name);
        if removed {
            debug!(session = %self.id, name, "drug removed");
        }
        removed
    }

    /// Drugs selected so far
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current submit phase
    pub fn phase(&self) -> SubmitPhase {
        self.checker.phase()
    }

    /// Watch submit phase transitions
    pub fn subscribe_phase(&self) -> watch::Receiver<SubmitPhase> {
        self.checker.subscribe()
    }

    /// Whether the submit action is available
    pub fn can_submit(&self) -> bool {
        self.selection.can_submit() && !self.phase().is_busy()
    }

    /// Check the current selection and make the result the open report
    ///
    /// # Errors
    /// Returns [`SessionError`] when fewer than two drugs are selected or a check
    /// is already running. The network is not touched in either case.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn submit(&mut self) -> Result<&InteractionReport, SessionError> {
        let report = self.checker.check(self.selection.list()).await?;
        Ok(self.report.insert(report))
    }

    /// The open report, if any
    pub const fn report(&self) -> Option<&InteractionReport> {
        self.report.as_ref()
    }

    /// Close the report modal, discarding the report
    pub fn close_report(&mut self) {
        self.report = None;
    }

    /// Clear the selection, search and report
    pub fn reset(&mut self) {
        self.selection.clear();
        self.feed.clear();
        self.report = None;
    }

    /// Project the session into a view model
    pub fn view(&self) -> SessionView {
        let query = self.feed.query();
        SessionView {
            show_clear: !query.trim().is_empty(),
            query,
            loading: self.feed.is_loading(),
            suggestions: render_suggestions(&self.feed.current()),
            selection: render_selection(&self.selection, self.phase()),
            report: self.report.as_ref().map(render_report),
        }
    }
}
