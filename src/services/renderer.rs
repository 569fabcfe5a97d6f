//! Pure projections of session state into view models.
//!
//! Nothing here mutates state; front ends (the CLI, or a web page fed with the
//! JSON form) draw whatever these structures describe.

use serde::Serialize;

use crate::domain::models::{
    InteractionReport, ReportOutcome, SeverityTier, SubmitPhase, Suggestion,
};
use crate::services::report_parser::{fragment_text, normalize_summary};
use crate::services::selection::SelectionState;

/// Notice shown when the AI summary could not be produced
pub const GENERIC_SUMMARY_FAILURE: &str =
    "Sorry, the AI summary could not be generated. The extracted report is shown instead.";

/// Shown in the selection list when nothing is selected
pub const EMPTY_SELECTION_PLACEHOLDER: &str = "No drugs selected yet.";

/// Submit button label when idle
pub const SUBMIT_LABEL: &str = "Check Interactions";
/// Submit button label while a check is in flight
pub const SUBMIT_BUSY_LABEL: &str = "Checking...";

/// Autocomplete panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionListView {
    /// Hidden when there is nothing to suggest
    pub visible: bool,
    /// Suggestions in display order
    pub items: Vec<Suggestion>,
}

/// Build the autocomplete panel from the published suggestions
pub fn render_suggestions(suggestions: &[Suggestion]) -> SuggestionListView {
    SuggestionListView {
        visible: !suggestions.is_empty(),
        items: suggestions.to_vec(),
    }
}

/// One selected drug with its remove action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedItemView {
    /// Drug name
    pub name: String,
    /// Accessible label of the remove action
    pub remove_label: String,
}

/// The submit action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButtonView {
    /// Two or more drugs selected and no check running
    pub enabled: bool,
    /// A check is in flight
    pub busy: bool,
    /// Button text
    pub label: &'static str,
}

/// Selected drug list plus the submit button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    /// Set only when the list is empty
    pub placeholder: Option<&'static str>,
    /// Selected drugs in insertion order
    pub items: Vec<SelectedItemView>,
    /// Submit button state
    pub submit: SubmitButtonView,
}

/// Build the selected list and submit button for the given phase
pub fn render_selection(selection: &SelectionState, phase: SubmitPhase) -> SelectionView {
    let busy = phase.is_busy();
    SelectionView {
        placeholder: selection.is_empty().then_some(EMPTY_SELECTION_PLACEHOLDER),
        items: selection
            .list()
            .iter()
            .map(|drug| SelectedItemView {
                name: drug.suggestion.clone(),
                remove_label: format!("Remove {}", drug.suggestion),
            })
            .collect(),
        submit: SubmitButtonView {
            enabled: selection.can_submit() && !busy,
            busy,
            label: if busy { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL },
        },
    }
}

/// One labelled row of the summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// Row heading
    pub label: &'static str,
    /// Display value, "N/A" when missing
    pub value: String,
    /// Badge styling, set on the severity row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_class: Option<&'static str>,
}

impl SummaryRow {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            badge_class: None,
        }
    }
}

/// Content of the report modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportView {
    /// The check itself failed; `message` replaces the report
    Error {
        /// Message as received, possibly an HTML fragment
        message: String,
        /// Tag-free form of `message` for terminals
        text: String,
    },

    /// No summary; the notice is shown above the raw extract
    Unavailable {
        /// Generic failure notice
        notice: &'static str,
        /// Extracted report text
        text: String,
    },

    /// Structured summary table
    Summary {
        /// Tier driving the badge
        severity: SeverityTier,
        /// Table rows in display order
        rows: Vec<SummaryRow>,
    },
}

impl ReportView {
    /// Whether the check itself failed
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Build the report modal content for a finished check
pub fn render_report(report: &InteractionReport) -> ReportView {
    match &report.outcome {
        ReportOutcome::Error { message } => ReportView::Error {
            message: message.clone(),
            text: fragment_text(message),
        },
        ReportOutcome::Extracted { extract } => ReportView::Unavailable {
            notice: GENERIC_SUMMARY_FAILURE,
            text: extract.text.clone(),
        },
        ReportOutcome::Summarized { extract, summary } => match normalize_summary(Some(summary)) {
            Some(normalized) => ReportView::Summary {
                severity: normalized.severity,
                rows: vec![
                    SummaryRow::plain("Overall Interaction", normalized.overall_interaction),
                    SummaryRow {
                        label: "Highest Severity Level",
                        value: normalized.severity_level,
                        badge_class: Some(normalized.severity.badge_class()),
                    },
                    SummaryRow::plain("Clinical Summary", normalized.clinical_summary),
                    SummaryRow::plain(
                        "Pharmacist Recommendation",
                        normalized.pharmacist_recommendation,
                    ),
                    SummaryRow::plain("Affected Drugs", normalized.affected_drugs),
                    SummaryRow::plain("Interaction Types", normalized.interaction_types),
                ],
            },
            None => ReportView::Unavailable {
                notice: GENERIC_SUMMARY_FAILURE,
                text: extract.text.clone(),
            },
        },
    }
}

/// Everything a front end needs to draw one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Raw search-box text
    pub query: String,
    /// Whether the clear-search action is offered
    pub show_clear: bool,
    /// A lookup for the latest query is awaiting the gateway
    pub loading: bool,
    /// Autocomplete panel
    pub suggestions: SuggestionListView,
    /// Selected list and submit button
    pub selection: SelectionView,
    /// Present while the report modal is open
    pub report: Option<ReportView>,
}
