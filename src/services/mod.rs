pub mod checker;
pub mod debounce;
pub mod renderer;
pub mod report_parser;
pub mod search;
pub mod selection;
pub mod session;

pub use checker::InteractionChecker;
pub use debounce::Debouncer;
pub use renderer::{
    render_report, render_selection, render_suggestions, ReportView, SelectionView,
    SessionView, SuggestionListView, GENERIC_SUMMARY_FAILURE,
};
pub use report_parser::{extract_report, normalize_summary, ExtractError, ExtractOptions, NormalizedSummary};
pub use search::SuggestionFeed;
pub use selection::{SelectionState, MIN_SELECTIONS};
pub use session::Session;
