pub mod config;
pub mod drug;
pub mod report;

pub use config::{
    Config, GatewayConfig, LoggingConfig, RelayConfig, SearchConfig, SummarizerConfig,
    UpstreamConfig,
};
pub use drug::{drug_list_param, AutocompletePayload, SelectedDrug, Suggestion};
pub use report::{
    ExtractedReport, InteractionFetch, InteractionReport, InteractionSummary, ReportOutcome,
    SeverityTier, SubmitPhase,
};
