//! Upstream clients used by the relay
//!
//! - Drug site: autocomplete and interaction-check pages
//! - Summarizer: generative language API that condenses a report into JSON

pub mod drugs;
pub mod errors;
pub mod prompt;
pub mod summarizer;

pub use drugs::DrugSiteClient;
pub use errors::UpstreamError;
pub use summarizer::GenerativeSummarizer;
