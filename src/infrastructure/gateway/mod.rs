pub mod client;
pub mod envelope;
pub mod errors;

pub use client::{interaction_error_fragment, RelayGatewayClient};
pub use envelope::{decode_summary, SummaryEnvelope};
pub use errors::GatewayError;
