//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - InteractionGateway: client-side access to the relay
//! - DrugSource: the relay's access to the drug site
//! - ReportSummarizer: the relay's access to the AI summarisation service
//!
//! These traits keep the session and relay logic independent of HTTP details.

pub mod gateway;
pub mod upstream;

pub use gateway::InteractionGateway;
pub use upstream::{DrugSource, ReportSummarizer};
