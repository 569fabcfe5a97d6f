//! Negin - Drug interaction checker
//!
//! Negin looks up drugs by partial name, collects a selection, and checks the
//! selection for interactions through a small relay in front of a third-party
//! drug site and an AI summarisation service.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and port traits
//! - **Service Layer** (`services`): Session orchestration, debouncing, parsing and rendering
//! - **Infrastructure Layer** (`infrastructure`): HTTP clients, the relay server, config and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use negin::{RelayGatewayClient, Session, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let gateway = Arc::new(RelayGatewayClient::new(&config.gateway)?);
//!     let mut session = Session::new(gateway, &config.search);
//!     for name in ["aspirin", "warfarin"] {
//!         if let Some(found) = session.lookup(name).await.into_iter().next() {
//!             session.select(found);
//!         }
//!     }
//!     let report = session.submit().await?;
//!     println!("{:?}", report.outcome);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::SessionError;
pub use domain::models::{
    Config, InteractionReport, InteractionSummary, ReportOutcome, SelectedDrug, SeverityTier,
    SubmitPhase, Suggestion,
};
pub use domain::ports::{DrugSource, InteractionGateway, ReportSummarizer};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::gateway::RelayGatewayClient;
pub use infrastructure::relay::RelayServer;
pub use services::{Debouncer, SelectionState, Session};
