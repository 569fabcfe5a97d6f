//! Domain layer for the Negin interaction checker
//!
//! This module contains core models and the port traits infrastructure implements.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::SessionError;
