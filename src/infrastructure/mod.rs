//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Gateway client for the relay (client side)
//! - Upstream clients for the drug site and the summarisation service
//! - Relay HTTP server
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod relay;
pub mod upstream;
