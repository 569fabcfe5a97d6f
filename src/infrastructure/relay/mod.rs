//! Relay between the client and the third-party services
//!
//! Routes:
//! - `GET /api/autocomplete?s=`
//! - `GET /api/check-interactions?drug_list=`
//! - `POST /api/summarize`
//! - `GET /health`

pub mod handlers;
pub mod server;

pub use handlers::ErrorResponse;
pub use server::{RelayServer, RelayState};
