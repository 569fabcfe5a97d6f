//! Relay HTTP server.
//!
//! Forwards the client's three calls to the drug site and the summarisation
//! service, keeping a uniform `{ "error": ... }` body for 400 and 500 answers.

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{autocomplete, check_interactions, health_check, summarize};
use crate::domain::models::RelayConfig;
use crate::domain::ports::{DrugSource, ReportSummarizer};

/// Shared state for the relay handlers.
pub struct RelayState {
    /// Drug site client for autocomplete and interaction pages
    pub drugs: Arc<dyn DrugSource>,
    /// Summarisation service client
    pub summarizer: Arc<dyn ReportSummarizer>,
    /// Bind address and CORS settings
    pub config: RelayConfig,
}

/// Relay HTTP server.
pub struct RelayServer {
    state: Arc<RelayState>,
}

impl RelayServer {
    /// Create a relay over the given upstream clients
    pub fn new(
        drugs: Arc<dyn DrugSource>,
        summarizer: Arc<dyn ReportSummarizer>,
        config: RelayConfig,
    ) -> Self {
        Self {
            state: Arc::new(RelayState {
                drugs,
                summarizer,
                config,
            }),
        }
    }

    /// Build the router with all endpoints.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/api/autocomplete", get(autocomplete))
            .route("/api/check-interactions", get(check_interactions))
            .route("/api/summarize", post(summarize))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.state.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        router
    }

    fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.state.config.host, self.state.config.port).parse()?)
    }

    /// Start the server.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.addr()?;
        let router = self.build_router();

        tracing::info!("Relay server is running at http://{}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.build_router();

        tracing::info!("Relay server is running at http://{}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
