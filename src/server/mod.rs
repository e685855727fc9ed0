//! HTTP server for the document Q&A service

pub mod context;
pub mod routes;
pub mod state;

pub use context::RequestContext;
pub use state::AppState;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::{Error, Result};

/// The Q&A HTTP server
pub struct AppServer {
    state: AppState,
}

impl AppServer {
    /// Create a server from configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let state = AppState::new(config)?;
        Ok(Self { state })
    }

    /// Build the full router with middleware
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health))
            .nest("/api", routes::api_routes(&self.state))
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new());

        if self.state.config().server.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router.with_state(self.state.clone())
    }

    /// Bind and serve until the process is stopped
    pub async fn start(&self) -> Result<()> {
        let addr = format!(
            "{}:{}",
            self.state.config().server.host,
            self.state.config().server.port
        );

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Configuration(format!("Failed to bind {}: {}", addr, e)))?;

        tracing::info!("Listening on {}", addr);

        axum::serve(listener, self.build_router())
            .await
            .map_err(Error::Io)?;

        Ok(())
    }
}

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
