//! HTTP route handlers

pub mod ask;
pub mod documents;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::server::state::AppState;

/// Build the API router
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let max_upload = state.config().server.max_upload_size;

    Router::new()
        .route(
            "/documents",
            get(documents::list_documents)
                .post(documents::upload_document)
                .layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/documents/:id/file", get(documents::download_document))
        .route("/documents/:id", axum::routing::delete(documents::delete_document))
        .route("/ask", post(ask::ask_question))
        .route("/info", get(service_info))
}

/// GET /api/info - Service metadata and the configured backends
async fn service_info(State(state): State<AppState>) -> Json<Value> {
    let config = state.config();
    Json(json!({
        "name": "docqa",
        "version": env!("CARGO_PKG_VERSION"),
        "backends": ["groq", "ollama"],
        "chunking": {
            "chunk_size": config.chunking.chunk_size,
            "chunk_overlap": config.chunking.chunk_overlap,
            "max_context_chunks": config.chunking.max_context_chunks,
        },
        "max_upload_size": config.server.max_upload_size,
    }))
}
