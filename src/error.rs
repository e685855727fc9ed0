//! Error types for the document Q&A service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed request fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session, or the selected document is not owned by the caller
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Requested resource does not exist (document, chunks)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend selector or credential invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// LLM backend call failed (timeout, rate limit, malformed response)
    #[error("Provider error: {0}")]
    Provider(String),

    /// PDF could not be parsed; non-fatal during upload
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Database read/write failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            Error::Authorization(msg) => (StatusCode::FORBIDDEN, "authorization_error", msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            Error::Configuration(msg) => (StatusCode::BAD_REQUEST, "configuration_error", msg.clone()),
            Error::Provider(msg) => (StatusCode::BAD_GATEWAY, "provider_error", msg.clone()),
            Error::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "extraction_error",
                msg.clone(),
            ),
            Error::Persistence(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "persistence_error",
                msg.clone(),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
