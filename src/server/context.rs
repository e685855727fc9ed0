//! Request-scoped identity and document selection

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::Error;

/// Immutable per-request context supplied by the fronting session layer.
///
/// The session layer resolves cookies to `x-user-id` and, when the user has
/// selected a document, `x-document-id`. Authentication has already
/// happened there; the handlers still re-verify document ownership against
/// the store before reading chunks, so a forged or stale selection cannot
/// reach another user's content.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    /// Authenticated user id
    pub user_id: i64,
    /// Currently selected document, if any
    pub document_id: Option<i64>,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .ok_or_else(|| Error::Authorization("Unauthorized".to_string()))?;

        let document_id = parts
            .headers
            .get("x-document-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok());

        Ok(Self {
            user_id,
            document_id,
        })
    }
}
