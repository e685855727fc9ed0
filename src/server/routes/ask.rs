//! Question-answering endpoint

use axum::{extract::State, Json};
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::resolve_backend;
use crate::server::context::RequestContext;
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse};

/// POST /api/ask - Answer a question about the selected document
pub async fn ask_question(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let answer = answer_question(&state, &ctx, &request).await?;
    Ok(Json(AskResponse { answer }))
}

/// The per-question flow: validate, verify ownership, load chunks, assemble
/// context, resolve the backend, dispatch under a deadline. Terminal states
/// are an answer or an error; no automatic retries.
pub(crate) async fn answer_question(
    state: &AppState,
    ctx: &RequestContext,
    request: &AskRequest,
) -> Result<String> {
    let start = Instant::now();

    if request.question.trim().is_empty() {
        return Err(Error::Validation("No question provided".to_string()));
    }
    if request.model_type.is_empty() || request.model_name.is_empty() {
        return Err(Error::Validation(
            "Model type and name must be provided".to_string(),
        ));
    }

    let document_id = ctx
        .document_id
        .ok_or_else(|| Error::NotFound("No document selected".to_string()))?;

    // Re-verify ownership; the session layer is not trusted for this
    let document = state
        .db()
        .get_document(document_id, ctx.user_id)?
        .ok_or_else(|| {
            Error::Authorization("Document not found or access denied".to_string())
        })?;

    let chunks = state.db().load_chunks(document.id)?;
    tracing::info!(
        user_id = ctx.user_id,
        document_id = document.id,
        "Loaded {} chunks",
        chunks.len()
    );

    let context = state.assembler().assemble(&chunks)?;

    // Backend resolution fails on misconfiguration before any prompt is sent
    let backend = resolve_backend(&state.config().llm, &request.model_type, &request.model_name)?;

    let prompt = PromptBuilder::build_qa_prompt(&request.question, &context);

    tracing::info!(
        user_id = ctx.user_id,
        document_id = document.id,
        backend = backend.name(),
        model = backend.model(),
        "Dispatching question"
    );

    // The handler owns the deadline; an abandoned backend call must not
    // hang the request indefinitely
    let deadline = Duration::from_secs(state.config().llm.request_timeout_secs);
    let answer = timeout(deadline, backend.invoke(&prompt))
        .await
        .map_err(|_| {
            Error::Provider(format!(
                "Backend call exceeded {}s deadline",
                deadline.as_secs()
            ))
        })??;

    tracing::info!(
        user_id = ctx.user_id,
        document_id = document.id,
        backend = backend.name(),
        "Answered in {}ms",
        start.elapsed().as_millis()
    );

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_state() -> AppState {
        let mut config = AppConfig::default();
        config.llm.groq.api_key = Some("test-key".to_string());
        AppState::in_memory(config).unwrap()
    }

    fn request(question: &str, model_type: &str, model_name: &str) -> AskRequest {
        AskRequest {
            question: question.to_string(),
            model_type: model_type.to_string(),
            model_name: model_name.to_string(),
        }
    }

    fn ctx(user_id: i64, document_id: Option<i64>) -> RequestContext {
        RequestContext {
            user_id,
            document_id,
        }
    }

    #[tokio::test]
    async fn empty_question_fails_validation() {
        let state = test_state();
        let err = answer_question(&state, &ctx(1, Some(1)), &request("  ", "groq", "m"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn missing_model_selection_fails_validation() {
        let state = test_state();
        let err = answer_question(&state, &ctx(1, Some(1)), &request("q?", "", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn no_selected_document_fails_before_any_backend_work() {
        let state = test_state();
        let err = answer_question(&state, &ctx(1, None), &request("q?", "groq", "m"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn forged_selection_of_another_users_document_is_denied() {
        let state = test_state();
        let doc_id = state.db().insert_document(2, "theirs.pdf", b"%PDF-").unwrap();
        state
            .db()
            .save_chunks(doc_id, &["secret".to_string()])
            .unwrap();

        let err = answer_question(&state, &ctx(1, Some(doc_id)), &request("q?", "groq", "m"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Authorization(_)));
    }

    #[tokio::test]
    async fn document_without_chunks_reports_no_content() {
        let state = test_state();
        let doc_id = state.db().insert_document(1, "scan.pdf", b"%PDF-").unwrap();

        let err = answer_question(&state, &ctx(1, Some(doc_id)), &request("q?", "groq", "m"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_backend_fails_before_dispatch() {
        let state = test_state();
        let doc_id = state.db().insert_document(1, "mine.pdf", b"%PDF-").unwrap();
        state
            .db()
            .save_chunks(doc_id, &["some content".to_string()])
            .unwrap();

        let err = answer_question(
            &state,
            &ctx(1, Some(doc_id)),
            &request("q?", "bedrock", "claude"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
