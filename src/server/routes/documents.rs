//! Document upload, listing, retrieval and deletion

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::error::{Error, Result};
use crate::server::context::RequestContext;
use crate::server::state::AppState;
use crate::types::{DocumentSummary, UploadResponse};

/// POST /api/documents - Upload and ingest a PDF
pub async fn upload_document(
    State(state): State<AppState>,
    ctx: RequestContext,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut filename: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::Validation(format!("Failed to read upload: {}", e)))?;
            data = Some(bytes.to_vec());
        }
    }

    let filename = filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| Error::Validation("No selected file".to_string()))?;
    let data = data.ok_or_else(|| Error::Validation("No file part in request".to_string()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(Error::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }
    if data.is_empty() {
        return Err(Error::Validation("Uploaded file is empty".to_string()));
    }

    tracing::info!(
        user_id = ctx.user_id,
        filename = %filename,
        size = data.len(),
        "Uploading document"
    );

    // Chunk on a blocking thread; extraction is CPU-bound
    let pipeline = state.pipeline().clone();
    let payload = data.clone();
    let extracted = tokio::task::spawn_blocking(move || pipeline.process(&payload))
        .await
        .map_err(|e| Error::Extraction(format!("Extraction task failed: {}", e)))?;

    // The original bytes are kept even when extraction fails, so the user
    // can still view and later delete the document
    let document_id = state.db().insert_document(ctx.user_id, &filename, &data)?;

    let (chunks, warning) = match extracted {
        Ok(chunks) if chunks.is_empty() => (
            Vec::new(),
            Some("No text could be extracted from this PDF".to_string()),
        ),
        Ok(chunks) => (chunks, None),
        Err(e) => {
            tracing::warn!(
                user_id = ctx.user_id,
                document_id,
                "Extraction failed: {}",
                e
            );
            (
                Vec::new(),
                Some(format!("Stored, but text extraction failed: {}", e)),
            )
        }
    };

    if !chunks.is_empty() {
        state.db().save_chunks(document_id, &chunks)?;
    }

    tracing::info!(
        user_id = ctx.user_id,
        document_id,
        chunk_count = chunks.len(),
        "Document ingested"
    );

    Ok(Json(UploadResponse {
        id: document_id,
        filename,
        chunk_count: chunks.len(),
        warning,
    }))
}

/// GET /api/documents - List the caller's documents, most recent first
pub async fn list_documents(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<DocumentSummary>>> {
    let documents = state.db().list_documents(ctx.user_id)?;
    Ok(Json(documents.iter().map(DocumentSummary::from).collect()))
}

/// GET /api/documents/:id/file - Serve the stored PDF bytes verbatim
pub async fn download_document(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(document_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let (filename, data) = state
        .db()
        .get_document_bytes(document_id, ctx.user_id)?
        .ok_or_else(|| Error::NotFound("Document not found".to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("inline; filename=\"{}\"", filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((headers, data))
}

/// DELETE /api/documents/:id - Remove a document and its chunks
pub async fn delete_document(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(document_id): Path<i64>,
) -> Result<StatusCode> {
    let deleted = state.db().delete_document(document_id, ctx.user_id)?;
    if !deleted {
        return Err(Error::NotFound("Document not found".to_string()));
    }

    tracing::info!(user_id = ctx.user_id, document_id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}
