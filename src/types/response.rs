//! Response types for the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::DocumentRecord;

/// Response body for `POST /api/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The generated answer text
    pub answer: String,
}

/// Response body for `POST /api/documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Id of the stored document
    pub id: i64,
    /// Display filename
    pub filename: String,
    /// Number of chunks created; zero when extraction failed
    pub chunk_count: usize,
    /// Processing warning when ingestion degraded gracefully
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// One entry in `GET /api/documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Database id
    pub id: i64,
    /// Display filename
    pub filename: String,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
}

impl From<&DocumentRecord> for DocumentSummary {
    fn from(doc: &DocumentRecord) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            uploaded_at: doc.uploaded_at,
        }
    }
}
