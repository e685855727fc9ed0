//! Document model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document: one uploaded PDF owned by a user.
///
/// The raw byte payload lives in the database and is fetched separately;
/// this record carries only the metadata needed for listings and checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Database id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Display filename
    pub filename: String,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
}

/// Cleaned text extracted from a single PDF page.
///
/// Transient: produced by the extractor, consumed by the chunker, never
/// persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-based)
    pub page: u32,
    /// Cleaned text content
    pub text: String,
}
