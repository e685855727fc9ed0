//! Shared types for the document Q&A service

pub mod document;
pub mod query;
pub mod response;

pub use document::{DocumentRecord, PageText};
pub use query::AskRequest;
pub use response::{AskResponse, DocumentSummary, UploadResponse};
