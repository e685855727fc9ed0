//! # docqa
//!
//! A document question-answering service: upload a PDF, have its text
//! extracted per page and split into overlapping chunks, then ask questions
//! answered by an LLM backend grounded in the document's leading chunks.
//!
//! ## Architecture
//!
//! - [`ingestion`] - PDF text extraction and recursive chunking
//! - [`storage`] - SQLite persistence for documents and ordered chunks
//! - [`retrieval`] - context assembly from stored chunks
//! - [`generation`] - prompt construction
//! - [`providers`] - LLM backends (Groq, Ollama) with per-request resolution
//! - [`server`] - axum HTTP API

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use server::{AppServer, AppState};
