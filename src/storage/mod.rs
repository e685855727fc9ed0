//! Persistent storage for documents and chunks

pub mod database;

pub use database::Database;
