//! SQLite storage for documents and their chunks
//!
//! Documents own their chunks: chunk writes happen in bulk at ingestion
//! time, and document deletion removes the chunks in the same transaction.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::DocumentRecord;

/// SQLite-backed document and chunk store
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .map_err(|e| Error::Persistence(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Persistence(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        // WAL mode for concurrent readers alongside writers
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA foreign_keys=ON;
        "#,
        )
        .map_err(|e| Error::Persistence(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                filename TEXT NOT NULL,
                file_data BLOB NOT NULL,
                uploaded_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_user ON documents(user_id);

            -- seq makes retrieval order explicit instead of relying on
            -- physical insertion order
            CREATE TABLE IF NOT EXISTS chunks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                document_id INTEGER NOT NULL,
                seq INTEGER NOT NULL,
                chunk_text TEXT NOT NULL,
                FOREIGN KEY (document_id) REFERENCES documents(id),
                UNIQUE (document_id, seq)
            );

            CREATE INDEX IF NOT EXISTS idx_chunks_document ON chunks(document_id);
        "#,
        )
        .map_err(|e| Error::Persistence(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Database migrations complete");
        Ok(())
    }

    // ==================== Documents ====================

    /// Store a document's metadata and raw bytes; returns the new id
    pub fn insert_document(&self, user_id: i64, filename: &str, data: &[u8]) -> Result<i64> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO documents (user_id, filename, file_data, uploaded_at) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, filename, data, Utc::now().to_rfc3339()],
        )
        .map_err(|e| Error::Persistence(format!("Failed to insert document: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    /// Fetch a document's metadata, scoped to its owner.
    ///
    /// Returns None both when the document does not exist and when it is
    /// owned by a different user; callers cannot distinguish the two.
    pub fn get_document(&self, document_id: i64, user_id: i64) -> Result<Option<DocumentRecord>> {
        let conn = self.conn.lock();

        let record = conn
            .query_row(
                "SELECT id, user_id, filename, uploaded_at FROM documents WHERE id = ?1 AND user_id = ?2",
                params![document_id, user_id],
                row_to_document,
            )
            .optional()
            .map_err(|e| Error::Persistence(format!("Failed to get document: {}", e)))?;

        Ok(record)
    }

    /// Fetch a document's raw bytes verbatim, scoped to its owner
    pub fn get_document_bytes(
        &self,
        document_id: i64,
        user_id: i64,
    ) -> Result<Option<(String, Vec<u8>)>> {
        let conn = self.conn.lock();

        let row = conn
            .query_row(
                "SELECT filename, file_data FROM documents WHERE id = ?1 AND user_id = ?2",
                params![document_id, user_id],
                |row| {
                    let filename: String = row.get(0)?;
                    let data: Vec<u8> = row.get(1)?;
                    Ok((filename, data))
                },
            )
            .optional()
            .map_err(|e| Error::Persistence(format!("Failed to get document bytes: {}", e)))?;

        Ok(row)
    }

    /// List a user's documents, most recent first
    pub fn list_documents(&self, user_id: i64) -> Result<Vec<DocumentRecord>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, filename, uploaded_at FROM documents \
                 WHERE user_id = ?1 ORDER BY uploaded_at DESC, id DESC",
            )
            .map_err(|e| Error::Persistence(format!("Failed to prepare query: {}", e)))?;

        let records = stmt
            .query_map(params![user_id], row_to_document)
            .map_err(|e| Error::Persistence(format!("Failed to list documents: {}", e)))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Persistence(format!("Failed to read document row: {}", e)))?;

        Ok(records)
    }

    /// Delete a document and all of its chunks in one transaction.
    ///
    /// Both succeed or both fail; a document owned by another user is left
    /// untouched and `false` is returned.
    pub fn delete_document(&self, document_id: i64, user_id: i64) -> Result<bool> {
        let mut conn = self.conn.lock();

        let tx = conn
            .transaction()
            .map_err(|e| Error::Persistence(format!("Failed to begin transaction: {}", e)))?;

        let owned: Option<i64> = tx
            .query_row(
                "SELECT id FROM documents WHERE id = ?1 AND user_id = ?2",
                params![document_id, user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::Persistence(format!("Failed to check ownership: {}", e)))?;

        if owned.is_none() {
            return Ok(false);
        }

        tx.execute(
            "DELETE FROM chunks WHERE document_id = ?1",
            params![document_id],
        )
        .map_err(|e| Error::Persistence(format!("Failed to delete chunks: {}", e)))?;

        tx.execute(
            "DELETE FROM documents WHERE id = ?1 AND user_id = ?2",
            params![document_id, user_id],
        )
        .map_err(|e| Error::Persistence(format!("Failed to delete document: {}", e)))?;

        tx.commit()
            .map_err(|e| Error::Persistence(format!("Failed to commit deletion: {}", e)))?;

        Ok(true)
    }

    // ==================== Chunks ====================

    /// Append all chunks for a document in one transaction, preserving order
    /// through an explicit sequence number.
    pub fn save_chunks(&self, document_id: i64, chunks: &[String]) -> Result<()> {
        let mut conn = self.conn.lock();

        let tx = conn
            .transaction()
            .map_err(|e| Error::Persistence(format!("Failed to begin transaction: {}", e)))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO chunks (document_id, seq, chunk_text) VALUES (?1, ?2, ?3)",
                )
                .map_err(|e| Error::Persistence(format!("Failed to prepare insert: {}", e)))?;

            for (seq, text) in chunks.iter().enumerate() {
                stmt.execute(params![document_id, seq as i64, text])
                    .map_err(|e| Error::Persistence(format!("Failed to insert chunk: {}", e)))?;
            }
        }

        tx.commit()
            .map_err(|e| Error::Persistence(format!("Failed to commit chunks: {}", e)))?;

        Ok(())
    }

    /// Load a document's chunk texts in original insertion order
    pub fn load_chunks(&self, document_id: i64) -> Result<Vec<String>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare("SELECT chunk_text FROM chunks WHERE document_id = ?1 ORDER BY seq ASC")
            .map_err(|e| Error::Persistence(format!("Failed to prepare query: {}", e)))?;

        let chunks = stmt
            .query_map(params![document_id], |row| row.get::<_, String>(0))
            .map_err(|e| Error::Persistence(format!("Failed to load chunks: {}", e)))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Persistence(format!("Failed to read chunk row: {}", e)))?;

        Ok(chunks)
    }

    /// Number of chunks stored for a document
    pub fn chunk_count(&self, document_id: i64) -> Result<usize> {
        let conn = self.conn.lock();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM chunks WHERE document_id = ?1",
                params![document_id],
                |row| row.get(0),
            )
            .map_err(|e| Error::Persistence(format!("Failed to count chunks: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_document(row: &rusqlite::Row) -> rusqlite::Result<DocumentRecord> {
    let id: i64 = row.get(0)?;
    let user_id: i64 = row.get(1)?;
    let filename: String = row.get(2)?;
    let uploaded_at_str: String = row.get(3)?;

    Ok(DocumentRecord {
        id,
        user_id,
        filename,
        uploaded_at: DateTime::parse_from_rfc3339(&uploaded_at_str)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chunks(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("chunk number {}", i)).collect()
    }

    #[test]
    fn chunk_round_trip_preserves_order() {
        let db = Database::in_memory().unwrap();
        let doc_id = db.insert_document(1, "test.pdf", b"%PDF-").unwrap();

        let chunks = sample_chunks(25);
        db.save_chunks(doc_id, &chunks).unwrap();

        let loaded = db.load_chunks(doc_id).unwrap();
        assert_eq!(loaded, chunks);
    }

    #[test]
    fn delete_cascades_to_chunks() {
        let db = Database::in_memory().unwrap();
        let doc_id = db.insert_document(1, "test.pdf", b"%PDF-").unwrap();
        db.save_chunks(doc_id, &sample_chunks(5)).unwrap();

        assert!(db.delete_document(doc_id, 1).unwrap());

        assert!(db.get_document(doc_id, 1).unwrap().is_none());
        assert!(db.load_chunks(doc_id).unwrap().is_empty());
    }

    #[test]
    fn delete_by_non_owner_leaves_everything() {
        let db = Database::in_memory().unwrap();
        let doc_id = db.insert_document(1, "test.pdf", b"%PDF-").unwrap();
        db.save_chunks(doc_id, &sample_chunks(3)).unwrap();

        assert!(!db.delete_document(doc_id, 2).unwrap());

        assert!(db.get_document(doc_id, 1).unwrap().is_some());
        assert_eq!(db.load_chunks(doc_id).unwrap().len(), 3);
    }

    #[test]
    fn ownership_scopes_document_reads() {
        let db = Database::in_memory().unwrap();
        let doc_id = db.insert_document(1, "mine.pdf", b"%PDF-").unwrap();

        assert!(db.get_document(doc_id, 1).unwrap().is_some());
        assert!(db.get_document(doc_id, 2).unwrap().is_none());
        assert!(db.get_document_bytes(doc_id, 2).unwrap().is_none());
    }

    #[test]
    fn users_see_only_their_documents() {
        let db = Database::in_memory().unwrap();
        let a = db.insert_document(1, "a.pdf", b"%PDF-a").unwrap();
        let b = db.insert_document(2, "b.pdf", b"%PDF-b").unwrap();
        db.save_chunks(a, &["alpha".to_string()]).unwrap();
        db.save_chunks(b, &["beta".to_string()]).unwrap();

        let user1_docs = db.list_documents(1).unwrap();
        assert_eq!(user1_docs.len(), 1);
        assert_eq!(user1_docs[0].filename, "a.pdf");

        assert_eq!(db.load_chunks(a).unwrap(), vec!["alpha".to_string()]);
        assert_eq!(db.load_chunks(b).unwrap(), vec!["beta".to_string()]);
    }

    #[test]
    fn document_bytes_round_trip_verbatim() {
        let db = Database::in_memory().unwrap();
        let payload = vec![0u8, 1, 2, 255, 37, 80];
        let doc_id = db.insert_document(1, "raw.pdf", &payload).unwrap();

        let (filename, data) = db.get_document_bytes(doc_id, 1).unwrap().unwrap();
        assert_eq!(filename, "raw.pdf");
        assert_eq!(data, payload);
    }

    #[test]
    fn empty_chunk_save_is_a_noop() {
        let db = Database::in_memory().unwrap();
        let doc_id = db.insert_document(1, "empty.pdf", b"%PDF-").unwrap();
        db.save_chunks(doc_id, &[]).unwrap();
        assert_eq!(db.chunk_count(doc_id).unwrap(), 0);
    }
}
