//! Application state for the Q&A server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::ingestion::IngestPipeline;
use crate::retrieval::ContextAssembler;
use crate::storage::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Document and chunk store
    db: Database,
    /// Extraction + chunking pipeline
    pipeline: IngestPipeline,
    /// Context assembly
    assembler: ContextAssembler,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!(
            "Opening database at {}",
            config.storage.database_path.display()
        );
        let db = Database::new(&config.storage.database_path)?;

        Ok(Self::with_database(config, db))
    }

    fn with_database(config: AppConfig, db: Database) -> Self {
        let pipeline = IngestPipeline::new(&config.chunking);
        let assembler = ContextAssembler::new(config.chunking.max_context_chunks);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                pipeline,
                assembler,
            }),
        }
    }

    /// State backed by an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory(config: AppConfig) -> Result<Self> {
        let db = Database::in_memory()?;
        Ok(Self::with_database(config, db))
    }

    /// Service configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Document and chunk store
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    /// Ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Context assembler
    pub fn assembler(&self) -> &ContextAssembler {
        &self.inner.assembler
    }
}
