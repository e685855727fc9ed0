//! Document ingestion: PDF extraction and chunk segmentation

pub mod chunker;
pub mod extractor;

pub use chunker::RecursiveChunker;
pub use extractor::PdfExtractor;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::PageText;

/// Ingestion pipeline: raw PDF bytes in, ordered chunk texts out.
#[derive(Clone)]
pub struct IngestPipeline {
    extractor: PdfExtractor,
    chunker: RecursiveChunker,
}

impl IngestPipeline {
    /// Create a pipeline from chunking configuration
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            extractor: PdfExtractor::new(),
            chunker: RecursiveChunker::new(config.chunk_size, config.chunk_overlap),
        }
    }

    /// Extract, merge and chunk a PDF payload.
    ///
    /// Splitting runs over the whole-document concatenation with page
    /// markers inline, so a chunk may span a page boundary.
    pub fn process(&self, data: &[u8]) -> Result<Vec<String>> {
        let pages = self.extractor.extract(data)?;
        tracing::info!("Extracted {} pages with text", pages.len());

        let merged = merge_pages(&pages);
        tracing::info!("Total text length: {} characters", merged.chars().count());

        Ok(self.chunker.split(&merged))
    }
}

/// Concatenate page texts with `=== Page N ===` markers between them
fn merge_pages(pages: &[PageText]) -> String {
    pages
        .iter()
        .map(|p| format!("\n\n=== Page {} ===\n\n{}", p.page, p.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_text_carries_page_markers() {
        let pages = vec![
            PageText {
                page: 1,
                text: "alpha".to_string(),
            },
            PageText {
                page: 3,
                text: "gamma".to_string(),
            },
        ];
        let merged = merge_pages(&pages);
        assert!(merged.contains("=== Page 1 ===\n\nalpha"));
        assert!(merged.contains("=== Page 3 ===\n\ngamma"));
    }

    #[test]
    fn no_pages_no_chunks() {
        let pipeline = IngestPipeline::new(&ChunkingConfig::default());
        assert!(pipeline.chunker.split(&merge_pages(&[])).is_empty());
    }
}
