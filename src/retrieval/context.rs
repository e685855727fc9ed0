//! Context assembly from stored chunks

use crate::error::{Error, Result};

/// Assembles a bounded context string from a document's chunk sequence.
///
/// Selection is a plain prefix of the stored order: no embedding index
/// exists and no similarity ranking is applied. The first-N cutoff bounds
/// the prompt size sent to the backend.
pub struct ContextAssembler {
    /// Maximum number of chunks included in a context
    max_chunks: usize,
}

impl ContextAssembler {
    /// Create an assembler with the given chunk budget
    pub fn new(max_chunks: usize) -> Self {
        Self { max_chunks }
    }

    /// Join the first `max_chunks` chunks into one context blob.
    ///
    /// An empty chunk sequence is a NotFound error, never an empty context:
    /// answering against no content must surface to the caller.
    pub fn assemble(&self, chunks: &[String]) -> Result<String> {
        if chunks.is_empty() {
            return Err(Error::NotFound(
                "No content found for the selected document".to_string(),
            ));
        }

        let selected = &chunks[..chunks.len().min(self.max_chunks)];
        Ok(selected.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("chunk {}", i)).collect()
    }

    #[test]
    fn joins_with_blank_line() {
        let assembler = ContextAssembler::new(10);
        let context = assembler.assemble(&chunks(3)).unwrap();
        assert_eq!(context, "chunk 0\n\nchunk 1\n\nchunk 2");
    }

    #[test]
    fn truncates_to_prefix() {
        let assembler = ContextAssembler::new(10);
        let context = assembler.assemble(&chunks(25)).unwrap();
        assert_eq!(context.matches("chunk").count(), 10);
        assert!(context.starts_with("chunk 0"));
        assert!(context.ends_with("chunk 9"));
    }

    #[test]
    fn empty_sequence_is_not_found() {
        let assembler = ContextAssembler::new(10);
        let err = assembler.assemble(&[]).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
