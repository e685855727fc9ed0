//! Recursive text chunking with configurable size and overlap

/// Separator cascade, coarsest first: paragraph break, line break,
/// sentence-terminal space, plain space.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Recursive-separator text splitter.
///
/// Splits on the coarsest separator present in the text and only recurses
/// into finer separators for spans that still exceed the target chunk size.
/// Adjacent chunks share `overlap` characters of trailing/leading source
/// text, so a span straddling a split point appears whole in at least one
/// chunk. An unbreakable token longer than `chunk_size` is emitted as its
/// own oversized chunk rather than truncated.
#[derive(Clone)]
pub struct RecursiveChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    overlap: usize,
}

impl RecursiveChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        debug_assert!(overlap < chunk_size, "overlap must be smaller than chunk size");
        Self { chunk_size, overlap }
    }

    /// Split text into overlapping chunks
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.split_with(text, &SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // Pick the coarsest separator that actually occurs in the text
        let found = separators
            .iter()
            .position(|sep| text.contains(sep));

        let Some(idx) = found else {
            // No separator applies: the text is a single atomic unit and is
            // emitted whole even when it exceeds the chunk size
            return vec![text.to_string()];
        };

        let separator = separators[idx];
        let finer = &separators[idx + 1..];

        let mut chunks = Vec::new();
        let mut fitting: Vec<String> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) <= self.chunk_size {
                fitting.push(piece);
            } else {
                // Flush accumulated pieces before recursing so chunk order
                // follows source order
                if !fitting.is_empty() {
                    chunks.extend(self.merge(&fitting));
                    fitting.clear();
                }
                if finer.is_empty() {
                    chunks.push(piece);
                } else {
                    chunks.extend(self.split_with(&piece, finer));
                }
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge(&fitting));
        }

        chunks
    }

    /// Merge size-fitting pieces into chunks of up to `chunk_size`
    /// characters, carrying the trailing `overlap` characters' worth of
    /// pieces into the next chunk.
    fn merge(&self, pieces: &[String]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: std::collections::VecDeque<&str> = std::collections::VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size && !window.is_empty() {
                if let Some(chunk) = join_window(&window) {
                    chunks.push(chunk);
                }

                // Shrink from the front until the carried text fits the
                // overlap budget and leaves room for the incoming piece
                while total > self.overlap || total + len > self.chunk_size {
                    match window.pop_front() {
                        Some(first) => total -= char_len(first),
                        None => break,
                    }
                }
            }

            window.push_back(piece);
            total += len;
        }

        if let Some(chunk) = join_window(&window) {
            chunks.push(chunk);
        }

        chunks
    }
}

/// Character count, not byte length
fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Join the carried pieces into a chunk, trimming boundary whitespace;
/// returns None when the result is empty.
fn join_window(window: &std::collections::VecDeque<&str>) -> Option<String> {
    let joined: String = window.iter().copied().collect();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split on a separator, re-attaching the separator to the start of the
/// following piece so no source text is lost across chunk boundaries.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    for (i, part) in text.split(separator).enumerate() {
        if i == 0 {
            if !part.is_empty() {
                pieces.push(part.to_string());
            }
        } else {
            pieces.push(format!("{}{}", separator, part));
        }
    }
    pieces
}
