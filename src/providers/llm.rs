//! LLM backend trait for answer generation

use async_trait::async_trait;

use crate::error::Result;

/// A single-turn LLM inference backend.
///
/// Implementations:
/// - `GroqBackend`: hosted inference over the Groq chat completions API
/// - `OllamaBackend`: locally hosted model behind an Ollama server
///
/// Backends are resolved per request from a string selector, so two
/// concurrent questions may target different backends without interference.
/// No conversation history is retained across calls.
#[async_trait]
pub trait LlmBackend: Send + Sync + std::fmt::Debug {
    /// Run one prompt through the model and return the textual answer
    async fn invoke(&self, prompt: &str) -> Result<String>;

    /// Backend name for logging
    fn name(&self) -> &str;

    /// The wire-format model identifier in use
    fn model(&self) -> &str;
}
