//! LLM backend providers and per-request resolution

pub mod groq;
pub mod llm;
pub mod ollama;

pub use groq::GroqBackend;
pub use llm::LlmBackend;
pub use ollama::OllamaBackend;

use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

/// Resolve a backend from its string selector.
///
/// Resolution happens per request, never once at process start: the
/// selector and model label arrive with each question. An unknown selector
/// is a configuration error, not a silent fallback.
pub fn resolve_backend(
    config: &LlmConfig,
    model_type: &str,
    model_name: &str,
) -> Result<Box<dyn LlmBackend>> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    match model_type {
        "groq" => Ok(Box::new(GroqBackend::new(&config.groq, model_name, timeout)?)),
        "ollama" => Ok(Box::new(OllamaBackend::new(
            &config.ollama,
            model_name,
            timeout,
        )?)),
        other => Err(Error::Configuration(format!(
            "Unsupported backend: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LlmConfig {
        let mut config = LlmConfig::default();
        config.groq.api_key = Some("test-key".to_string());
        config
    }

    #[test]
    fn resolves_known_selectors() {
        let config = test_config();
        assert_eq!(
            resolve_backend(&config, "groq", "llama3-8b-8192")
                .unwrap()
                .name(),
            "groq"
        );
        assert_eq!(
            resolve_backend(&config, "ollama", "phi3").unwrap().name(),
            "ollama"
        );
    }

    #[test]
    fn unknown_selector_is_a_configuration_error() {
        let err = resolve_backend(&test_config(), "bedrock", "claude").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
