//! Groq hosted inference backend (OpenAI-compatible chat completions)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GroqConfig;
use crate::error::{Error, Result};

use super::llm::LlmBackend;

/// Groq chat completions backend
#[derive(Debug)]
pub struct GroqBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl GroqBackend {
    /// Create a backend for the given user-facing model label.
    ///
    /// Fails with a configuration error when no API key is available, so
    /// misconfiguration surfaces before any prompt is dispatched.
    pub fn new(config: &GroqConfig, model_name: &str, timeout: Duration) -> Result<Self> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => std::env::var(&config.api_key_env).map_err(|_| {
                Error::Configuration(format!(
                    "Groq API key not found (set {})",
                    config.api_key_env
                ))
            })?,
        };

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            model: resolve_model_alias(model_name),
            temperature: config.temperature,
        })
    }
}

/// Map a user-facing model label to the Groq wire identifier.
///
/// Unknown labels pass through unchanged so newly released models work
/// without a code change.
pub fn resolve_model_alias(label: &str) -> String {
    match label {
        "llama3-8b-8192" => "llama3-8b-8192",
        "llama3-70b-8192" => "llama3-70b-8192",
        "mixtral-8x7b-32768" => "mixtral-8x7b-32768",
        "gemma-7b-it" => "gemma-7b-it",
        other => other,
    }
    .to_string()
}

#[async_trait]
impl LlmBackend for GroqBackend {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/openai/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Groq request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Groq generation failed: HTTP {} - {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse Groq response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Provider("Groq response contained no choices".to_string()))
    }

    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_wire_identifiers() {
        assert_eq!(resolve_model_alias("llama3-8b-8192"), "llama3-8b-8192");
        assert_eq!(resolve_model_alias("gemma-7b-it"), "gemma-7b-it");
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(
            resolve_model_alias("llama-3.3-70b-versatile"),
            "llama-3.3-70b-versatile"
        );
    }

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let config = GroqConfig {
            api_key: None,
            api_key_env: "DOCQA_TEST_UNSET_GROQ_KEY".to_string(),
            ..GroqConfig::default()
        };

        let err = GroqBackend::new(&config, "llama3-8b-8192", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let config = GroqConfig {
            api_key: Some("test-key".to_string()),
            api_key_env: "DOCQA_TEST_UNSET_GROQ_KEY".to_string(),
            ..GroqConfig::default()
        };

        let backend =
            GroqBackend::new(&config, "llama3-8b-8192", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.name(), "groq");
        assert_eq!(backend.model(), "llama3-8b-8192");
    }
}
