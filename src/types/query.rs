//! Request types for the Q&A endpoint

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The natural-language question
    #[serde(default)]
    pub question: String,
    /// Backend selector ("groq" or "ollama")
    #[serde(default)]
    pub model_type: String,
    /// User-facing model label, aliased to a wire identifier by the backend
    #[serde(default)]
    pub model_name: String,
}
