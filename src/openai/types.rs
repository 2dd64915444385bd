//! Request and response types for the OpenAI API

use serde::{Deserialize, Serialize};

/// Request body for the embeddings endpoint
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    /// Embedding model name
    pub model: String,

    /// Text to embed
    pub input: String,
}

/// Response body for the embeddings endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    /// One entry per input text
    #[serde(default)]
    pub data: Vec<EmbeddingData>,

    /// Error discriminator; present when the call failed
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// A single embedding in an embeddings response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingData {
    /// The embedding vector
    pub embedding: Vec<f64>,
}

/// Error object carried inside a response body
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message
    pub message: String,

    /// Error category reported by the service
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Request body for the completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Completion model name
    pub model: String,

    /// The full prompt text
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Nucleus sampling parameter
    pub top_p: f32,

    /// Frequency penalty
    pub frequency_penalty: f32,

    /// Presence penalty
    pub presence_penalty: f32,

    /// Optional stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl CompletionRequest {
    /// Build a request with deterministic sampling: temperature 0, top_p 1,
    /// no frequency or presence penalty.
    pub fn deterministic(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: 0.0,
            max_tokens: 150,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: None,
        }
    }
}

/// Response body for the completions endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Generated choices, best first
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,

    /// Error discriminator; present when the call failed
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// One generated completion
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    /// The generated text
    pub text: String,
}
