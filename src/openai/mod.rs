//! # OpenAI API Client Module
//!
//! This module provides the client used for the two remote services the
//! pipeline consumes: an embedding endpoint (text to fixed-length vector)
//! and a text-completion endpoint (prompt to generated text).
//!
//! ## Key Components
//!
//! - `Client`: the main entry point wrapping the HTTP layer
//! - `CompletionRequest`: sampling parameters for a completion call
//!
//! Both endpoints are treated as potentially failing remote calls: a non-2xx
//! status or an error body in the response surfaces as a typed [`Error`].

mod http;
mod types;

pub use types::{
    ApiErrorBody, CompletionChoice, CompletionRequest, CompletionResponse, EmbeddingData,
    EmbeddingRequest, EmbeddingResponse,
};

use http::HttpClient;
use tracing::trace;

use crate::error::{Error, Result};

/// Embedding model used for chunks and questions alike.
pub const EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Default completion model for answer generation.
pub const COMPLETION_MODEL: &str = "text-davinci-003";

/// Client for the OpenAI API
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a new client with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            http: HttpClient::with_api_key(api_key.into()),
        }
    }

    /// Create a new client from the `OPENAI_API_KEY` environment variable
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .expect("OPENAI_API_KEY environment variable must be set");
        Self::with_api_key(api_key)
    }

    /// Embed a single text and return the raw vector.
    pub async fn embed(&self, text: &str) -> Result<Vec<f64>> {
        let request = EmbeddingRequest {
            model: EMBEDDING_MODEL.to_string(),
            input: text.to_string(),
        };

        let response: EmbeddingResponse = self.http.post("embeddings", &request).await?;
        if let Some(error) = response.error {
            return Err(Error::Api {
                status_code: 200,
                message: error.message,
            });
        }

        let data = response.data.into_iter().next().ok_or_else(|| {
            Error::UnexpectedResponse("embedding response carried no data".to_string())
        })?;

        trace!("Received embedding with {} dimensions", data.embedding.len());
        Ok(data.embedding)
    }

    /// Run a completion and return the first choice's text.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let response: CompletionResponse = self.http.post("completions", request).await?;
        if let Some(error) = response.error {
            return Err(Error::Api {
                status_code: 200,
                message: error.message,
            });
        }

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            Error::UnexpectedResponse("completion response carried no choices".to_string())
        })?;

        Ok(choice.text)
    }
}

#[cfg(test)]
impl Client {
    /// Create a client pointed at a local test server
    pub fn with_base_url(api_key: impl Into<String>, base_url: String) -> Self {
        let mut http = HttpClient::with_api_key(api_key.into());
        http.set_base_url(base_url);
        Self { http }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_embed_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"embedding": [0.1, 0.2, 0.3], "index": 0}]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = Client::with_base_url("test-key", server.url());
        let embedding = client.embed("hello").await.unwrap();
        assert_eq!(embedding, vec![0.1, 0.2, 0.3]);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_embed_error_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "model overloaded"}}"#)
            .create_async()
            .await;

        let client = Client::with_base_url("test-key", server.url());
        let result = client.embed("hello").await;
        assert!(matches!(result, Err(Error::Api { .. })));
    }

    #[tokio::test]
    async fn test_embed_http_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/embeddings")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = Client::with_base_url("test-key", server.url());
        let result = client.embed("hello").await;
        assert!(matches!(result, Err(Error::Api { status_code: 500, .. })));
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"text": " The answer. "}, {"text": "ignored"}]}"#)
            .create_async()
            .await;

        let client = Client::with_base_url("test-key", server.url());
        let request = CompletionRequest::deterministic(COMPLETION_MODEL, "prompt");
        let text = client.complete(&request).await.unwrap();
        assert_eq!(text, " The answer. ");
    }

    #[tokio::test]
    async fn test_complete_empty_choices() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = Client::with_base_url("test-key", server.url());
        let request = CompletionRequest::deterministic(COMPLETION_MODEL, "prompt");
        let result = client.complete(&request).await;
        assert!(matches!(result, Err(Error::UnexpectedResponse(_))));
    }
}
