//! HTTP client implementation for the OpenAI API
//!
//! This module provides the HTTP layer for making JSON requests against the
//! OpenAI endpoints, with status-code triage into typed errors.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Base URL for API requests
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// HTTP client for making requests to the OpenAI API
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// API key for bearer authentication
    api_key: String,
}

#[cfg(test)]
impl HttpClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl HttpClient {
    /// Create a new HTTP client with an API key
    pub fn with_api_key(api_key: String) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("must create HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Send a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let request = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body);

        debug!("Sending POST request to {}", path);
        self.execute_request(request).await
    }

    /// Execute an HTTP request and handle the response
    async fn execute_request<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(Error::Http)?;

        let status = response.status();
        let response_text = response.text().await.map_err(Error::Http)?;

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                error!("Failed to parse response: {}", e);
                Error::UnexpectedResponse(format!("Failed to parse response: {}", e))
            })
        } else {
            error!("API error: {} - {}", status, response_text);

            if status == StatusCode::TOO_MANY_REQUESTS {
                Err(Error::RateLimit {
                    retry_after_secs: 60,
                })
            } else if status == StatusCode::UNAUTHORIZED {
                Err(Error::Auth("Invalid API key".to_string()))
            } else {
                Err(Error::Api {
                    status_code: status.as_u16(),
                    message: response_text,
                })
            }
        }
    }
}
