//! # Crawler Configuration Module
//!
//! Configuration options for the web crawler, using a builder pattern for
//! flexible construction.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: the main configuration struct
//! - `CrawlerConfigBuilder`: builder pattern implementation

use std::time::Duration;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// User agent to use for requests
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Optional cap on the number of pages fetched
    pub max_pages: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("siteqa-crawler/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
            max_pages: None,
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout in seconds
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Cap the number of pages fetched
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = Some(max_pages);
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
