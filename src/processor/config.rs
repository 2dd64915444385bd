//! # Processor Configuration Module
//!
//! Configuration for turning raw page text into token-bounded chunks.

/// Default ceiling on tokens per chunk
pub const DEFAULT_MAX_CHUNK_TOKENS: usize = 500;

/// Configuration for the processor
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Maximum tokens allowed in one chunk
    pub max_chunk_tokens: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: DEFAULT_MAX_CHUNK_TOKENS,
        }
    }
}

/// Builder for ProcessorConfig
#[derive(Debug, Default)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
        }
    }

    /// Set the maximum tokens allowed in one chunk
    pub fn max_chunk_tokens(mut self, max_chunk_tokens: usize) -> Self {
        self.config.max_chunk_tokens = max_chunk_tokens;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ProcessorConfig {
        self.config
    }
}

impl ProcessorConfig {
    /// Create a new builder
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::new()
    }
}
