//! Embedding pipeline module
//!
//! Drives the embedding of processed chunks through the remote service
//! under dual rate limiting. The run is all-or-nothing: any failed chunk
//! aborts the whole run so a partially embedded corpus is never stored.

mod limiter;

pub use limiter::{DualRateLimiter, LimiterError};

use thiserror::Error;
use tracing::debug;

use crate::corpus::{Chunk, Corpus, EmbeddingRecord};
use crate::error::Error as CrateError;
use crate::openai::Client;

/// Error type for the embedding pipeline
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Rate limit acquisition failed
    #[error("rate limit error: {0}")]
    Limiter(#[from] LimiterError),

    /// The embedding service returned an error
    #[error("embedding service error: {0}")]
    Service(#[from] CrateError),

    /// A vector came back with a different dimensionality than the rest
    #[error("embedding dimension changed from {expected} to {actual} mid-run")]
    DimensionMismatch {
        /// Dimensionality of the first vector in the run
        expected: usize,

        /// Dimensionality of the offending vector
        actual: usize,
    },
}

impl From<EmbedError> for CrateError {
    fn from(err: EmbedError) -> Self {
        match err {
            EmbedError::Service(e) => e,
            _ => CrateError::Embed(err.to_string()),
        }
    }
}

/// Embed every chunk, in order, under the given rate limiter.
///
/// `progress` is called with the number of chunks completed after each
/// embedding. The returned corpus preserves chunk order so stored record
/// ids line up with the processing stage.
pub async fn embed_chunks(
    client: &Client,
    chunks: &[Chunk],
    limiter: &DualRateLimiter,
    mut progress: impl FnMut(usize),
) -> Result<Corpus, EmbedError> {
    let mut records = Vec::with_capacity(chunks.len());
    let mut ndims: Option<usize> = None;

    for (i, chunk) in chunks.iter().enumerate() {
        limiter.acquire(chunk.n_tokens as u32).await?;

        let embedding = client.embed(&chunk.text).await?;
        debug!(
            "Embedded chunk {}/{} ({} tokens)",
            i + 1,
            chunks.len(),
            chunk.n_tokens
        );

        match ndims {
            None => ndims = Some(embedding.len()),
            Some(expected) if expected != embedding.len() => {
                return Err(EmbedError::DimensionMismatch {
                    expected,
                    actual: embedding.len(),
                });
            }
            Some(_) => {}
        }

        records.push(EmbeddingRecord {
            text: chunk.text.clone(),
            n_tokens: chunk.n_tokens,
            embedding,
        });
        progress(i + 1);
    }

    Ok(Corpus { records })
}
