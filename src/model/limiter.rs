//! Dual rate limiting for the embedding endpoint.
//!
//! The service enforces two independent per-minute limits, one on request
//! count and one on token throughput. A caller must hold a permit from both
//! before sending a request, so acquisition is conjunctive: waiting on one
//! limiter does not release the other.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use thiserror::Error;
use tracing::trace;

/// Ceiling on how long one acquisition may wait before the run is aborted
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(120);

/// Error type for rate limit acquisition
#[derive(Debug, Error)]
pub enum LimiterError {
    /// The request can never be admitted because its token cost exceeds
    /// the per-minute token budget
    #[error("request of {cost} tokens exceeds the per-minute budget of {capacity}")]
    InsufficientCapacity {
        /// Token cost of the rejected request
        cost: u32,

        /// Configured tokens-per-minute budget
        capacity: u32,
    },

    /// Acquisition did not complete within the configured timeout
    #[error("rate limit acquisition timed out after {0:?}")]
    AcquireTimeout(Duration),
}

/// Enforces a requests-per-minute and a tokens-per-minute limit together.
pub struct DualRateLimiter {
    requests: DefaultDirectRateLimiter,
    tokens: DefaultDirectRateLimiter,
    token_capacity: u32,
    acquire_timeout: Duration,
}

impl DualRateLimiter {
    /// Create a limiter with the given per-minute budgets.
    pub fn new(requests_per_minute: NonZeroU32, tokens_per_minute: NonZeroU32) -> Self {
        Self {
            requests: RateLimiter::direct(Quota::per_minute(requests_per_minute)),
            tokens: RateLimiter::direct(Quota::per_minute(tokens_per_minute)),
            token_capacity: tokens_per_minute.get(),
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Override the acquisition timeout.
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Wait until one request of `cost` tokens may be sent.
    ///
    /// Fails fast when `cost` exceeds the token budget outright; no amount
    /// of waiting would admit such a request. Zero-cost requests still
    /// consume one token so the request limiter stays the binding one.
    pub async fn acquire(&self, cost: u32) -> Result<(), LimiterError> {
        if cost > self.token_capacity {
            return Err(LimiterError::InsufficientCapacity {
                cost,
                capacity: self.token_capacity,
            });
        }

        let cost = NonZeroU32::new(cost.max(1)).expect("cost is at least one");
        let wait = async {
            self.requests.until_ready().await;
            self.tokens.until_n_ready(cost).await
        };

        match tokio::time::timeout(self.acquire_timeout, wait).await {
            Ok(Ok(())) => {
                trace!("Acquired rate limit permit for {cost} tokens");
                Ok(())
            }
            Ok(Err(_)) => Err(LimiterError::InsufficientCapacity {
                cost: cost.get(),
                capacity: self.token_capacity,
            }),
            Err(_) => Err(LimiterError::AcquireTimeout(self.acquire_timeout)),
        }
    }
}
