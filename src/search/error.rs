//! Error types for the search module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for retrieval and answering operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// The embedding or completion service failed
    #[error("service error: {0}")]
    Service(#[from] CrateError),

    /// The question embedding does not match the corpus dimensionality
    #[error("question embedding has {actual} dimensions, corpus has {expected}")]
    DimensionMismatch {
        /// Dimensionality of the corpus vectors
        expected: usize,

        /// Dimensionality of the question vector
        actual: usize,
    },
}

impl From<SearchError> for CrateError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Service(e) => e,
            _ => CrateError::Search(err.to_string()),
        }
    }
}
