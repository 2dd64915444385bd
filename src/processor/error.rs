//! Error types for the processor module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for text processing operations
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failure reading page text or writing tables
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<ProcessError> for CrateError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Io(e) => CrateError::Io(e),
            ProcessError::Csv(e) => CrateError::Csv(e),
            ProcessError::Other(msg) => CrateError::Process(msg),
        }
    }
}
