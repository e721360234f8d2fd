//! # Executor Errors

use thiserror::Error;

use crate::store::StoreError;

use super::page::MAX_LIMIT;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Listing execution errors
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// Page size outside 1..=MAX_LIMIT
    #[error("limit must be between 1 and {MAX_LIMIT}, got {0}")]
    InvalidLimit(usize),

    /// Storage failure, surfaced opaquely
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ExecutorError {
    pub fn status_code(&self) -> u16 {
        match self {
            ExecutorError::InvalidLimit(_) => 400,
            ExecutorError::Store(e) => e.status_code(),
        }
    }
}
