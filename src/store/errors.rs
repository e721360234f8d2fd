//! # Store Errors
//!
//! Failures surfaced by storage backends. These are opaque server-side
//! errors to callers; no retry happens in this core.

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backend unreachable or connection lost
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure
    #[error("storage error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Storage failures always map to a server error
    pub fn status_code(&self) -> u16 {
        500
    }
}
