//! # Query Errors
//!
//! Error types for criteria parsing and compilation.

use thiserror::Error;

/// Result type for criteria operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Which request blob failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaBlob {
    Search,
    Filters,
    Sort,
}

impl CriteriaBlob {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriteriaBlob::Search => "search",
            CriteriaBlob::Filters => "filters",
            CriteriaBlob::Sort => "sort",
        }
    }
}

impl std::fmt::Display for CriteriaBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criteria parsing and compilation errors
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Malformed JSON in one of the three criteria blobs
    #[error("Invalid JSON in {0} parameter")]
    InvalidCriteria(CriteriaBlob),

    /// Fixed week_start_date filter is not a calendar date
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate,
}

impl QueryError {
    /// All criteria errors are client errors
    pub fn status_code(&self) -> u16 {
        400
    }
}
