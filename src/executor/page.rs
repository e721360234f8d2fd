//! Pagination parameters

use super::errors::{ExecutorError, ExecutorResult};

/// Maximum page size
pub const MAX_LIMIT: usize = 1000;

/// Page size when the caller does not specify one
pub const DEFAULT_LIMIT: usize = 10;

/// Pagination of a listing request
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    /// Rows per page, 1..=MAX_LIMIT
    pub limit: usize,

    /// Rows to skip
    pub offset: usize,

    /// Bypass pagination entirely and return the full filtered set.
    /// Deliberately unbounded; callers are trusted or rate-limited upstream.
    pub all_records: bool,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            all_records: false,
        }
    }
}

impl PageParams {
    /// Reject out-of-range page sizes. The limit is still validated when
    /// `all_records` is set, matching the request surface.
    pub fn validate(&self) -> ExecutorResult<()> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ExecutorError::InvalidLimit(self.limit));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageParams::default();
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 0);
        assert!(!page.all_records);
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        let zero = PageParams {
            limit: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ExecutorError::InvalidLimit(0))));

        let too_big = PageParams {
            limit: MAX_LIMIT + 1,
            ..Default::default()
        };
        assert!(too_big.validate().is_err());

        let max = PageParams {
            limit: MAX_LIMIT,
            ..Default::default()
        };
        assert!(max.validate().is_ok());
    }
}
