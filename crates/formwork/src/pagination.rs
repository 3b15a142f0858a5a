//! Paging parameter validation

use crate::error::{RepositoryError, Result};

/// Validated limit/offset pair for one listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub limit: i64,
    pub offset: i64,
}

/// Check limit and offset against the configured maximum page size.
///
/// This is the pre-query validation; the offset-vs-total check can only run
/// once the listing query has produced a count.
pub fn check_paging(limit: i64, offset: i64, max_page_size: i64) -> Result<()> {
    if offset < 0 {
        return Err(RepositoryError::InvalidOffset(offset));
    }
    if limit <= 0 {
        return Err(RepositoryError::InvalidLimit(limit));
    }
    if limit > max_page_size {
        return Err(RepositoryError::LimitExceedsMaximum {
            limit,
            max: max_page_size,
        });
    }
    Ok(())
}

/// Reject offsets pointing past the end of the result set.
///
/// Offset zero is always acceptable, even on an empty collection.
pub fn check_offset_against_total(offset: i64, total: u64) -> Result<()> {
    if offset != 0 && offset > total as i64 - 1 {
        return Err(RepositoryError::OffsetBeyondTotal { offset, total });
    }
    Ok(())
}
