//! Pagination directives.

use crate::error::{CriteriaError, Result};

/// Page-based or limit/offset pagination.
///
/// Both forms resolve to a `LIMIT`/`OFFSET` pair:
///
/// ```
/// use criteria::Pagination;
///
/// let page = Pagination::page(3, 20).unwrap();
/// assert_eq!(page.limit(), 20);
/// assert_eq!(page.offset(), 40);
///
/// assert!(Pagination::page(0, 20).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pagination {
    /// One-based page number and page size.
    Page { page: usize, size: usize },
    /// Maximum number of rows and rows to skip.
    Limit { limit: usize, offset: usize },
}

impl Pagination {
    /// Page-based pagination. Both `page` and `size` must be positive.
    pub fn page(page: usize, size: usize) -> Result<Self> {
        if page == 0 {
            return Err(CriteriaError::validation("page", "page must be positive"));
        }
        if size == 0 {
            return Err(CriteriaError::validation("size", "page size must be positive"));
        }
        Ok(Pagination::Page { page, size })
    }

    /// Limit/offset pagination. `limit` must be positive.
    pub fn limit_offset(limit: usize, offset: usize) -> Result<Self> {
        if limit == 0 {
            return Err(CriteriaError::validation("limit", "limit must be positive"));
        }
        Ok(Pagination::Limit { limit, offset })
    }

    /// Re-checks a directive that may have been built from its fields.
    pub fn validate(self) -> Result<Self> {
        match self {
            Pagination::Page { page, size } => Pagination::page(page, size),
            Pagination::Limit { limit, offset } => Pagination::limit_offset(limit, offset),
        }
    }

    /// Maximum number of rows.
    pub fn limit(&self) -> usize {
        match *self {
            Pagination::Page { size, .. } => size,
            Pagination::Limit { limit, .. } => limit,
        }
    }

    /// Number of rows skipped.
    pub fn offset(&self) -> usize {
        match *self {
            Pagination::Page { page, size } => page.saturating_sub(1).saturating_mul(size),
            Pagination::Limit { offset, .. } => offset,
        }
    }

    /// Applies offset then limit to an already ordered sequence.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect()
    }
}
