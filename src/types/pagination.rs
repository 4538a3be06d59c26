//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_LIST_LIMIT;

/// Window into a listing (offset/limit model).
///
/// Both fields are optional: `None` offset starts at the beginning and `None`
/// limit fetches everything the backend allows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    /// Window starting at `offset` with at most `limit` items.
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// The whole collection, no window.
    pub fn all() -> Self {
        Self::default()
    }

    /// The first `limit` items.
    pub fn first(limit: u64) -> Self {
        Self {
            offset: None,
            limit: Some(limit),
        }
    }

    /// Limit capped at [`MAX_LIST_LIMIT`]; `None` stays unbounded.
    pub fn capped_limit(&self) -> Option<u64> {
        self.limit.map(|limit| limit.min(MAX_LIST_LIMIT))
    }
}

/// Listing response wrapper (reusable for all list results)
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Wrap a page of data with the window it was fetched for.
    pub fn new(data: Vec<T>, page: &Pagination, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                offset: page.offset.unwrap_or(0),
                limit: page.capped_limit(),
                total,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_limit_respects_max() {
        assert_eq!(Pagination::first(10).capped_limit(), Some(10));
        assert_eq!(
            Pagination::first(MAX_LIST_LIMIT + 1).capped_limit(),
            Some(MAX_LIST_LIMIT)
        );
        assert_eq!(Pagination::all().capped_limit(), None);
    }

    #[test]
    fn paginated_records_window_and_total() {
        let page = Pagination::new(20, 10);
        let wrapped = Paginated::new(vec![1, 2, 3], &page, 53);

        assert_eq!(wrapped.data.len(), 3);
        assert_eq!(wrapped.meta.offset, 20);
        assert_eq!(wrapped.meta.limit, Some(10));
        assert_eq!(wrapped.meta.total, 53);
    }
}
