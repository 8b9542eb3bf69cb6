//! Pagination types
//!
//! State shared between a paginator and the loop driving it.

use crate::types::QueryParams;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: QueryParams,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with query parameters
    pub fn with_params(params: QueryParams) -> Self {
        Self::Continue {
            query_params: params,
        }
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Page number of the next request
    pub page: u32,
    /// Pages requested so far
    pub pages_fetched: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
}

impl PaginationState {
    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Record one fetched page of `count` records
    pub fn add_fetched(&mut self, count: u64) {
        self.pages_fetched += 1;
        self.total_fetched += count;
    }
}
