//! Pagination module
//!
//! The players endpoint is paged by page number. Pages are requested until
//! the upstream returns an empty one.
//!
//! # Overview
//!
//! [`PageNumberPaginator`] computes the query parameters for each page and
//! decides when iteration is complete. [`collect_pages`] drives it against an
//! [`HttpClient`](crate::http::HttpClient), bounded by a page limit and an
//! optional cancellation token.

mod paginator;
mod types;

pub use paginator::{collect_pages, PageNumberPaginator};
pub use types::{NextPage, PaginationState};

#[cfg(test)]
mod tests;
