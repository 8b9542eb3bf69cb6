//! Page number pagination
//!
//! Uses `page` and `pageSize` query parameters, starting at page 0. An empty
//! page ends iteration.

use super::types::{NextPage, PaginationState};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::{JsonValue, QueryParams};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// Query parameter name for page size
    pub page_size_param: String,
    /// Page size value
    pub page_size: u32,
    /// Maximum number of requests before giving up
    pub max_pages: u32,
}

impl PageNumberPaginator {
    /// Create a paginator using `page`/`pageSize` from page 0
    pub fn new(page_size: u32, max_pages: u32) -> Self {
        Self {
            page_param: "page".to_string(),
            page_size_param: "pageSize".to_string(),
            page_size,
            max_pages,
        }
    }

    /// Query parameters for the page `state` points at
    pub fn params(&self, state: &PaginationState) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert(self.page_param.clone(), state.page.to_string());
        params.insert(self.page_size_param.clone(), self.page_size.to_string());
        params
    }

    /// Record a page of `records_count` items and compute the next request
    pub fn process_page(&self, records_count: usize, state: &mut PaginationState) -> NextPage {
        state.add_fetched(records_count as u64);

        if records_count == 0 {
            return NextPage::Done;
        }

        state.next_page();
        NextPage::with_params(self.params(state))
    }

    /// Fail once the page budget is spent
    pub fn check_limit(&self, state: &PaginationState) -> Result<()> {
        if state.pages_fetched >= self.max_pages {
            return Err(Error::PageLimitExceeded {
                max_pages: self.max_pages,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Page Loop
// ============================================================================

/// Fetch every page of `path`, returning the items `extract` pulls from each
///
/// `extract` must return every item of the page, filtered or not, since an
/// empty result is what ends the loop. Fails with
/// [`Error::PageLimitExceeded`] if `max_pages` requests go by without an
/// empty page, and with [`Error::Cancelled`] once `cancel` fires.
pub async fn collect_pages<T, F>(
    http: &HttpClient,
    path: &str,
    base_query: &QueryParams,
    paginator: &PageNumberPaginator,
    cancel: Option<&CancellationToken>,
    mut extract: F,
) -> Result<Vec<T>>
where
    F: FnMut(&JsonValue) -> Result<Vec<T>>,
{
    let mut state = PaginationState::default();
    let mut page_params = paginator.params(&state);
    let mut items = Vec::new();

    loop {
        paginator.check_limit(&state)?;

        let mut query = base_query.clone();
        query.extend(page_params);

        let request = http.execute(path, &query);
        let body = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => return Err(Error::Cancelled),
                    body = request => body?,
                }
            }
            None => request.await?,
        };

        let page = extract(&body)?;
        let count = page.len();
        items.extend(page);
        debug!("Page {}: fetched {count} records", state.page);

        match paginator.process_page(count, &mut state) {
            NextPage::Continue { query_params } => page_params = query_params,
            NextPage::Done => break,
        }
    }

    info!(
        "Fetched {} records over {} pages from {path}",
        state.total_fetched, state.pages_fetched
    );
    Ok(items)
}
