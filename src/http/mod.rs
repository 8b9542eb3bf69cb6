//! HTTP client module
//!
//! Provides the request executor: a GET client with static headers, a
//! timeout and a bounded retry policy.
//!
//! # Retries
//!
//! - **Rate limiting**: HTTP 429 waits for `Retry-After` (default 60s)
//! - **Transport**: timeouts and connection errors wait a fixed delay
//! - **Everything else**: non-200 statuses and undecodable bodies fail at once

mod client;
mod retry;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, STATIC_HEADERS};
pub use retry::{classify, Delay, RetryPolicy, Sleeper};
