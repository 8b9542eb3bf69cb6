//! Retry policy
//!
//! One policy value drives every retry decision. A classifier maps a failed
//! attempt to the [`Delay`] strategy to use before the next attempt, or to
//! `None` when the failure must be surfaced immediately.

use crate::error::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Sleep function used between attempts
pub type Sleeper = Arc<dyn Fn(Duration) -> BoxFuture<'static, ()> + Send + Sync>;

/// How long to wait before the next attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    /// The policy's fixed transport delay
    Fixed,
    /// A server-provided `Retry-After`, or the policy default when absent
    RetryAfter(Option<Duration>),
}

/// Classifier used by the HTTP client
///
/// `RateLimited` waits for the server's `Retry-After`; timeouts and
/// connection errors wait the fixed delay; nothing else is retried.
pub fn classify(error: &Error) -> Option<Delay> {
    if !error.is_retryable() {
        return None;
    }
    match error {
        Error::RateLimited {
            retry_after_seconds,
            ..
        } => Some(Delay::RetryAfter(retry_after_seconds.map(Duration::from_secs))),
        _ => Some(Delay::Fixed),
    }
}

/// Bounded retry loop
#[derive(Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    fixed_delay: Duration,
    default_retry_after: Duration,
    sleeper: Sleeper,
}

impl RetryPolicy {
    /// Create a policy sleeping on the tokio timer
    pub fn new(max_retries: u32, fixed_delay: Duration, default_retry_after: Duration) -> Self {
        Self {
            max_retries,
            fixed_delay,
            default_retry_after,
            sleeper: Arc::new(|delay| tokio::time::sleep(delay).boxed()),
        }
    }

    /// Replace the sleep function
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Retries allowed after the first attempt
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Resolve a delay strategy into a concrete wait
    pub fn delay_for(&self, delay: Delay) -> Duration {
        match delay {
            Delay::Fixed => self.fixed_delay,
            Delay::RetryAfter(server) => server.unwrap_or(self.default_retry_after),
        }
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// retry budget is spent
    ///
    /// `op` receives the zero-based attempt number. The error of the last
    /// attempt is returned on exhaustion.
    pub async fn run<T, F, Fut, C>(&self, mut op: F, classifier: C) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
        C: Fn(&Error) -> Option<Delay>,
    {
        let mut attempt = 0;
        loop {
            let err = match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            let Some(delay) = classifier(&err) else {
                return Err(err);
            };
            if attempt >= self.max_retries {
                return Err(err);
            }

            let wait = self.delay_for(delay);
            warn!(
                "{err}; attempt {}/{}, retrying in {wait:?}",
                attempt + 1,
                self.max_retries + 1
            );
            (self.sleeper)(wait).await;
            attempt += 1;
        }
    }
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("fixed_delay", &self.fixed_delay)
            .field("default_retry_after", &self.default_retry_after)
            .finish_non_exhaustive()
    }
}
