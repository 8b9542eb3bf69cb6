//! HTTP client with bounded retries
//!
//! Every call is a GET against `base_url + path` with the static headers the
//! API expects. Transient failures go through a [`RetryPolicy`]; everything
//! else is surfaced as-is.

use super::retry::{classify, RetryPolicy, Sleeper};
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{Error, Result, TransportKind};
use crate::types::{JsonValue, QueryParams};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Headers sent with every request
pub const STATIC_HEADERS: [(&str, &str); 3] = [
    (
        "content-type",
        "application/x-www-form-urlencoded; charset=UTF-8",
    ),
    ("origin", "https://www.premierleague.com"),
    ("referer", "https://www.premierleague.com"),
];

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before retrying a timeout or connection error
    pub retry_delay: Duration,
    /// Delay after a 429 without a usable `Retry-After`
    pub rate_limit_delay: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            rate_limit_delay: Duration::from_secs(60),
        }
    }
}

impl From<&Config> for HttpClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.request.base_url.clone(),
            timeout: config.request.timeout(),
            max_retries: config.request.max_retries,
            retry_delay: config.request.retry_delay(),
            rate_limit_delay: config.request.rate_limit_delay(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the transport retry delay
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the fallback delay used after a 429
    pub fn rate_limit_delay(mut self, delay: Duration) -> Self {
        self.config.rate_limit_delay = delay;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with retry
pub struct HttpClient {
    client: Client,
    base_url: Url,
    config: HttpClientConfig,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in STATIC_HEADERS {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(format!("eplda/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = parse_base_url(&config.base_url)?;
        let retry = RetryPolicy::new(
            config.max_retries,
            config.retry_delay,
            config.rate_limit_delay,
        );

        Ok(Self {
            client,
            base_url,
            config,
            retry,
        })
    }

    /// Replace the sleep used between retries
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Sleeper) -> Self {
        self.retry = self.retry.with_sleeper(sleeper);
        self
    }

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Issue a GET for `path` and decode the JSON body
    pub async fn execute(&self, path: &str, query: &QueryParams) -> Result<JsonValue> {
        let url = self.build_url(path)?;
        debug!("GET {url} {query:?}");
        self.retry
            .run(|attempt| self.send_once(url.clone(), query, attempt + 1), classify)
            .await
    }

    /// One attempt, with failures classified for the retry policy
    async fn send_once(&self, url: Url, query: &QueryParams, attempts: u32) -> Result<JsonValue> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(&e, attempts))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                attempts,
                retry_after_seconds: extract_retry_after(&response).map(|d| d.as_secs()),
            });
        }

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(status.as_u16(), body));
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(&e, attempts))?;
        serde_json::from_str(&text).map_err(|e| Error::malformed(e.to_string()))
    }

    /// Join a relative path onto the base URL
    fn build_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Parse the base URL, forcing a trailing slash so joins keep its path
fn parse_base_url(base: &str) -> Result<Url> {
    let base = base.trim();
    if base.ends_with('/') {
        Ok(Url::parse(base)?)
    } else {
        Ok(Url::parse(&format!("{base}/"))?)
    }
}

/// Map a reqwest failure onto [`Error::NetworkFailure`]
fn transport_error(err: &reqwest::Error, attempts: u32) -> Error {
    let kind = if err.is_timeout() {
        TransportKind::Timeout
    } else if err.is_connect() {
        TransportKind::Connect
    } else {
        TransportKind::Other
    };
    Error::NetworkFailure {
        kind,
        attempts,
        message: err.to_string(),
    }
}

/// Extract the `Retry-After` header as whole seconds
fn extract_retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
