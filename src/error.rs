//! Error types for eplda
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Which transport failure produced a [`Error::NetworkFailure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The request did not complete within the configured timeout
    Timeout,
    /// The connection could not be established
    Connect,
    /// Any other transport problem (body read, redirect loop, ...)
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connect => write!(f, "connection error"),
            Self::Other => write!(f, "transport error"),
        }
    }
}

/// The main error type for eplda
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("No data: {message}")]
    NoData { message: String },

    // ============================================================================
    // Upstream / HTTP Errors
    // ============================================================================
    #[error("Rate limit exceeded after {attempts} attempt(s)")]
    RateLimited {
        attempts: u32,
        /// Parsed `Retry-After`, absent when the header was missing or unusable
        retry_after_seconds: Option<u64>,
    },

    #[error("Network failure ({kind}) after {attempts} attempt(s): {message}")]
    NetworkFailure {
        kind: TransportKind,
        attempts: u32,
        message: String,
    },

    #[error("Upstream error: HTTP {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Invalid JSON response: {message}")]
    MalformedResponse { message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Pipeline Errors
    // ============================================================================
    #[error("Player comparison failed: {}", failures.join("; "))]
    Comparison { failures: Vec<String> },

    #[error("Pagination stopped after {max_pages} pages without an empty page")]
    PageLimitExceeded { max_pages: u32 },

    #[error("Operation cancelled")]
    Cancelled,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a no data error
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData {
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an upstream status error
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamError {
            status,
            body: body.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Only rate limiting, timeouts and connection failures are retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimited { .. } => true,
            Error::NetworkFailure { kind, .. } => {
                matches!(kind, TransportKind::Timeout | TransportKind::Connect)
            }
            _ => false,
        }
    }
}

/// Result type alias for eplda
pub type Result<T> = std::result::Result<T, Error>;
