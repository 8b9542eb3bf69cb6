//! Common types used throughout eplda
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Query parameters for a single request, kept sorted for stable logging
pub type QueryParams = BTreeMap<String, String>;

/// Statistic name to value mapping, ordered by statistic name
pub type StatMap = BTreeMap<String, f64>;

// ============================================================================
// Output Format
// ============================================================================

/// Shape of the data returned by listing methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Plain sequence of typed records
    #[default]
    #[serde(alias = "json")]
    Records,
    /// Columnar Arrow table
    #[serde(alias = "df")]
    Table,
}

impl OutputFormat {
    /// Names accepted by [`OutputFormat::from_str`]
    pub const ACCEPTED: [&'static str; 4] = ["records", "json", "table", "df"];
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "records" | "json" => Ok(Self::Records),
            "table" | "df" => Ok(Self::Table),
            other => Err(Error::invalid_argument(format!(
                "Invalid output format '{other}'. Expected one of: {}",
                Self::ACCEPTED.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Records => write!(f, "records"),
            Self::Table => write!(f, "table"),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level used when `RUST_LOG` is not set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[serde(alias = "TRACE")]
    Trace,
    #[serde(alias = "DEBUG")]
    Debug,
    #[default]
    #[serde(alias = "INFO")]
    Info,
    #[serde(alias = "WARN", alias = "WARNING", alias = "warning")]
    Warn,
    #[serde(alias = "ERROR")]
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(Error::config(format!("Unknown log level '{other}'"))),
        }
    }
}
