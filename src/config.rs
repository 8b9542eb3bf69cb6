//! Client configuration
//!
//! Configuration is an explicit value handed to each [`crate::EplClient`].
//! It is assembled from defaults, an optional YAML file and `EPLDA_*`
//! environment variables, in that order of precedence.

use crate::error::{Error, Result};
use crate::types::{LogLevel, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://footballapi.pulselive.com/football/";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "EPLDA_";

/// Keys understood by [`Config::set`], in `section.field` form
pub const KNOWN_KEYS: [&str; 14] = [
    "request.base_url",
    "request.timeout",
    "request.max_retries",
    "request.retry_delay",
    "request.rate_limit_delay",
    "request.page_size",
    "request.max_pages",
    "competition.id",
    "competition.comp_code",
    "competition.club_page_size",
    "competition.player_page_size",
    "data.default_output_format",
    "data.include_nationality",
    "logging.level",
];

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP request behaviour
    #[serde(default)]
    pub request: RequestSettings,

    /// Competition being queried
    #[serde(default)]
    pub competition: CompetitionSettings,

    /// Output shaping
    #[serde(default)]
    pub data: DataSettings,

    /// Logging defaults for the binary
    #[serde(default)]
    pub logging: LoggingSettings,
}

// ============================================================================
// Sections
// ============================================================================

/// HTTP request settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSettings {
    /// API root all paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay in seconds before retrying a timeout or connection error
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    /// Delay in seconds after a 429 without a usable `Retry-After` header
    #[serde(default = "default_rate_limit_delay")]
    pub rate_limit_delay: u64,

    /// Page size for the paginated player listing
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Upper bound on pages fetched by one paginated listing
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            rate_limit_delay: default_rate_limit_delay(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

impl RequestSettings {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Transport retry delay as a [`Duration`]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay)
    }

    /// Fallback rate limit delay as a [`Duration`]
    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_secs(self.rate_limit_delay)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1
}

fn default_rate_limit_delay() -> u64 {
    60
}

fn default_page_size() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    100
}

/// Competition settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSettings {
    /// Competition id (1 = Premier League)
    #[serde(default = "default_competition_id", alias = "premier_league_id")]
    pub id: u32,

    /// Competition code used to restrict rankings to active players
    #[serde(default = "default_comp_code")]
    pub comp_code: String,

    /// Page size for club rankings (one page holds the whole league)
    #[serde(default = "default_club_page_size")]
    pub club_page_size: u32,

    /// Page size for player rankings
    #[serde(default = "default_player_page_size")]
    pub player_page_size: u32,
}

impl Default for CompetitionSettings {
    fn default() -> Self {
        Self {
            id: default_competition_id(),
            comp_code: default_comp_code(),
            club_page_size: default_club_page_size(),
            player_page_size: default_player_page_size(),
        }
    }
}

fn default_competition_id() -> u32 {
    1
}

fn default_comp_code() -> String {
    "EN_PR".to_string()
}

fn default_club_page_size() -> u32 {
    20
}

fn default_player_page_size() -> u32 {
    50
}

/// Output shaping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Shape used when the caller does not pick one
    #[serde(default)]
    pub default_output_format: OutputFormat,

    /// Populate nationality on player records
    #[serde(default = "default_true")]
    pub include_nationality: bool,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            default_output_format: OutputFormat::default(),
            include_nationality: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level used when `RUST_LOG` is unset
    #[serde(default)]
    pub level: LogLevel,
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Load configuration: defaults, then `path` (if any), then the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(std::env::vars())?;
        Ok(config)
    }

    /// Load configuration from a YAML file, filling gaps with defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid YAML configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `EPLDA_<SECTION>_<FIELD>` overrides from the given variables
    ///
    /// Variables that do not map onto a known key are ignored.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(rest) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let wanted = rest.to_ascii_lowercase();
            if let Some(key) = KNOWN_KEYS
                .iter()
                .find(|key| key.replacen('.', "_", 1) == wanted)
            {
                self.set(key, &value)
                    .map_err(|e| Error::config(format!("{name}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Set a single value by dotted key, e.g. `request.timeout`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "request.base_url" => self.request.base_url = value.to_string(),
            "request.timeout" => self.request.timeout = parse_value(key, value)?,
            "request.max_retries" => self.request.max_retries = parse_value(key, value)?,
            "request.retry_delay" => self.request.retry_delay = parse_value(key, value)?,
            "request.rate_limit_delay" => {
                self.request.rate_limit_delay = parse_value(key, value)?;
            }
            "request.page_size" => self.request.page_size = parse_value(key, value)?,
            "request.max_pages" => self.request.max_pages = parse_value(key, value)?,
            "competition.id" => self.competition.id = parse_value(key, value)?,
            "competition.comp_code" => self.competition.comp_code = value.to_string(),
            "competition.club_page_size" => {
                self.competition.club_page_size = parse_value(key, value)?;
            }
            "competition.player_page_size" => {
                self.competition.player_page_size = parse_value(key, value)?;
            }
            "data.default_output_format" => {
                self.data.default_output_format = value.parse()?;
            }
            "data.include_nationality" => {
                self.data.include_nationality = parse_bool(key, value)?;
            }
            "logging.level" => self.logging.level = value.parse()?,
            _ => {
                return Err(Error::config(format!(
                    "Unknown config key '{key}'. Known keys: {}",
                    KNOWN_KEYS.join(", ")
                )))
            }
        }
        self.validate()
    }

    /// Reject values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.request.base_url.trim().is_empty() {
            return Err(Error::config("request.base_url cannot be empty"));
        }
        if self.request.timeout == 0 {
            return Err(Error::config("request.timeout must be at least 1 second"));
        }
        if self.request.page_size == 0 {
            return Err(Error::config("request.page_size must be positive"));
        }
        if self.request.max_pages == 0 {
            return Err(Error::config("request.max_pages must be positive"));
        }
        if self.competition.club_page_size == 0 || self.competition.player_page_size == 0 {
            return Err(Error::config("competition page sizes must be positive"));
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::config(format!("Invalid value '{value}' for '{key}'")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::config(format!(
            "Invalid boolean '{value}' for '{key}'"
        ))),
    }
}
