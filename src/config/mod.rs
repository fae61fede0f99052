//! Configuration management for headlines.
//!
//! Configuration is read from `~/.config/headlines/config.toml` at startup
//! (or the path given with `--config`). If the file doesn't exist, a default
//! configuration with comments is created.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::parser::DEFAULT_MAX_ITEMS;

/// The working set fetched from the feed must be at least this many times
/// the largest accepted limit, so sparse matches are still found.
pub const FETCH_HEADROOM: usize = 5;

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// RSS 2.0 feed to read headlines from
    pub feed_url: String,

    /// Label stored as the `source` of every headline
    pub source_label: String,

    /// Fetch timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// Number of feed items retained per fetch (default: 100)
    pub fetch_size: usize,

    /// Largest limit a query may ask for (default: 20)
    pub max_limit: usize,

    /// Limit used when none is given (default: 5)
    pub default_limit: usize,

    /// User agent sent with feed requests
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: "https://www.tagesschau.de/xml/rss2/".to_string(),
            source_label: "tagesschau.de".to_string(),
            timeout_secs: 10,
            fetch_size: DEFAULT_MAX_ITEMS,
            max_limit: 20,
            default_limit: 5,
            user_agent: concat!("headlines/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating a commented default file if
    /// it doesn't exist. Missing fields use default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/headlines/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("headlines").join("config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check field ranges and the fetch-size/limit relationship.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.feed_url)
            .map_err(|e| ConfigError::Invalid(format!("feed_url {:?}: {}", self.feed_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "feed_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }

        if self.max_limit == 0 {
            return Err(ConfigError::Invalid("max_limit must be positive".into()));
        }

        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "default_limit must be between 1 and max_limit ({}), got {}",
                self.max_limit, self.default_limit
            )));
        }

        let required = self.max_limit.saturating_mul(FETCH_HEADROOM);
        if self.fetch_size < required {
            return Err(ConfigError::Invalid(format!(
                "fetch_size ({}) must be at least {} x max_limit ({}) = {}",
                self.fetch_size, FETCH_HEADROOM, self.max_limit, required
            )));
        }

        Ok(())
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        let defaults = Self::default();
        format!(
            r##"# headlines configuration

# RSS 2.0 feed to read and the label recorded as each headline's source
feed_url = "{feed_url}"
source_label = "{source_label}"

# Seconds before a feed request is abandoned
timeout_secs = {timeout_secs}

# Items kept from each fetch. Filters run over all of them, so this must be
# at least {headroom} x max_limit.
fetch_size = {fetch_size}

# Query limits
max_limit = {max_limit}
default_limit = {default_limit}

user_agent = "{user_agent}"
"##,
            feed_url = defaults.feed_url,
            source_label = defaults.source_label,
            timeout_secs = defaults.timeout_secs,
            headroom = FETCH_HEADROOM,
            fetch_size = defaults.fetch_size,
            max_limit = defaults.max_limit,
            default_limit = defaults.default_limit,
            user_agent = defaults.user_agent,
        )
    }
}
