//! Reader configuration.
//!
//! Loaded from a TOML file; every field has a default, so an empty or
//! missing file yields [`Config::default`].

use crate::api::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Environment variable overriding [`Config::api_base_url`].
pub const API_URL_ENV: &str = "MUSHAF_API_URL";

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from this file.
    File(PathBuf),
    /// This file was requested but does not exist; defaults apply.
    MissingFile(PathBuf),
    /// No file was requested.
    Defaults,
}

impl ConfigOrigin {
    /// Record the origin. Call once the log subscriber is installed.
    pub fn log(&self) {
        match self {
            Self::File(path) => tracing::info!(path = %path.display(), "config loaded"),
            Self::MissingFile(path) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults")
            }
            Self::Defaults => tracing::debug!("no config file given, using defaults"),
        }
    }
}

/// Errors raised while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config from {}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Config`].
    #[error("failed to parse config from {}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content API base URL.
    pub api_base_url: String,

    /// Per-request timeout in seconds. Unset means requests may hang forever.
    pub request_timeout_secs: Option<u64>,

    /// Keep successful responses in memory for the session.
    pub cache_responses: bool,

    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout_secs: None,
            cache_responses: true,
            log_level: Self::DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl Config {
    const DEFAULT_LOG_LEVEL: &str = "warn";

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load(Some(path)).map(|(config, _)| config)
    }

    /// Loads configuration from `path` if one is given, reporting where the
    /// values came from. Nothing is logged here; see [`ConfigOrigin::log`].
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigOrigin), ConfigError> {
        let Some(path) = path else {
            return Ok((Config::default(), ConfigOrigin::Defaults));
        };
        if !path.exists() {
            return Ok((Config::default(), ConfigOrigin::MissingFile(path.to_owned())));
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        Ok((config, ConfigOrigin::File(path.to_owned())))
    }

    /// Parse a TOML document.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply [`API_URL_ENV`] if it is set and not empty.
    pub fn with_env(mut self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.api_base_url = url,
            _ => {}
        }
        self
    }

    /// The request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
