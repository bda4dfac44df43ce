//! Configuration handling for the binaries.
//!
//! Everything is read from environment variables with development defaults,
//! so a bare `scrape <url>` works against a local `reviews.db`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::fetcher::FetchSettings;
use crate::fetcher::client::{DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::telemetry::LogFormat;

/// Environment variable names. Public so tests and scripts can refer to them.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_MAX_BODY_BYTES: &str = "FETCH_MAX_BODY_BYTES";
pub const ENV_FETCH_USER_AGENT: &str = "FETCH_USER_AGENT";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_DATABASE_URL: &str = "sqlite://reviews.db?mode=rwc";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    database_url: String,
    fetch_timeout: Duration,
    fetch_max_body_bytes: u64,
    fetch_user_agent: String,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var(ENV_DATABASE_URL).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let fetch_timeout_secs: u64 =
            parse_var(ENV_FETCH_TIMEOUT_SECS)?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_FETCH_TIMEOUT_SECS,
                reason: "must be at least 1".to_string(),
            });
        }
        let fetch_max_body_bytes =
            parse_var(ENV_FETCH_MAX_BODY_BYTES)?.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        let fetch_user_agent =
            env::var(ENV_FETCH_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let log_format = parse_var(ENV_LOG_FORMAT)?.unwrap_or_default();

        Ok(Self {
            database_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            fetch_max_body_bytes,
            fetch_user_agent,
            log_format,
        })
    }

    /// SQLite connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: self.fetch_timeout,
            max_body_bytes: self.fetch_max_body_bytes,
            user_agent: self.fetch_user_agent.clone(),
        }
    }
}

impl Default for Config {
    /// Development defaults (mirrors `from_env` with no env overrides).
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            fetch_timeout: fetch.timeout,
            fetch_max_body_bytes: fetch.max_body_bytes,
            fetch_user_agent: fetch.user_agent,
            log_format: LogFormat::default(),
        }
    }
}

fn parse_var<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field: key,
                reason: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
