//! Configuration loading for the Clipcast console.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `CLIPCAST_`, producing a typed [`AppConfig`].

use std::{collections::BTreeMap, env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Application configuration derived from `CLIPCAST_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    /// Base URL of the API the console talks to.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Whole-request timeout so a hung request cannot stall a poll loop.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default)]
    pub poller: PollerSettings,
}

/// Job poller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PollerSettings {
    /// Fixed poll cadence in milliseconds (default: 1500).
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,

    /// Consecutive transient fetch failures tolerated before the watch
    /// halts and surfaces a persistent error (default: 3).
    #[serde(default = "default_max_fetch_failures")]
    pub max_fetch_failures: u32,

    /// Base retry delay in milliseconds for the first backoff (default: 2000).
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Upper bound for backoff delays in milliseconds (default: 30000).
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,

    /// Random factor applied to backoff delays, range 0.0-1.0 (default: 0.1).
    #[serde(default = "default_backoff_jitter_factor")]
    pub jitter_factor: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            poller: PollerSettings::default(),
        }
    }
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            max_fetch_failures: default_max_fetch_failures(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_max_ms: default_backoff_max_ms(),
            jitter_factor: default_backoff_jitter_factor(),
        }
    }
}

impl AppConfig {
    /// Validate configuration bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.api_base_url).is_err() {
            return Err(ConfigError::InvalidApiBaseUrl {
                value: self.api_base_url.clone(),
            });
        }
        if self.request_timeout_ms < 1000 {
            return Err(ConfigError::InvalidRequestTimeout {
                value: self.request_timeout_ms,
            });
        }
        self.poller.validate()
    }
}

impl PollerSettings {
    /// Validate poller configuration bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms < 100 || self.interval_ms > 60_000 {
            return Err(ConfigError::InvalidPollInterval {
                value: self.interval_ms,
            });
        }
        if self.max_fetch_failures == 0 || self.max_fetch_failures > 10 {
            return Err(ConfigError::InvalidMaxFetchFailures {
                value: self.max_fetch_failures,
            });
        }
        if self.backoff_base_ms == 0 || self.backoff_base_ms > self.backoff_max_ms {
            return Err(ConfigError::InvalidBackoffBounds {
                base: self.backoff_base_ms,
                max: self.backoff_max_ms,
            });
        }
        if self.jitter_factor < 0.0 || self.jitter_factor > 1.0 {
            return Err(ConfigError::InvalidBackoffJitter {
                value: self.jitter_factor,
            });
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1_500
}

fn default_max_fetch_failures() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    2_000
}

fn default_backoff_max_ms() -> u64 {
    30_000
}

fn default_backoff_jitter_factor() -> f64 {
    0.1
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("invalid API base URL '{value}'; set CLIPCAST_API_BASE_URL to an absolute URL")]
    InvalidApiBaseUrl { value: String },
    #[error("request timeout must be at least 1000 ms, got {value}")]
    InvalidRequestTimeout { value: u64 },
    #[error("poll interval must be between 100 and 60000 ms, got {value}")]
    InvalidPollInterval { value: u64 },
    #[error("max fetch failures must be between 1 and 10, got {value}")]
    InvalidMaxFetchFailures { value: u32 },
    #[error("backoff base ({base} ms) must be positive and not exceed backoff max ({max} ms)")]
    InvalidBackoffBounds { base: u64, max: u64 },
    #[error("backoff jitter factor must be between 0.0 and 1.0, got {value}")]
    InvalidBackoffJitter { value: f64 },
}

/// Loads configuration using layered `.env` files and `CLIPCAST_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Load `.env`, then `.env.local`, then the process environment, later
    /// layers winning, and validate the result.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut layered = self.collect_layered_env()?;

        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix("CLIPCAST_") {
                layered.insert(stripped.to_string(), value);
            }
        }

        let api_base_url = layered
            .remove("API_BASE_URL")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(default_api_base_url);
        let request_timeout_ms = layered
            .remove("REQUEST_TIMEOUT_MS")
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(default_request_timeout_ms);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(default_log_level);
        let log_format = layered
            .remove("LOG_FORMAT")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(default_log_format);

        let poller = PollerSettings {
            interval_ms: layered
                .remove("POLL_INTERVAL_MS")
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(default_poll_interval_ms),
            max_fetch_failures: layered
                .remove("POLL_MAX_FETCH_FAILURES")
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(default_max_fetch_failures),
            backoff_base_ms: layered
                .remove("POLL_BACKOFF_BASE_MS")
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(default_backoff_base_ms),
            backoff_max_ms: layered
                .remove("POLL_BACKOFF_MAX_MS")
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(default_backoff_max_ms),
            jitter_factor: layered
                .remove("POLL_BACKOFF_JITTER_FACTOR")
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(default_backoff_jitter_factor),
        };

        let config = AppConfig {
            api_base_url,
            request_timeout_ms,
            log_level,
            log_format,
            poller,
        };

        config.validate()?;
        Ok(config)
    }

    fn collect_layered_env(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        let mut values = BTreeMap::new();
        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;
        Ok(values)
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix("CLIPCAST_") {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.poller.interval_ms, 1500);
        assert_eq!(config.poller.max_fetch_failures, 3);
    }

    #[test]
    fn env_file_layers_override_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "CLIPCAST_API_BASE_URL=http://base:8000\nCLIPCAST_POLL_INTERVAL_MS=500\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(".env.local"),
            "CLIPCAST_API_BASE_URL=http://local:8000\n",
        )
        .unwrap();

        let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
            .load()
            .unwrap();
        assert_eq!(config.api_base_url, "http://local:8000");
        assert_eq!(config.poller.interval_ms, 500);
    }

    #[test]
    fn unprefixed_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "API_BASE_URL=http://stray:8000\nCLIPCAST_LOG_LEVEL=debug\n",
        )
        .unwrap();

        let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
            .load()
            .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn validation_rejects_bad_bounds() {
        let mut config = AppConfig::default();
        config.poller.interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPollInterval { value: 0 })
        ));

        let mut config = AppConfig::default();
        config.poller.backoff_base_ms = 60_000;
        config.poller.backoff_max_ms = 30_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBackoffBounds { .. })
        ));

        let mut config = AppConfig::default();
        config.poller.jitter_factor = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBackoffJitter { .. })
        ));

        let mut config = AppConfig::default();
        config.api_base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidApiBaseUrl { .. })
        ));
    }
}
