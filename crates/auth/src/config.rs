//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CROWDCOUNT_DATA_DIR` - Directory holding the persisted blobs (default: `.crowdcount`)
//! - `CROWDCOUNT_SEED_SAMPLE_ACCOUNT` - Create the `admin` sample account on first run (default: true)
//! - `CROWDCOUNT_SIMULATED_LATENCY_MS` - Delay applied by front ends before each request (default: 0)
//! - `CROWDCOUNT_LOG_FORMAT` - `text` or `json` (default: text)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DATA_DIR_VAR: &str = "CROWDCOUNT_DATA_DIR";
const SEED_VAR: &str = "CROWDCOUNT_SEED_SAMPLE_ACCOUNT";
const LATENCY_VAR: &str = "CROWDCOUNT_SIMULATED_LATENCY_MS";
const LOG_FORMAT_VAR: &str = "CROWDCOUNT_LOG_FORMAT";

const DEFAULT_DATA_DIR: &str = ".crowdcount";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Auth application configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Directory holding the account and session blobs
    pub data_dir: PathBuf,
    /// Whether to create the sample account when no accounts were ever stored
    pub seed_sample_account: bool,
    /// Artificial delay before each request, applied at the presentation layer
    pub simulated_latency: Duration,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed_sample_account: true,
            simulated_latency: Duration::ZERO,
            log_format: LogFormat::Text,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);

        let seed_sample_account = match lookup(SEED_VAR) {
            Some(v) => parse_bool(SEED_VAR, &v)?,
            None => defaults.seed_sample_account,
        };

        let simulated_latency = match lookup(LATENCY_VAR) {
            Some(v) => Duration::from_millis(v.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar(LATENCY_VAR.to_string(), e.to_string())
            })?),
            None => defaults.simulated_latency,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(v) => parse_log_format(&v)?,
            None => defaults.log_format,
        };

        Ok(Self {
            data_dir,
            seed_sample_account,
            simulated_latency,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`).
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected true or false, got {other:?}"),
        )),
    }
}

/// Parse the log format name.
fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" | "" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidEnvVar(
            LOG_FORMAT_VAR.to_string(),
            format!("expected text or json, got {other:?}"),
        )),
    }
}
