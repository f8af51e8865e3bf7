use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{DashboardError, Result};

pub const DEFAULT_API_BASE: &str = "https://mt-task.onrender.com";
pub const BOOKINGS_PATH: &str = "/api/bookings";
pub const METRICS_PATH: &str = "/api/metrics";
pub const TRENDS_PATH: &str = "/api/trends";

/// Revenue trends always look back this many months, whatever the filters.
pub const TREND_LOOKBACK_MONTHS: u32 = 6;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(200);

/// Environment variable that overrides the configured API base URL.
pub const API_BASE_ENV: &str = "BOOKING_DASHBOARD_API_BASE";

/// Connection settings for the booking API.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub base_url: Url,
    /// Per-request timeout. Expiry surfaces as a network error.
    pub timeout: Duration,
    /// Extra attempts made after a network error. Zero disables retries.
    pub max_retries: u32,
    /// First backoff delay; doubled on every further attempt.
    pub retry_base_delay: Duration,
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
    retry_base_delay_ms: Option<u64>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl SyncConfig {
    /// Load settings from a JSON config file, filling gaps with defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let file: ConfigFile = serde_json::from_str(&contents)?;

        let mut config = Self::default();
        if let Some(base) = file.base_url {
            config.base_url = parse_base_url(&base)?;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = file.max_retries {
            config.max_retries = retries;
        }
        if let Some(ms) = file.retry_base_delay_ms {
            config.retry_base_delay = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// Resolve the effective configuration: the default config file if one
    /// exists, then the environment override.
    pub fn load() -> Result<Self> {
        let path = default_config_path();
        let config = if path.exists() {
            tracing::debug!(path = %path.display(), "loading dashboard config");
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.with_base_override(std::env::var(API_BASE_ENV).ok())
    }

    /// Replace the base URL when an override is present and non-empty.
    pub fn with_base_override(mut self, base: Option<String>) -> Result<Self> {
        if let Some(base) = base.filter(|b| !b.trim().is_empty()) {
            self.base_url = parse_base_url(base.trim())?;
        }
        Ok(self)
    }
}

/// Parse and check an API base URL. Only http(s) origins are accepted.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| DashboardError::Config(format!("invalid base URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DashboardError::Config(format!(
            "unsupported URL scheme '{}' in base URL '{}'",
            other, raw
        ))),
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        dir.join("booking-dashboard").join("config.json")
    } else {
        PathBuf::from(".booking-dashboard").join("config.json")
    }
}
