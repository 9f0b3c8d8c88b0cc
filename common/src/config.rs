use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const MAX_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API URL cannot be empty")]
    EmptyUrl,
    #[error("API URL '{0}' must start with http:// or https://")]
    UnsupportedScheme(String),
    #[error("timeout must be between 1 and 60 seconds, got {0}")]
    TimeoutOutOfRange(u64),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the diagnostics service, never ending in `/`.
    pub api_url: String,
    /// Deadline applied to every single API call.
    pub timeout: Duration,
    /// 0 prints everything, 1 drops decorations, 2 prints results only.
    pub quiet: u8,
    pub no_banner: bool,
    /// Emit machine-readable JSON instead of the decorated tree.
    pub json: bool,
}

impl Config {
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            timeout: validate_timeout(timeout_secs)?,
            quiet: 0,
            no_banner: false,
            json: false,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            quiet: 0,
            no_banner: false,
            json: false,
        }
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed: &str = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyUrl);
    }

    let lower: String = trimmed.to_ascii_lowercase();
    let has_host = |scheme: &str| lower.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty());
    if !has_host("http://") && !has_host("https://") {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }

    Ok(trimmed.to_string())
}

fn validate_timeout(secs: u64) -> Result<Duration, ConfigError> {
    if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(ConfigError::TimeoutOutOfRange(secs));
    }
    Ok(Duration::from_secs(secs))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
