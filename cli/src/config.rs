//! Resolved CLI settings.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::CliError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Bound on plain REST calls. Chat streams are only bounded by the connect
/// timeout since a turn can legitimately run for minutes.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl CliConfig {
    /// Validate the base URL and build the config.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidBaseUrl`] unless the URL is `http(s)://`
    /// with a host.
    pub fn new(base_url: &str, connect_timeout_secs: u64) -> Result<Self, CliError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .ok_or_else(|| CliError::InvalidBaseUrl(base_url.to_owned()))?;
        if host.is_empty() {
            return Err(CliError::InvalidBaseUrl(base_url.to_owned()));
        }
        Ok(Self {
            base_url: trimmed.to_owned(),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
