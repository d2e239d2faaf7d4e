//! Client configuration.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the shop API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g. "http://localhost:8080")
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// - `SHOPADMIN_API_URL` (default `http://localhost:8080`)
    /// - `SHOPADMIN_AUTH_TOKEN` (optional)
    /// - `SHOPADMIN_HTTP_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("SHOPADMIN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(base_url);

        if let Some(token) = lookup("SHOPADMIN_AUTH_TOKEN").filter(|t| !t.is_empty()) {
            config = config.with_token(token);
        }

        if let Some(raw) = lookup("SHOPADMIN_HTTP_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(secs),
                _ => tracing::warn!(
                    "ignoring invalid SHOPADMIN_HTTP_TIMEOUT_SECS={raw:?}; using {}s",
                    config.timeout
                ),
            }
        }

        config
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
