//! # Client Configuration
//!
//! Where the backend lives and how patient we are with it. Defaults match
//! a local development backend; deployments override through environment
//! variables.

use std::env;

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    /// (e.g. `http://localhost:8000`).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Loads configuration from the environment, falling back to the
    /// defaults for anything unset or unparseable.
    ///
    /// - `VELA_API_URL` overrides the base URL
    /// - `VELA_API_TIMEOUT_SECS` overrides the timeout
    pub fn from_env() -> Self {
        let base_url =
            env::var("VELA_API_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let timeout_secs = env::var("VELA_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);

        ClientConfig {
            base_url,
            timeout_secs,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://pos.example.com").with_timeout(5);
        assert_eq!(config.base_url, "https://pos.example.com");
        assert_eq!(config.timeout_secs, 5);
    }
}
