//! Client configuration.
//!
//! Passed into [`UserService`](crate::UserService) at construction so tests
//! can point the client at a mock endpoint. Deserializable so an embedding
//! application can load it from whatever config source it already uses.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the user service; `/users` is appended to it.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    #[serde(with = "opt_secs")]
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// `request_timeout` is written as whole seconds.
mod opt_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_service_without_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"request_timeout":5}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn deserializes_base_url() {
        let config: ClientConfig = serde_json::from_str(r#"{"base_url":"http://127.0.0.1:3000"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("http://127.0.0.1:3000"));
    }

    #[test]
    fn with_timeout_sets_timeout() {
        let config = ClientConfig::new("http://x").with_timeout(Duration::from_millis(250));
        assert_eq!(config.request_timeout, Some(Duration::from_millis(250)));
    }
}
