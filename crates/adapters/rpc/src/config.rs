//! RPC client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration of the controller RPC client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// URL scheme used to reach controllers.
    pub scheme: String,
    /// Whole-request timeout, in milliseconds.
    pub request_timeout_ms: u64,
    /// TCP connect timeout, in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            request_timeout_ms: 5_000,
            connect_timeout_ms: 2_000,
        }
    }
}

impl RpcConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = RpcConfig::default();
        assert_eq!(config.scheme, "http");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn should_deserialize_partial_toml() {
        let config: RpcConfig = toml::from_str("request_timeout_ms = 750").unwrap();
        assert_eq!(config.request_timeout_ms, 750);
        assert_eq!(config.scheme, "http");
    }
}
