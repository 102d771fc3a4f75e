//! Endpoint configuration for the always-allowed domain fetch.

use std::time::Duration;

use fg_core::{endpoint_urls, DEFAULT_CONFIG_ENDPOINTS, DEFAULT_CONFIG_PATH};
use serde::{Deserialize, Serialize};

/// Environment variable holding comma-separated endpoint base URLs.
pub const ENDPOINTS_ENV: &str = "FOCUSGUARD_CONFIG_ENDPOINTS";

pub const DEFAULT_ENDPOINTS: &[&str] = DEFAULT_CONFIG_ENDPOINTS;
pub const DEFAULT_PATH: &str = DEFAULT_CONFIG_PATH;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteConfig {
    /// Base URLs, tried in order until one succeeds
    pub endpoints: Vec<String>,
    /// Path appended to every base URL
    pub path: String,
    /// Per-request timeout
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            path: DEFAULT_PATH.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl RemoteConfig {
    /// Defaults, with endpoints overridden from [`ENDPOINTS_ENV`] when set.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a JSON config file. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENDPOINTS_ENV) {
            let endpoints = split_endpoints(&value);
            if endpoints.is_empty() {
                log::warn!("{ENDPOINTS_ENV} is set but contains no endpoints; using defaults");
            } else {
                self.endpoints = endpoints;
            }
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URLs to query, in order.
    pub fn endpoint_urls(&self) -> Vec<String> {
        endpoint_urls(&self.endpoints[..], &self.path)
    }
}

fn split_endpoints(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_urls() {
        let config = RemoteConfig::default();
        assert_eq!(
            config.endpoint_urls(),
            vec![
                "https://focusguard.app/api/config/allowed-domains".to_string(),
                "http://localhost:3000/api/config/allowed-domains".to_string(),
            ]
        );
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_slashes_are_joined_once() {
        let config = RemoteConfig {
            endpoints: vec!["https://a.dev/".into(), "  ".into()],
            path: "/domains".into(),
            timeout_ms: 1,
        };
        assert_eq!(config.endpoint_urls(), vec!["https://a.dev/domains".to_string()]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RemoteConfig::from_json(r#"{"endpoints":["http://127.0.0.1:8080"]}"#).unwrap();
        assert_eq!(config.endpoints, vec!["http://127.0.0.1:8080".to_string()]);
        assert_eq!(config.path, DEFAULT_PATH);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_env_override() {
        let config = RemoteConfig::default().with_env_overrides(|key| {
            (key == ENDPOINTS_ENV).then(|| " http://one.test , ,http://two.test".to_string())
        });
        assert_eq!(config.endpoints, vec!["http://one.test".to_string(), "http://two.test".to_string()]);
    }

    #[test]
    fn test_blank_env_keeps_defaults() {
        let config = RemoteConfig::default().with_env_overrides(|_| Some(" , ".to_string()));
        assert_eq!(config, RemoteConfig::default());
    }
}
