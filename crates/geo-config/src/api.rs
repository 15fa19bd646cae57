//! Metrics API connection settings.

use std::time::Duration;

use geo_client::{ClientSettings, RetryPolicy, DEFAULT_BASE_URL};
use serde::{Deserialize, Deserializer, Serialize};

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_backoff_base_ms() -> u64 {
    1000
}

/// Accept numbers as text: environment providers parse `GEOSCOPE_API__BRAND_ID=123`
/// as an integer.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        UInt(u64),
        Float(f64),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Str(s) => s,
        Text::Int(n) => n.to_string(),
        Text::UInt(n) => n.to_string(),
        Text::Float(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API key, `rk_<hash>_<brandId>`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_id: String,

    /// Name hint used to pick a brand when no ID is configured.
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_name: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First retry delay; doubles per retry.
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            brand_id: String::new(),
            brand_name: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

impl ApiConfig {
    /// Whether an API key is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.key.trim().is_empty()
    }

    /// Transport settings for [`geo_client::GeoClient`].
    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                backoff_base: Duration::from_millis(self.backoff_base_ms),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = ApiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_base_ms, 1000);
    }

    #[test]
    fn client_settings_follow_config() {
        let config = ApiConfig {
            base_url: "http://localhost:8080".into(),
            timeout_secs: 5,
            max_retries: 1,
            backoff_base_ms: 250,
            ..ApiConfig::default()
        };
        let settings = config.client_settings();
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(
            settings.retry,
            RetryPolicy {
                max_retries: 1,
                backoff_base: Duration::from_millis(250),
            }
        );
    }

    #[test]
    fn blank_key_is_not_configured() {
        let config = ApiConfig {
            key: "   ".into(),
            ..ApiConfig::default()
        };
        assert!(!config.is_configured());
    }
}
