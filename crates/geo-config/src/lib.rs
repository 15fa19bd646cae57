//! # geo-config
//!
//! Layered configuration loading for geoscope using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GEOSCOPE_*` prefix, `__` as separator)
//! 2. Project-level `geoscope.toml` in the working directory
//! 3. User-level `~/.config/geoscope/config.toml`
//! 4. Built-in defaults
//!
//! `RANKSCALE_API_KEY`, `RANKSCALE_BRAND_ID` and command-line flags sit on
//! top of all of these; see [`Credentials`].
//!
//! # Usage
//!
//! ```no_run
//! use geo_config::{CliCredentials, Credentials, GeoConfig};
//!
//! let config = GeoConfig::load_with_dotenv().expect("config");
//! let creds = Credentials::resolve(&CliCredentials::default(), &config.api);
//! if let Some(brand) = creds.brand_id() {
//!     println!("brand: {brand}");
//! }
//! ```

mod api;
mod credentials;
mod error;

pub use api::ApiConfig;
pub use credentials::{
    brand_id_from_key, BrandSource, CliCredentials, Credentials, API_KEY_ENV, BRAND_ID_ENV,
};
pub use error::ConfigError;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "geoscope.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeoConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

impl GeoConfig {
    /// Load configuration from TOML files and `GEOSCOPE_*` variables.
    ///
    /// Does NOT read `.env`; use [`GeoConfig::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value
    /// fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then [`GeoConfig::load`].
    ///
    /// # Errors
    ///
    /// See [`GeoConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(%e, "ignoring unreadable .env"),
        }
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("GEOSCOPE_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("geoscope").join("config.toml"))
    }

    /// Reject values the client cannot work with.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("expected an http(s) URL, got '{base_url}'"),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GeoConfig::default();
        assert!(!config.api.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = GeoConfig::default();
        config.api.base_url = "ftp://example.com".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "api.base_url"
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = GeoConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
