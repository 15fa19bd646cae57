//! API key and brand resolution across CLI flags, environment and config.

use crate::api::ApiConfig;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "RANKSCALE_API_KEY";
/// Environment variable holding the brand ID.
pub const BRAND_ID_ENV: &str = "RANKSCALE_BRAND_ID";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliCredentials {
    pub api_key: Option<String>,
    pub brand_id: Option<String>,
    pub brand_name: Option<String>,
}

/// Where the brand ID came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandSource {
    Flag,
    Environment,
    Config,
    /// Last `_` segment of the API key.
    ApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub brand_id: Option<(String, BrandSource)>,
    pub brand_name: Option<String>,
}

/// Extract the brand ID embedded in an `rk_<hash>_<brandId>` key.
///
/// Keys with fewer than three `_`-separated segments carry no brand.
#[must_use]
pub fn brand_id_from_key(api_key: &str) -> Option<String> {
    let segments: Vec<&str> = api_key.split('_').collect();
    if segments.len() < 3 {
        return None;
    }
    segments
        .last()
        .filter(|id| !id.is_empty())
        .map(|id| (*id).to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Credentials {
    /// Resolve from flags, the process environment and config.
    #[must_use]
    pub fn resolve(cli: &CliCredentials, config: &ApiConfig) -> Self {
        Self::resolve_with(cli, |name| std::env::var(name).ok(), config)
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// Precedence for each value: CLI flag, `RANKSCALE_*` variable, config.
    /// A brand ID still missing after that is derived from the API key.
    #[must_use]
    pub fn resolve_with(
        cli: &CliCredentials,
        env: impl Fn(&str) -> Option<String>,
        config: &ApiConfig,
    ) -> Self {
        let api_key = non_empty(cli.api_key.clone())
            .or_else(|| non_empty(env(API_KEY_ENV)))
            .or_else(|| non_empty(Some(config.key.clone())));

        let brand_id = non_empty(cli.brand_id.clone())
            .map(|id| (id, BrandSource::Flag))
            .or_else(|| non_empty(env(BRAND_ID_ENV)).map(|id| (id, BrandSource::Environment)))
            .or_else(|| {
                non_empty(Some(config.brand_id.clone())).map(|id| (id, BrandSource::Config))
            })
            .or_else(|| {
                api_key
                    .as_deref()
                    .and_then(brand_id_from_key)
                    .map(|id| (id, BrandSource::ApiKey))
            });

        let brand_name = non_empty(cli.brand_name.clone())
            .or_else(|| non_empty(Some(config.brand_name.clone())));

        if let Some((_, source)) = &brand_id {
            tracing::debug!(?source, "resolved brand ID");
        }

        Self {
            api_key,
            brand_id,
            brand_name,
        }
    }

    #[must_use]
    pub fn brand_id(&self) -> Option<&str> {
        self.brand_id.as_ref().map(|(id, _)| id.as_str())
    }
}
