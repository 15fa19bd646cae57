use anyhow::Context;
use geo_client::GeoClient;
use geo_config::{CliCredentials, Credentials, GeoConfig};

/// Configuration and resolved credentials for one run.
pub struct Session {
    pub config: GeoConfig,
    pub credentials: Credentials,
}

impl Session {
    /// An API client, or `None` when no key was found anywhere.
    #[must_use]
    pub fn client(&self) -> Option<GeoClient> {
        let key = self.credentials.api_key.as_deref()?;
        Some(GeoClient::new(key, self.config.api.client_settings()))
    }
}

pub fn load(cli: &CliCredentials) -> anyhow::Result<Session> {
    let config = GeoConfig::load_with_dotenv().context("failed to load geoscope configuration")?;
    let credentials = Credentials::resolve(cli, &config.api);
    Ok(Session {
        config,
        credentials,
    })
}
