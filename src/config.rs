//! Startup configuration read from the environment (and `.env`, loaded by `main`).

use std::env::{self, VarError};

use thiserror::Error;
use tracing::{debug, error, info};

/// Tenor's public API host.
pub const DEFAULT_TENOR_BASE_URL: &str = "https://tenor.googleapis.com";
/// Client key reported to Tenor when `TENOR_CLIENT_KEY` is unset.
pub const DEFAULT_TENOR_CLIENT_KEY: &str = "abby";

/// Errors raised while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {name}: {source}")]
    MissingVar {
        name: &'static str,
        #[source]
        source: VarError,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    pub tenor_api_key: String,
    pub tenor_client_key: String,
    pub tenor_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        debug!("Loading configuration from environment");
        Self::from_lookup(|name| env::var(name))
    }

    /// Build the configuration from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let required = |name: &'static str| {
            lookup(name).map_err(|source| {
                error!("Failed to load {} from environment: {}", name, source);
                ConfigError::MissingVar { name, source }
            })
        };
        let optional = |name: &str, default: &str| lookup(name).unwrap_or_else(|_| default.into());

        let discord_token = required("DISCORD_TOKEN")?;
        let tenor_api_key = required("TENOR_API_KEY")?;
        let tenor_client_key = optional("TENOR_CLIENT_KEY", DEFAULT_TENOR_CLIENT_KEY);
        let tenor_base_url = optional("TENOR_BASE_URL", DEFAULT_TENOR_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!("Tenor endpoint: {}", tenor_base_url);

        Ok(Self {
            discord_token,
            tenor_api_key,
            tenor_client_key,
            tenor_base_url,
        })
    }
}
