//! Process configuration.
//!
//! Read once at start-up and passed down explicitly; nothing below `main`
//! looks at the environment.

use std::net::SocketAddr;

use crate::guidance::GuidanceConfig;
use crate::stations::StationClientConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Errors in the process configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid socket address: {value}")]
    InvalidAddr {
        name: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// ODPT consumer key; live station data is disabled without it.
    pub odpt_consumer_key: Option<String>,
    pub odpt_base_url: Option<String>,
    /// Guidance API key; plans are composed locally without it.
    pub guidance_api_key: Option<String>,
    pub guidance_api_url: Option<String>,
    pub guidance_model: Option<String>,
}

impl AppConfig {
    /// Read the configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = get("RELIEF_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                name: "RELIEF_BIND_ADDR",
                value: bind_raw.clone(),
                source,
            })?;

        Ok(Self {
            bind_addr,
            odpt_consumer_key: get("ODPT_CONSUMER_KEY"),
            odpt_base_url: get("ODPT_BASE_URL"),
            guidance_api_key: get("GUIDANCE_API_KEY"),
            guidance_api_url: get("GUIDANCE_API_URL"),
            guidance_model: get("GUIDANCE_MODEL"),
        })
    }

    /// Station client settings, if a consumer key is configured.
    pub fn station_client(&self) -> Option<StationClientConfig> {
        let key = self.odpt_consumer_key.as_ref()?;
        let config = StationClientConfig::new(key);
        Some(match &self.odpt_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    /// Guidance client settings, if an API key is configured.
    pub fn guidance(&self) -> Option<GuidanceConfig> {
        let key = self.guidance_api_key.as_ref()?;
        let mut config = GuidanceConfig::new(key);
        if let Some(url) = &self.guidance_api_url {
            config = config.with_api_url(url);
        }
        if let Some(model) = &self.guidance_model {
            config = config.with_model(model);
        }
        Some(config)
    }
}
