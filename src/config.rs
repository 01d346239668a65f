//! Configuration file structures for the Steam Web API client.
//!
//! The configuration is read from an optional YAML file and merged with
//! environment variables prefixed by `STEAM_WEBAPI_`; nested keys are separated
//! by a double underscore.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Default key used by the protected endpoints
//! api_key: "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX"
//!
//! # Base URL of the Steam Web API
//! base_url: "https://api.steampowered.com"
//!
//! # Request timeout in seconds
//! timeout: 30
//!
//! # Extra headers sent with every request
//! headers:
//!   User-Agent: "steam-webapi"
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export STEAM_WEBAPI_API_KEY="XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX"
//! export STEAM_WEBAPI_TIMEOUT=10
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;

use crate::steam::{ClientConfig, DEFAULT_BASE_URL, TransportOptions};

/// Prefix of the environment variables overriding the configuration.
pub const ENV_PREFIX: &str = "STEAM_WEBAPI_";

/// Root configuration structure.
///
/// Every field is optional; an empty configuration targets the public Steam
/// Web API without a default key.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Default API key.
    ///
    /// Used by the protected endpoints when a call does not provide its own key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Steam Web API.
    ///
    /// Should include the protocol (http/https). A trailing slash is ignored.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Extra headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl Config {
    /// Loads the configuration from `path`, if any, and the environment.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist, is not valid YAML, or if a
    /// value has the wrong type.
    pub fn load(path: Option<&str>) -> Result<Config, figment::Error> {
        let mut figment = Figment::new();

        if let Some(path) = path {
            if !Path::new(path).is_file() {
                return Err(figment::Error::from(format!(
                    "config file {} not found",
                    path
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    /// Builds the immutable [`ClientConfig`] of a client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone().filter(|key| !key.is_empty()),
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            transport: TransportOptions {
                headers: self
                    .headers
                    .iter()
                    .map(|(name, value)| (name.to_owned(), value.to_owned()))
                    .collect(),
                timeout: self.timeout.map(Duration::from_secs),
            },
        }
    }
}
