use std::time::Duration;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::client::filter::ValidationLevel;

pub const CONFIG_FILE: &str = "shelfprobe.toml";
pub const ENV_PREFIX: &str = "SHELFPROBE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub base_url:             String,
    pub timeout_ms:           u64,
    pub connect_timeout_ms:   u64,
    pub log_http:             bool,
    pub schema_validation:    ValidationLevel,
    pub max_response_time_ms: u64,
    pub log_filter:           String,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    /// Defaults, then `shelfprobe.toml`, then `SHELFPROBE_*` variables.
    /// A `.env` file is loaded first if one exists.
    pub fn read_config() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn validate(&self) -> crate::Result<()> {
        match reqwest::Url::parse(&self.base_url) {
            Ok(url) if url.cannot_be_a_base() => Err(crate::Error::InvalidUrl {
                url:    self.base_url.clone(),
                reason: "not a base url".into(),
            }),
            Ok(_) => Ok(()),
            Err(e) => Err(crate::Error::InvalidUrl {
                url:    self.base_url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn max_response_time(&self) -> Duration {
        Duration::from_millis(self.max_response_time_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url:             "https://fakerestapi.azurewebsites.net".into(),
            timeout_ms:           30_000,
            connect_timeout_ms:   10_000,
            log_http:             true,
            schema_validation:    ValidationLevel::Ignore,
            max_response_time_ms: 5_000,
            log_filter:           "info".into(),
        }
    }
}
