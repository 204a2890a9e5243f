//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ClientConfig::base_url`]
pub const ENV_API_URL: &str = "ORDERS_API_URL";

/// Environment variable overriding [`FakeApiConfig::bind_addr`]
pub const ENV_FAKE_API_ADDR: &str = "FAKE_API_ADDR";

/// Settings for [`OrderClient`](crate::client::OrderClient)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the order API, without the `/orders` suffix
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Settings for the in-memory fake API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeApiConfig {
    /// Address to bind, e.g. `127.0.0.1:3000`
    pub bind_addr: String,

    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,

    /// Start with the sample order (id 1)
    pub seed: bool,
}

impl Default for FakeApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            seed: true,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub fake_api: FakeApiConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path))?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from an optional file (defaults otherwise), then apply env overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Apply `ORDERS_API_URL` and `FAKE_API_ADDR` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.client.base_url = url;
        }
        if let Some(addr) = lookup(ENV_FAKE_API_ADDR).filter(|v| !v.is_empty()) {
            self.fake_api.bind_addr = addr;
        }
        self
    }
}
