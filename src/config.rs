//! Environment-driven configuration.
//!
//! `RATES_API_URL` overrides the REST base URL. The streaming endpoint is not
//! read from the environment; override it through `RatesClient::builder()`.

use crate::error::ConfigError;
use crate::network::{API_URL_ENV, DEFAULT_API_URL, DEFAULT_WS_URL};

/// Resolved endpoints for a `RatesClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesConfig {
    pub api_url: String,
    pub ws_url: String,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
        }
    }
}

impl RatesConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = match lookup(API_URL_ENV) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => DEFAULT_API_URL.to_string(),
        };

        let config = Self {
            api_url,
            ws_url: DEFAULT_WS_URL.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url(API_URL_ENV, &self.api_url, &["http", "https"])?;
        check_url("ws_url", &self.ws_url, &["ws", "wss"])
    }
}

fn check_url(name: &'static str, value: &str, schemes: &[&str]) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        reason,
    };

    let url = reqwest::Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !schemes.contains(&url.scheme()) {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    Ok(())
}
