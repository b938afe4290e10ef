//! Startup configuration
//!
//! Read once from the environment; every defaulted key is logged. CLI flags
//! override individual fields after loading.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::auth::providers::ProviderConfig;
use crate::auth::session::DEFAULT_SESSION_COOKIE;
use crate::router::matcher::{DEFAULT_API_PREFIX, DEFAULT_ASSET_PREFIX};
use crate::router::Matcher;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no identity providers configured; set credentials for at least one of \
         microsoft-entra-id, github, google"
    )]
    NoProviders,

    #[error("invalid value for {key}: {value} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{key} must be an absolute path prefix other than '/', got '{value}'")]
    BadPrefix { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub dictionaries: PathBuf,
    pub asset_prefix: String,
    pub api_prefix: String,
    pub session_cookie: String,
    pub providers: ProviderConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            bind: try_load(&lookup, "CHATFRONT_BIND", "127.0.0.1:3000")?,
            dictionaries: try_load(&lookup, "CHATFRONT_DICTIONARIES", "./dictionaries")?,
            asset_prefix: try_load(&lookup, "CHATFRONT_ASSET_PREFIX", DEFAULT_ASSET_PREFIX)?,
            api_prefix: try_load(&lookup, "CHATFRONT_API_PREFIX", DEFAULT_API_PREFIX)?,
            session_cookie: try_load(&lookup, "CHATFRONT_SESSION_COOKIE", DEFAULT_SESSION_COOKIE)?,
            providers: ProviderConfig::from_lookup(&lookup),
        };
        config.check_prefixes()?;
        Ok(config)
    }

    fn check_prefixes(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("CHATFRONT_ASSET_PREFIX", &self.asset_prefix),
            ("CHATFRONT_API_PREFIX", &self.api_prefix),
        ] {
            if !value.starts_with('/') || value.trim_end_matches('/').is_empty() {
                return Err(ConfigError::BadPrefix {
                    key,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(&self.asset_prefix, &self.api_prefix)
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        warn!("Environment variable {key} not found, using default {default}");
        default.to_string()
    });
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}
