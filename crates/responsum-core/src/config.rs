//! Environment-driven configuration
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file in the working directory.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::branding;

/// Environment variable names
pub mod keys {
    pub const API_BASE_URL: &str = "RESPONSUM_API_BASE_URL";
    pub const TENANT_KEY: &str = "RESPONSUM_TENANT_KEY";
    pub const API_TOKEN: &str = "RESPONSUM_API_TOKEN";
    pub const PORT: &str = "RESPONSUM_PORT";
    pub const LOG_DIR: &str = "RESPONSUM_LOG_DIR";
    pub const LOG_FLUSH_MS: &str = "RESPONSUM_LOG_FLUSH_MS";
}

/// Default interval between file log flushes.
pub const DEFAULT_LOG_FLUSH_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Configuration for the example server and its logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleConfig {
    /// Base url of the Responsum API (without version or tenant)
    pub api_base_url: String,
    /// Tenant key, found in the server url of the API documentation
    pub tenant_key: String,
    /// Token sent in the `Api-Token` header
    pub api_token: String,
    /// Port of the local server
    pub server_port: u16,
    /// Existing directory that receives one log file per run.
    /// `None` keeps logging on the console and in memory only.
    pub log_dir: Option<PathBuf>,
    /// How often pending file log lines are written
    pub log_flush_interval: Duration,
}

impl ExampleConfig {
    /// Load configuration from `.env` (if present) and the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = non_blank(keys::API_BASE_URL)
            .unwrap_or_else(|| branding::DEFAULT_API_BASE_URL.to_string());
        url::Url::parse(&api_base_url).map_err(|e| ConfigError::Invalid {
            key: keys::API_BASE_URL,
            reason: e.to_string(),
        })?;

        let tenant_key =
            non_blank(keys::TENANT_KEY).ok_or(ConfigError::Missing(keys::TENANT_KEY))?;
        let api_token = non_blank(keys::API_TOKEN).ok_or(ConfigError::Missing(keys::API_TOKEN))?;

        let server_port = match non_blank(keys::PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: keys::PORT,
                reason: e.to_string(),
            })?,
            None => branding::DEFAULT_SERVER_PORT,
        };

        let log_flush_interval = match non_blank(keys::LOG_FLUSH_MS) {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: keys::LOG_FLUSH_MS,
                    reason: e.to_string(),
                })?;
                if ms == 0 {
                    return Err(ConfigError::Invalid {
                        key: keys::LOG_FLUSH_MS,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_millis(ms)
            }
            None => DEFAULT_LOG_FLUSH_INTERVAL,
        };

        Ok(Self {
            api_base_url,
            tenant_key: tenant_key.trim().to_string(),
            api_token: api_token.trim().to_string(),
            server_port,
            log_dir: non_blank(keys::LOG_DIR).map(|dir| PathBuf::from(dir.trim())),
            log_flush_interval,
        })
    }

    /// Tenant-scoped API root (`<base>/v1/<tenant>/`)
    pub fn tenant_base_url(&self) -> String {
        branding::tenant_base_url(&self.api_base_url, &self.tenant_key)
    }
}
