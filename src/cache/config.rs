//! Configuration for the cache system
//!
//! A single [`CacheConfig`] is the process-wide source for the default backend
//! name and the options handed to backends when they are constructed.

use crate::error::{CacheError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming the default backend
pub const ENV_PLUGIN: &str = "FACT_CACHE_PLUGIN";
/// Environment variable with the backend connection string
pub const ENV_CONNECTION: &str = "FACT_CACHE_CONNECTION";
/// Environment variable with the entry key prefix
pub const ENV_PREFIX: &str = "FACT_CACHE_PREFIX";
/// Environment variable with the entry lifetime in seconds
pub const ENV_TIMEOUT: &str = "FACT_CACHE_TIMEOUT";

/// Configuration for the fact cache and its backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Backend name resolved through the loader
    pub plugin: String,

    /// Backend connection string (a directory for `jsonfile`)
    pub connection: Option<String>,

    /// Prefix applied to stored entry names by file-backed stores
    pub prefix: String,

    /// How long entries live in expiring backends.
    /// Zero means entries never expire.
    pub timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            plugin: "memory".to_string(),
            connection: None,
            prefix: "facts_".to_string(),
            // 24 hours
            timeout: Duration::from_secs(86_400),
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.plugin.trim().is_empty() {
            return Err(CacheError::ConfigError(
                "plugin must not be empty".to_string(),
            ));
        }

        if let Some(connection) = &self.connection {
            if connection.trim().is_empty() {
                return Err(CacheError::ConfigError(
                    "connection must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Load configuration from the environment.
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Unset variables fall back to [`CacheConfig::default`].
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable lookup
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = CacheConfig::builder();

        if let Some(plugin) = lookup(ENV_PLUGIN) {
            builder = builder.plugin(plugin);
        }
        if let Some(connection) = lookup(ENV_CONNECTION) {
            builder = builder.connection(connection);
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            builder = builder.prefix(prefix);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CacheError::ConfigError(format!("{} must be whole seconds, got '{}'", ENV_TIMEOUT, raw))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let config = builder.build();
        config.validate()?;
        debug!("Loaded cache config: {:?}", config);
        Ok(config)
    }

    /// Whether entries written with this config expire
    pub fn expires(&self) -> bool {
        !self.timeout.is_zero()
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    plugin: Option<String>,
    connection: Option<String>,
    prefix: Option<String>,
    timeout: Option<Duration>,
}

impl CacheConfigBuilder {
    /// Set the backend name
    pub fn plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    /// Set the backend connection string
    pub fn connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Set the entry prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the entry lifetime
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            plugin: self.plugin.unwrap_or(defaults.plugin),
            connection: self.connection.or(defaults.connection),
            prefix: self.prefix.unwrap_or(defaults.prefix),
            timeout: self.timeout.unwrap_or(defaults.timeout),
        }
    }
}
