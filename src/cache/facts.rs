//! Fact cache bound to process-wide configuration

use crate::cache::adjudicator::CacheAdjudicator;
use crate::cache::config::CacheConfig;
use crate::cache::loader::BackendLoader;
use crate::cache::types::CacheValue;
use crate::error::{CacheError, Result};
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Adjudicator over the configured default backend.
///
/// Unlike a bare [`CacheAdjudicator`], the backend is resolved during
/// construction: a missing or misconfigured backend fails here with
/// [`CacheError::FactCacheLoadError`] instead of on first use.
#[derive(Debug)]
pub struct FactCache {
    inner: CacheAdjudicator,
}

impl FactCache {
    /// Build from the environment (see [`CacheConfig::from_env`])
    pub fn new() -> Result<Self> {
        Self::with_config(CacheConfig::from_env()?)
    }

    /// Build from an explicit configuration
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_loader(BackendLoader::default(), config)
    }

    /// Build resolving through a custom loader
    pub fn with_loader(loader: BackendLoader, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let backend = config.plugin.clone();
        debug!("Loading facts cache backend: {}", backend);

        let inner = CacheAdjudicator::load_with(loader, config).map_err(|e| {
            let source = match e {
                CacheError::LoadError { source, .. } => source,
                other => Box::new(other),
            };
            CacheError::FactCacheLoadError { backend, source }
        })?;

        Ok(Self { inner })
    }

    /// Merge `value` into the facts stored under `key`.
    ///
    /// When both the stored and the new value are objects, top-level keys from
    /// `value` replace or extend the stored ones. Otherwise `value` replaces
    /// what was stored.
    pub fn first_order_merge(&mut self, key: &str, value: impl Into<CacheValue>) -> Result<()> {
        let value = value.into();

        let merged = match (self.inner.get(key)?, value) {
            (Some(CacheValue::Object(mut stored)), CacheValue::Object(update)) => {
                stored.extend(update);
                CacheValue::Object(stored)
            }
            (_, value) => value,
        };

        self.inner.set(key, merged)
    }

    pub fn into_inner(self) -> CacheAdjudicator {
        self.inner
    }
}

impl Deref for FactCache {
    type Target = CacheAdjudicator;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for FactCache {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
