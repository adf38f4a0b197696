//! Mapping-style access over a single backend
//!
//! [`CacheAdjudicator`] is the layer callers talk to. It resolves its backend
//! once, on first use or at construction, and from then on delegates every
//! operation to it. Values leave the adjudicator as owned deep copies, so a
//! caller can rearrange a fetched fact tree freely; nothing changes in the
//! backend until the caller writes it back with [`set`](CacheAdjudicator::set).
//!
//! ```
//! use ouroboros_factcache::CacheAdjudicator;
//! use serde_json::json;
//!
//! # fn main() -> ouroboros_factcache::Result<()> {
//! let mut cache = CacheAdjudicator::default();
//! cache.set("web01", json!({"mounts": ["/", "/var"]}))?;
//!
//! let mut facts = cache.fetch("web01")?;
//! facts["mounts"][0] = json!("/srv");
//! assert_eq!(cache.fetch("web01")?["mounts"][0], "/");
//!
//! assert_eq!(cache.pop_or("db01", json!(null))?, json!(null));
//! assert!(cache.pop("db01").unwrap_err().is_key_not_found());
//! # Ok(())
//! # }
//! ```

use crate::cache::backend::CacheBackend;
use crate::cache::config::CacheConfig;
use crate::cache::loader::BackendLoader;
use crate::cache::types::{CacheKey, CacheMap, CacheValue};
use crate::error::{CacheError, Result};
use std::fmt;
use tracing::{debug, info};

/// Mapping-like facade over one cache backend
pub struct CacheAdjudicator {
    /// Name the backend is (or will be) resolved under
    backend_name: String,

    /// Options passed to the backend factory
    config: CacheConfig,

    loader: BackendLoader,

    /// Resolved backend. Set at most once.
    backend: Option<Box<dyn CacheBackend>>,
}

impl Default for CacheAdjudicator {
    /// Lazily-loaded `memory` backend
    fn default() -> Self {
        Self::lazy(CacheConfig::default())
    }
}

impl CacheAdjudicator {
    /// Adjudicator that resolves `config.plugin` on first use
    pub fn lazy(config: CacheConfig) -> Self {
        Self::with_loader(BackendLoader::default(), config)
    }

    /// Lazy adjudicator resolving through a custom loader
    pub fn with_loader(loader: BackendLoader, config: CacheConfig) -> Self {
        Self {
            backend_name: config.plugin.clone(),
            config,
            loader,
            backend: None,
        }
    }

    /// Resolve `config.plugin` now, failing with [`CacheError::LoadError`]
    pub fn load(config: CacheConfig) -> Result<Self> {
        Self::load_with(BackendLoader::default(), config)
    }

    /// Eager variant of [`with_loader`](Self::with_loader)
    pub fn load_with(loader: BackendLoader, config: CacheConfig) -> Result<Self> {
        let mut adjudicator = Self::with_loader(loader, config);
        adjudicator.ensure_loaded()?;
        Ok(adjudicator)
    }

    /// Wrap an already constructed backend
    pub fn with_backend(backend: Box<dyn CacheBackend>) -> Self {
        let config = CacheConfig::builder().plugin(backend.name()).build();
        Self {
            backend_name: config.plugin.clone(),
            config,
            loader: BackendLoader::empty(),
            backend: Some(backend),
        }
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Whether the backend has been resolved yet
    pub fn is_loaded(&self) -> bool {
        self.backend.is_some()
    }

    /// Resolve the backend if that has not happened yet
    pub fn ensure_loaded(&mut self) -> Result<()> {
        self.backend().map(|_| ())
    }

    fn resolve(loader: &BackendLoader, name: &str, config: &CacheConfig) -> Result<Box<dyn CacheBackend>> {
        debug!("Resolving cache backend: {}", name);
        loader.get(name, config).map_err(|e| CacheError::LoadError {
            backend: name.to_string(),
            source: Box::new(e),
        })
    }

    fn backend(&mut self) -> Result<&mut Box<dyn CacheBackend>> {
        let backend = match self.backend {
            Some(ref mut backend) => backend,
            None => {
                let loaded = Self::resolve(&self.loader, &self.backend_name, &self.config)?;
                self.backend.insert(loaded)
            }
        };
        Ok(backend)
    }

    /// Copy of the value under `key`; [`CacheError::KeyNotFoundError`] if absent
    pub fn fetch(&mut self, key: &str) -> Result<CacheValue> {
        let value = self.backend()?.get(key)?.into_owned();
        Ok(value)
    }

    /// Copy of the value under `key`, or `None` if absent
    pub fn get(&mut self, key: &str) -> Result<Option<CacheValue>> {
        match self.fetch(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_key_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Copy of the value under `key`, or `default` if absent
    pub fn get_or(&mut self, key: &str, default: impl Into<CacheValue>) -> Result<CacheValue> {
        Ok(self.get(key)?.unwrap_or_else(|| default.into()))
    }

    /// Store `value` under `key` as given
    pub fn set(&mut self, key: &str, value: impl Into<CacheValue>) -> Result<()> {
        self.backend()?.set(key, value.into())
    }

    pub fn contains(&mut self, key: &str) -> Result<bool> {
        self.backend()?.contains(key)
    }

    /// Remove `key`; absent keys are ignored
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.backend()?.delete(key)
    }

    /// Remove `key` and return its value.
    /// [`CacheError::KeyNotFoundError`] if absent.
    pub fn pop(&mut self, key: &str) -> Result<CacheValue> {
        self.pop_inner(key, None)
    }

    /// Remove `key` and return its value, or `default` if absent.
    /// A `null` default is returned like any other.
    pub fn pop_or(&mut self, key: &str, default: impl Into<CacheValue>) -> Result<CacheValue> {
        self.pop_inner(key, Some(default.into()))
    }

    /// `default` of `None` means the caller gave no default
    fn pop_inner(&mut self, key: &str, default: Option<CacheValue>) -> Result<CacheValue> {
        let backend = self.backend()?;

        let found = match backend.get(key) {
            Ok(value) => Some(value.into_owned()),
            Err(e) if e.is_key_not_found() => None,
            Err(e) => return Err(e),
        };

        match found {
            Some(value) => {
                backend.delete(key)?;
                Ok(value)
            }
            None => default.ok_or_else(|| CacheError::KeyNotFoundError(key.to_string())),
        }
    }

    /// Store every pair from `other`. Keys not in `other` are left alone.
    pub fn update<I, K, V>(&mut self, other: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<CacheValue>,
    {
        let backend = self.backend()?;
        for (key, value) in other {
            backend.set(key.as_ref(), value.into())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        let backend = self.backend()?;
        backend.flush()?;
        info!("Flushed cache backend: {}", backend.name());
        Ok(())
    }

    pub fn keys(&mut self) -> Result<Vec<CacheKey>> {
        self.backend()?.keys()
    }

    /// Owned copy of every entry
    pub fn copy(&mut self) -> Result<CacheMap> {
        self.backend()?.copy()
    }

    /// Owned key/value pairs
    pub fn items(&mut self) -> Result<Vec<(CacheKey, CacheValue)>> {
        Ok(self.copy()?.into_iter().collect())
    }

    pub fn len(&mut self) -> Result<usize> {
        Ok(self.keys()?.len())
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl fmt::Debug for CacheAdjudicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheAdjudicator")
            .field("backend", &self.backend_name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
