//! Name-to-backend resolution
//!
//! The loader is a registry of factories. Built-in backends are registered by
//! [`BackendLoader::default`]; applications add their own (a redis or memcached
//! client, say) with [`BackendLoader::register`].

use crate::cache::backend::CacheBackend;
use crate::cache::config::CacheConfig;
use crate::cache::jsonfile::JsonFileBackend;
use crate::cache::memory::MemoryBackend;
use crate::error::{CacheError, Result};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Constructor for a named backend
pub type BackendFactory = Box<dyn Fn(&CacheConfig) -> Result<Box<dyn CacheBackend>>>;

/// Registry resolving backend names to constructed backends
pub struct BackendLoader {
    factories: HashMap<String, BackendFactory>,
}

impl Default for BackendLoader {
    /// Loader with `memory` and `jsonfile` (alias `json`) registered
    fn default() -> Self {
        let mut loader = Self::empty();
        loader.register(MemoryBackend::NAME, |config| {
            Ok(Box::new(MemoryBackend::from_config(config)?))
        });
        loader.register(JsonFileBackend::NAME, |config| {
            Ok(Box::new(JsonFileBackend::from_config(config)?))
        });
        loader.register("json", |config| {
            Ok(Box::new(JsonFileBackend::from_config(config)?))
        });
        loader
    }
}

impl BackendLoader {
    /// Loader with nothing registered
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` under `name`, replacing any previous registration
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&CacheConfig) -> Result<Box<dyn CacheBackend>> + 'static,
    {
        let name = name.into();
        debug!("Registering cache backend: {}", name);
        self.factories.insert(name, Box::new(factory));
    }

    /// Construct the backend registered under `name`
    pub fn get(&self, name: &str, config: &CacheConfig) -> Result<Box<dyn CacheBackend>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| CacheError::UnknownBackendError(name.to_string()))?;

        let backend = factory(config)?;
        debug!("Loaded cache backend: {}", name);
        Ok(backend)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for BackendLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendLoader")
            .field("backends", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_names() {
        let loader = BackendLoader::default();
        assert_eq!(loader.names(), vec!["json", "jsonfile", "memory"]);
        assert!(loader.contains("memory"));
        assert!(!loader.contains("redis"));
    }

    #[test]
    fn test_load_memory() {
        let loader = BackendLoader::default();
        let backend = loader.get("memory", &CacheConfig::default()).unwrap();
        assert_eq!(backend.name(), "memory");
        assert!(backend.keys().unwrap().is_empty());
    }

    #[test]
    fn test_load_jsonfile_alias() {
        let tmp = TempDir::new().unwrap();
        let config = CacheConfig::builder()
            .connection(tmp.path().to_string_lossy().to_string())
            .build();

        let backend = BackendLoader::default().get("json", &config).unwrap();
        assert_eq!(backend.name(), "jsonfile");
    }

    #[test]
    fn test_unknown_backend() {
        let err = BackendLoader::default()
            .get("memcached", &CacheConfig::default())
            .err().unwrap();
        assert!(matches!(err, CacheError::UnknownBackendError(ref name) if name == "memcached"));
    }

    #[test]
    fn test_factory_error_propagates() {
        let err = BackendLoader::default()
            .get("jsonfile", &CacheConfig::default())
            .err().unwrap();
        assert!(matches!(err, CacheError::MissingOptionError { .. }));
    }

    #[test]
    fn test_register_custom_backend() {
        let mut loader = BackendLoader::empty();
        assert!(loader.names().is_empty());

        loader.register("seeded", |_config| {
            let mut backend = MemoryBackend::new();
            backend.set("seed", json!(true))?;
            Ok(Box::new(backend))
        });

        let backend = loader.get("seeded", &CacheConfig::default()).unwrap();
        assert!(backend.contains("seed").unwrap());
    }

    #[test]
    fn test_debug_lists_backends() {
        let debug = format!("{:?}", BackendLoader::default());
        assert!(debug.contains("jsonfile"));
    }
}
