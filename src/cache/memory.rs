//! In-process backend, the default store

use crate::cache::backend::CacheBackend;
use crate::cache::config::CacheConfig;
use crate::cache::types::{CacheKey, CacheMap, CacheValue};
use crate::error::{CacheError, Result};
use std::borrow::Cow;
use std::collections::HashMap;

/// Backend keeping every entry in a `HashMap` owned by the instance.
///
/// Reads lend the stored value; the adjudicator is what turns them into
/// independent copies.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<CacheKey, CacheValue>,
}

impl MemoryBackend {
    pub const NAME: &'static str = "memory";

    pub fn new() -> Self {
        Self::default()
    }

    /// Loader entry point. The memory backend takes no options.
    pub fn from_config(_config: &CacheConfig) -> Result<Self> {
        Ok(Self::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Cow<'_, CacheValue>> {
        self.entries
            .get(key)
            .map(Cow::Borrowed)
            .ok_or_else(|| CacheError::KeyNotFoundError(key.to_string()))
    }

    fn set(&mut self, key: &str, value: CacheValue) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<CacheKey>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.entries.contains_key(key))
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn copy(&self) -> Result<CacheMap> {
        Ok(self.entries.clone())
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
