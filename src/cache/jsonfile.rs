//! File-backed store writing one JSON document per key
//!
//! Entries live under the directory given as the `connection` option, named
//! `<prefix><key>`. Each file holds a serialized [`CacheEntry`], so expiry
//! survives process restarts. Expired or undecodable files are removed when
//! they are touched.

use crate::cache::backend::CacheBackend;
use crate::cache::config::CacheConfig;
use crate::cache::entry::CacheEntry;
use crate::cache::types::{CacheKey, CacheValue};
use crate::error::{CacheError, Result};
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Backend persisting entries as JSON files in a directory
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
    prefix: String,
    timeout: Option<Duration>,
}

impl JsonFileBackend {
    pub const NAME: &'static str = "jsonfile";

    /// Open (and create if needed) a cache directory
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("Opened jsonfile cache at {}", dir.display());

        Ok(Self {
            dir,
            prefix: prefix.into(),
            timeout,
        })
    }

    /// Loader entry point. Requires `connection`.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let dir = config
            .connection
            .as_deref()
            .ok_or_else(|| CacheError::MissingOptionError {
                backend: Self::NAME.to_string(),
                option: "connection".to_string(),
            })?;

        let timeout = config.expires().then_some(config.timeout);
        Self::new(dir, config.prefix.clone(), timeout)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", self.prefix, key))
    }

    fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(|c| c == '/' || c == '\\')
    }

    fn remove_file(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a live entry. Expired or undecodable files are removed and
    /// reported as absent.
    fn load(&self, key: &str) -> Result<Option<CacheEntry>> {
        if !Self::is_valid_key(key) {
            return Ok(None);
        }

        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding undecodable cache file {}: {}", path.display(), e);
                Self::remove_file(&path)?;
                return Ok(None);
            }
        };

        if entry.is_expired() {
            debug!("Cache entry expired: {}", key);
            Self::remove_file(&path)?;
            return Ok(None);
        }

        Ok(Some(entry))
    }
}

impl CacheBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Cow<'_, CacheValue>> {
        match self.load(key)? {
            Some(entry) => Ok(Cow::Owned(entry.value)),
            None => Err(CacheError::KeyNotFoundError(key.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: CacheValue) -> Result<()> {
        if !Self::is_valid_key(key) {
            return Err(CacheError::BackendError(format!(
                "invalid cache key for {}: {:?}",
                Self::NAME,
                key
            )));
        }

        let entry = CacheEntry::new(key.to_string(), value, self.timeout);
        let path = self.entry_path(key);
        fs::write(&path, serde_json::to_vec(&entry)?)?;
        debug!("Wrote cache entry {} to {}", key, path.display());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<CacheKey>> {
        let mut keys = Vec::new();

        for dir_entry in fs::read_dir(&self.dir)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let file_name = dir_entry.file_name();
            let Some(key) = file_name
                .to_str()
                .and_then(|name| name.strip_prefix(self.prefix.as_str()))
            else {
                continue;
            };

            if self.load(key)?.is_some() {
                keys.push(key.to_string());
            }
        }

        Ok(keys)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.load(key)?.is_some())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if !Self::is_valid_key(key) {
            return Ok(());
        }
        Self::remove_file(&self.entry_path(key))
    }

    fn flush(&mut self) -> Result<()> {
        let keys = self.keys()?;
        for key in &keys {
            self.delete(key)?;
        }
        info!("Flushed {} entries from {}", keys.len(), self.dir.display());
        Ok(())
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
