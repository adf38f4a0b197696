//! # Ouroboros Fact Cache (ouroboros-factcache)
//!
//! A key-value cache for collected system facts with pluggable storage
//! backends and mapping-style access.
//!
//! ## Features
//!
//! - Backend contract enforced by the trait checker
//! - In-memory and JSON-file backends, plus a registry for custom ones
//! - Deep-copy isolation on every read path
//! - Lazy, resolve-once backend loading
//! - Process-wide configuration from the environment (`.env` aware)
//!
//! ## Cache Adjudicator
//!
//! ```
//! use ouroboros_factcache::CacheAdjudicator;
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut cache = CacheAdjudicator::default();
//!
//!     cache.set("cache_key", json!({"key1": "value1", "key2": "value2"}))?;
//!     cache.update([("cache_key", json!({"key2": "updatedvalue"}))])?;
//!
//!     assert_eq!(cache.fetch("cache_key")?["key2"], "updatedvalue");
//!     Ok(())
//! }
//! ```
//!
//! ## Fact Cache
//!
//! The backend name comes from `FACT_CACHE_PLUGIN` (default `memory`). Backends
//! that need more configuration read it from the same place, e.g. the
//! `jsonfile` backend takes its directory from `FACT_CACHE_CONNECTION`.
//!
//! ```no_run
//! use ouroboros_factcache::FactCache;
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut facts = FactCache::new()?;
//!
//!     facts.first_order_merge("web01", json!({"ansible_os_family": "Debian"}))?;
//!     for key in facts.keys()? {
//!         println!("{}: {}", key, facts.fetch(&key)?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Backends
//!
//! ```
//! use ouroboros_factcache::{BackendLoader, CacheConfig, FactCache, MemoryBackend};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut loader = BackendLoader::default();
//!     loader.register("scratch", |_config| Ok(Box::new(MemoryBackend::new())));
//!
//!     let config = CacheConfig::builder().plugin("scratch").build();
//!     let mut facts = FactCache::with_loader(loader, config)?;
//!     facts.set("host", "up")?;
//!     assert!(facts.contains("host")?);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;

// Re-export main types for convenience
pub use cache::{
    BackendFactory, BackendLoader, CacheAdjudicator, CacheBackend, CacheConfig,
    CacheConfigBuilder, CacheEntry, CacheKey, CacheMap, CacheValue, FactCache,
    JsonFileBackend, MemoryBackend,
};
pub use error::{CacheError, Result};
