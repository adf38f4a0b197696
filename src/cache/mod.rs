//! # Pluggable Fact Cache
//!
//! This module implements a key-value cache for collected system facts with
//! swappable storage backends.
//!
//! ## Features
//!
//! - **Backend Contract**: [`CacheBackend`] trait every store implements in full
//! - **Built-in Backends**: in-process [`MemoryBackend`] and file-backed [`JsonFileBackend`]
//! - **Named Resolution**: [`BackendLoader`] maps backend names to factories
//! - **Copy Isolation**: values read through [`CacheAdjudicator`] are owned deep copies
//! - **Lazy Loading**: the backend is resolved once, on first use
//! - **Fact Cache**: [`FactCache`] resolves the configured default backend up front
//!
//! ## Example
//!
//! ```rust
//! use ouroboros_factcache::cache::{CacheConfig, FactCache};
//! use serde_json::json;
//!
//! # fn example() -> ouroboros_factcache::Result<()> {
//! let config = CacheConfig::builder().plugin("memory").build();
//! let mut facts = FactCache::with_config(config)?;
//!
//! facts.set("web01", json!({"ansible_distribution": "Debian"}))?;
//! facts.first_order_merge("web01", json!({"ansible_processor_vcpus": 4}))?;
//!
//! if let Some(host) = facts.get("web01")? {
//!     println!("Cache hit: {}", host);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod adjudicator;
pub mod backend;
pub mod config;
pub mod entry;
pub mod facts;
pub mod jsonfile;
pub mod loader;
pub mod memory;
pub mod types;

pub use adjudicator::CacheAdjudicator;
pub use backend::CacheBackend;
pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::CacheEntry;
pub use facts::FactCache;
pub use jsonfile::JsonFileBackend;
pub use loader::{BackendFactory, BackendLoader};
pub use memory::MemoryBackend;
pub use types::{CacheKey, CacheMap, CacheValue};
