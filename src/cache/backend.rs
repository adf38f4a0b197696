//! Backend contract every cache store implements
//!
//! A backend is only usable once it implements all six required operations.
//! The trait checker enforces that before any instance exists: leaving one out
//! is a compile error, not a failure on first call.
//!
//! ```compile_fail
//! use std::borrow::Cow;
//! use ouroboros_factcache::cache::{CacheBackend, CacheKey, CacheValue};
//! use ouroboros_factcache::Result;
//!
//! struct Incomplete;
//!
//! impl CacheBackend for Incomplete {
//!     fn get(&self, key: &str) -> Result<Cow<'_, CacheValue>> {
//!         Err(ouroboros_factcache::CacheError::KeyNotFoundError(key.to_string()))
//!     }
//!     fn set(&mut self, _key: &str, _value: CacheValue) -> Result<()> { Ok(()) }
//!     fn keys(&self) -> Result<Vec<CacheKey>> { Ok(Vec::new()) }
//!     fn contains(&self, _key: &str) -> Result<bool> { Ok(false) }
//!     fn delete(&mut self, _key: &str) -> Result<()> { Ok(()) }
//!     // no `flush`
//! }
//! ```
//!
//! Implementing every operation is enough, even when each one does nothing:
//!
//! ```
//! use std::borrow::Cow;
//! use ouroboros_factcache::cache::{CacheBackend, CacheKey, CacheValue};
//! use ouroboros_factcache::{CacheError, Result};
//!
//! struct Discard;
//!
//! impl CacheBackend for Discard {
//!     fn get(&self, key: &str) -> Result<Cow<'_, CacheValue>> {
//!         Err(CacheError::KeyNotFoundError(key.to_string()))
//!     }
//!     fn set(&mut self, _key: &str, _value: CacheValue) -> Result<()> { Ok(()) }
//!     fn keys(&self) -> Result<Vec<CacheKey>> { Ok(Vec::new()) }
//!     fn contains(&self, _key: &str) -> Result<bool> { Ok(false) }
//!     fn delete(&mut self, _key: &str) -> Result<()> { Ok(()) }
//!     fn flush(&mut self) -> Result<()> { Ok(()) }
//! }
//!
//! let backend: Box<dyn CacheBackend> = Box::new(Discard);
//! assert!(backend.copy().unwrap().is_empty());
//! ```

use crate::cache::types::{CacheKey, CacheMap, CacheValue};
use crate::error::Result;
use std::borrow::Cow;

/// Storage contract for a fact cache backend.
///
/// Backends are synchronous and unlocked. Mutating operations take `&mut self`;
/// sharing one backend across threads needs an outer `Mutex`.
pub trait CacheBackend {
    /// Read the value stored under `key`.
    ///
    /// Fails with [`CacheError::KeyNotFoundError`](crate::CacheError) when the
    /// key is absent. A backend may lend its stored value; callers that hand
    /// values out must copy it.
    fn get(&self, key: &str) -> Result<Cow<'_, CacheValue>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: CacheValue) -> Result<()>;

    /// Snapshot of the keys currently present.
    fn keys(&self) -> Result<Vec<CacheKey>>;

    /// Existence check with no side effect on the stored data.
    fn contains(&self, key: &str) -> Result<bool>;

    /// Remove `key`. Removing an absent key is a no-op.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Remove every entry.
    fn flush(&mut self) -> Result<()>;

    /// Owned copy of every entry, built from [`keys`](Self::keys) and
    /// [`get`](Self::get).
    ///
    /// Keys that disappear between the two calls (e.g. expiry) are skipped.
    fn copy(&self) -> Result<CacheMap> {
        let mut map = CacheMap::new();
        for key in self.keys()? {
            match self.get(&key) {
                Ok(value) => {
                    map.insert(key, value.into_owned());
                }
                Err(e) if e.is_key_not_found() => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(map)
    }

    /// Short name used in log output
    fn name(&self) -> &str {
        "custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use serde_json::json;
    use std::collections::BTreeMap;

    /// Backend that relies on the provided `copy`
    #[derive(Default)]
    struct OrderedBackend {
        entries: BTreeMap<String, CacheValue>,
        vanished: Option<String>,
    }

    impl CacheBackend for OrderedBackend {
        fn get(&self, key: &str) -> Result<Cow<'_, CacheValue>> {
            if self.vanished.as_deref() == Some(key) {
                return Err(CacheError::KeyNotFoundError(key.to_string()));
            }
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
    }

    /// Backend whose every operation fails
    struct Broken;

    impl CacheBackend for Broken {
        fn get(&self, _key: &str) -> Result<Cow<'_, CacheValue>> {
            Err(CacheError::BackendError("unreachable".to_string()))
        }
        fn set(&mut self, _key: &str, _value: CacheValue) -> Result<()> {
            Err(CacheError::BackendError("unreachable".to_string()))
        }
        fn keys(&self) -> Result<Vec<CacheKey>> {
            Ok(vec!["a".to_string()])
        }
        fn contains(&self, _key: &str) -> Result<bool> {
            Err(CacheError::BackendError("unreachable".to_string()))
        }
        fn delete(&mut self, _key: &str) -> Result<()> {
            Err(CacheError::BackendError("unreachable".to_string()))
        }
        fn flush(&mut self) -> Result<()> {
            Err(CacheError::BackendError("unreachable".to_string()))
        }
    }

    #[test]
    fn test_default_copy_uses_keys_and_get() {
        let mut backend = OrderedBackend::default();
        backend.set("avocado", json!("fruit")).unwrap();
        backend.set("daisy", json!({"kind": "flower"})).unwrap();

        let copy = backend.copy().unwrap();
        assert_eq!(copy.len(), 2);
        assert_eq!(copy["avocado"], json!("fruit"));
        assert_eq!(copy["daisy"], json!({"kind": "flower"}));
    }

    #[test]
    fn test_default_copy_skips_vanished_keys() {
        let mut backend = OrderedBackend::default();
        backend.set("kept", json!(1)).unwrap();
        backend.set("gone", json!(2)).unwrap();
        backend.vanished = Some("gone".to_string());

        let copy = backend.copy().unwrap();
        assert_eq!(copy.len(), 1);
        assert!(copy.contains_key("kept"));
    }

    #[test]
    fn test_default_copy_propagates_backend_errors() {
        let err = Broken.copy().unwrap_err();
        assert!(matches!(err, CacheError::BackendError(_)));
    }

    #[test]
    fn test_default_name() {
        assert_eq!(OrderedBackend::default().name(), "custom");
    }
}
