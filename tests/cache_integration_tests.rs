//! Integration tests for the fact cache
//!
//! These tests verify the public surface end to end:
//! - Adjudicator mapping semantics and copy isolation
//! - Backend contract conformance of the built-in backends
//! - Fact cache construction and load failures
//! - File-backed persistence across instances

use ouroboros_factcache::cache::{
    BackendLoader, CacheAdjudicator, CacheBackend, CacheConfig, CacheKey, CacheValue, FactCache,
    JsonFileBackend, MemoryBackend,
};
use ouroboros_factcache::CacheError;
use serde_json::json;
use std::borrow::Cow;
use std::collections::HashMap;
use tempfile::TempDir;

/// Runs the same checks against any backend
fn assert_backend_contract(mut backend: Box<dyn CacheBackend>) {
    assert!(backend.keys().unwrap().is_empty());
    assert!(!backend.contains("host").unwrap());
    assert!(backend.get("host").unwrap_err().is_key_not_found());

    backend.set("host", json!({"ip": ["10.0.0.1"]})).unwrap();
    assert!(backend.contains("host").unwrap());
    assert_eq!(backend.get("host").unwrap().into_owned(), json!({"ip": ["10.0.0.1"]}));
    assert_eq!(backend.keys().unwrap(), vec!["host".to_string()]);

    backend.set("host", json!("replaced")).unwrap();
    assert_eq!(backend.get("host").unwrap().into_owned(), json!("replaced"));

    let copy = backend.copy().unwrap();
    assert_eq!(copy.len(), 1);

    backend.delete("host").unwrap();
    backend.delete("host").unwrap();
    assert!(!backend.contains("host").unwrap());

    backend.set("a", json!(1)).unwrap();
    backend.set("b", json!(2)).unwrap();
    backend.flush().unwrap();
    assert!(backend.keys().unwrap().is_empty());
}

#[test]
fn test_memory_backend_contract() {
    assert_backend_contract(Box::new(MemoryBackend::new()));
}

#[test]
fn test_jsonfile_backend_contract() {
    let tmp = TempDir::new().unwrap();
    assert_backend_contract(Box::new(
        JsonFileBackend::new(tmp.path(), "facts_", None).unwrap(),
    ));
}

#[test]
fn test_noop_backend_constructs() {
    struct Noop;

    impl CacheBackend for Noop {
        fn get(&self, key: &str) -> ouroboros_factcache::Result<Cow<'_, CacheValue>> {
            Err(CacheError::KeyNotFoundError(key.to_string()))
        }
        fn set(&mut self, _key: &str, _value: CacheValue) -> ouroboros_factcache::Result<()> {
            Ok(())
        }
        fn keys(&self) -> ouroboros_factcache::Result<Vec<CacheKey>> {
            Ok(Vec::new())
        }
        fn contains(&self, _key: &str) -> ouroboros_factcache::Result<bool> {
            Ok(false)
        }
        fn delete(&mut self, _key: &str) -> ouroboros_factcache::Result<()> {
            Ok(())
        }
        fn flush(&mut self) -> ouroboros_factcache::Result<()> {
            Ok(())
        }
    }

    let mut cache = CacheAdjudicator::with_backend(Box::new(Noop));
    cache.set("k", "v").unwrap();
    assert!(!cache.contains("k").unwrap());
    assert_eq!(cache.get_or("k", "fallback").unwrap(), json!("fallback"));
}

#[test]
fn test_adjudicator_scenario() {
    let mut cache = CacheAdjudicator::default();
    cache
        .set("cache_key", json!({"key1": "value1", "key2": "value2"}))
        .unwrap();
    cache.set("cache_key_2", json!({"key": "value"})).unwrap();

    assert!(cache.contains("cache_key").unwrap());

    assert_eq!(cache.pop("cache_key_2").unwrap(), json!({"key": "value"}));
    assert!(!cache.contains("cache_key_2").unwrap());

    cache
        .update([("cache_key", json!({"key2": "updatedvalue"}))])
        .unwrap();
    assert_eq!(cache.fetch("cache_key").unwrap()["key2"], "updatedvalue");
}

#[test]
fn test_copy_isolation_over_each_backend() {
    let tmp = TempDir::new().unwrap();
    let backends: Vec<Box<dyn CacheBackend>> = vec![
        Box::new(MemoryBackend::new()),
        Box::new(JsonFileBackend::new(tmp.path(), "iso_", None).unwrap()),
    ];

    for backend in backends {
        let mut cache = CacheAdjudicator::with_backend(backend);
        let original = json!({"disks": [{"name": "sda", "parts": ["sda1"]}]});
        cache.set("host", original.clone()).unwrap();

        let mut fetched = cache.fetch("host").unwrap();
        fetched["disks"][0]["parts"]
            .as_array_mut()
            .unwrap()
            .push(json!("sda2"));
        let mut got = cache.get("host").unwrap().unwrap();
        got["disks"][0]["name"] = json!("sdb");
        let mut copied = cache.copy().unwrap();
        copied.insert("host".to_string(), json!(null));

        assert_eq!(cache.fetch("host").unwrap(), original);
    }
}

#[test]
fn test_update_leaves_other_keys() {
    let mut cache = CacheAdjudicator::default();
    cache.set("keep", json!({"x": 1})).unwrap();
    cache.set("k1", json!("old")).unwrap();

    let mut other = HashMap::new();
    other.insert("k1", json!("v1"));
    other.insert("k2", json!("v2"));
    cache.update(other).unwrap();

    assert_eq!(cache.fetch("keep").unwrap(), json!({"x": 1}));
    assert_eq!(cache.fetch("k1").unwrap(), json!("v1"));
    assert_eq!(cache.fetch("k2").unwrap(), json!("v2"));
}

#[test]
fn test_fact_cache_copy() {
    let config = CacheConfig::builder().plugin("memory").build();
    let mut cache = FactCache::with_config(config).unwrap();

    cache.set("avocado", "fruit").unwrap();
    cache.set("daisy", "flower").unwrap();

    let expected: HashMap<String, CacheValue> = [
        ("avocado".to_string(), json!("fruit")),
        ("daisy".to_string(), json!("flower")),
    ]
    .into_iter()
    .collect();
    assert_eq!(cache.copy().unwrap(), expected);
}

#[test]
fn test_fact_cache_plugin_load_failure() {
    // no connection configured, so the file backend cannot start
    let config = CacheConfig::builder().plugin("jsonfile").build();
    let err = FactCache::with_config(config).unwrap_err();

    assert!(matches!(err, CacheError::FactCacheLoadError { .. }));
    let message = err.to_string();
    assert!(message.contains("Unable to load the facts cache plugin"));
    assert!(message.contains("jsonfile"));
}

#[test]
fn test_fact_cache_jsonfile_persists() {
    let tmp = TempDir::new().unwrap();
    let config = CacheConfig::builder()
        .plugin("jsonfile")
        .connection(tmp.path().to_string_lossy().to_string())
        .build();

    {
        let mut cache = FactCache::with_config(config.clone()).unwrap();
        cache.set("web01", json!({"os": "linux"})).unwrap();
        cache.first_order_merge("web01", json!({"cpus": 2})).unwrap();
    }

    let mut reopened = FactCache::with_config(config).unwrap();
    assert_eq!(
        reopened.fetch("web01").unwrap(),
        json!({"os": "linux", "cpus": 2})
    );

    reopened.flush().unwrap();
    assert!(reopened.is_empty().unwrap());
}

#[test]
fn test_custom_loader_backend() {
    let mut loader = BackendLoader::empty();
    loader.register("memory", |_config| Ok(Box::new(MemoryBackend::new())));

    let config = CacheConfig::builder().plugin("jsonfile").build();
    let err = FactCache::with_loader(loader, config).unwrap_err();
    match err {
        CacheError::FactCacheLoadError { backend, source } => {
            assert_eq!(backend, "jsonfile");
            assert!(matches!(*source, CacheError::UnknownBackendError(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}
