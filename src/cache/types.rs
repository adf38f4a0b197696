//! Core type definitions for the cache system

use std::collections::HashMap;

/// Cache key type - facts are keyed by host or scope name
pub type CacheKey = String;

/// Cache value type - arbitrary nested mappings, sequences and scalars.
///
/// `Clone` on a [`serde_json::Value`] is recursive, so a cloned value shares
/// nothing with the original.
pub type CacheValue = serde_json::Value;

/// Owned snapshot of a whole backend
pub type CacheMap = HashMap<CacheKey, CacheValue>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_clone_is_deep() {
        let original: CacheValue = json!({"interfaces": [{"name": "eth0"}]});
        let mut copy = original.clone();
        copy["interfaces"][0]["name"] = json!("eth1");

        assert_eq!(original["interfaces"][0]["name"], "eth0");
        assert_eq!(copy["interfaces"][0]["name"], "eth1");
    }
}
