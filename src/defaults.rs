//! Process-wide default instances
//!
//! One lazily built instance per store type for callers that do not wire up
//! their own. Each is configured from the environment on first use and falls
//! back to the built-in defaults if that configuration is invalid.
//! Independently constructed stores are unaffected by anything here.

use std::sync::OnceLock;

use serde_json::Value;
use tracing::warn;

use crate::cache::GenericCache;
use crate::config::{CacheConfig, StoreConfig};
use crate::molecule::MoleculeIndex;
use crate::results::ResultStore;

/// Value type of the default generic cache.
pub type DefaultCache = GenericCache<String, Value>;

static DEFAULT_CACHE: OnceLock<DefaultCache> = OnceLock::new();
static MOLECULE_INDEX: OnceLock<MoleculeIndex> = OnceLock::new();
static RESULT_STORE: OnceLock<ResultStore> = OnceLock::new();

/// The process-wide generic cache, configured from `CACHE_*`.
pub fn default_cache() -> &'static DefaultCache {
    DEFAULT_CACHE.get_or_init(|| {
        CacheConfig::from_env()
            .and_then(GenericCache::new)
            .unwrap_or_else(|e| {
                warn!(error = %e, "invalid default cache configuration, using defaults");
                GenericCache::default()
            })
    })
}

/// The process-wide molecule index, configured from `MOLECULE_CACHE_*`.
pub fn molecule_index() -> &'static MoleculeIndex {
    MOLECULE_INDEX.get_or_init(|| {
        StoreConfig::molecules_from_env()
            .and_then(MoleculeIndex::new)
            .unwrap_or_else(|e| {
                warn!(error = %e, "invalid molecule index configuration, using defaults");
                MoleculeIndex::default()
            })
    })
}

/// The process-wide result store, configured from `RESULT_CACHE_*`.
pub fn result_store() -> &'static ResultStore {
    RESULT_STORE.get_or_init(|| {
        StoreConfig::results_from_env()
            .and_then(ResultStore::new)
            .unwrap_or_else(|e| {
                warn!(error = %e, "invalid result store configuration, using defaults");
                ResultStore::default()
            })
    })
}

/// Empties every default instance that has been created and zeroes its
/// counters. Intended for test harnesses.
pub fn reset_defaults() {
    if let Some(cache) = DEFAULT_CACHE.get() {
        cache.reset();
    }
    if let Some(index) = MOLECULE_INDEX.get() {
        index.reset();
    }
    if let Some(store) = RESULT_STORE.get() {
        store.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_singletons_and_reset() {
        let first = default_cache() as *const DefaultCache;
        let second = default_cache() as *const DefaultCache;
        assert_eq!(first, second);

        default_cache().set("defaults-test".to_string(), json!(1), None);
        assert_eq!(molecule_index().config().max_entries, 1000);
        assert_eq!(result_store().config().max_entries, 500);

        reset_defaults();
        assert!(!default_cache().contains("defaults-test"));
        assert_eq!(default_cache().stats().hits, 0);
    }
}
