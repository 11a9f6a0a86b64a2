//! Memoization Module
//!
//! Wraps pure computations so repeated calls with the same arguments are
//! served from a [`GenericCache`]. A failed computation is never cached.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{EstimateSize, GenericCache};
use crate::error::{CacheError, Result};
use crate::hashing::sha256_hex;

/// Keys longer than this are replaced by their SHA-256 hex digest.
pub const MAX_PLAIN_KEY_LENGTH: usize = 100;

// == Memo Key ==
/// Derives a cache key from a function name and its arguments.
///
/// Arguments are rendered as JSON; maps serialize with sorted keys when they
/// are `BTreeMap`s or `serde_json` objects, which keeps the rendering stable.
pub fn memo_key<A>(function: &str, args: &A) -> Result<String>
where
    A: Serialize + ?Sized,
{
    let rendered = serde_json::to_string(args).map_err(|e| {
        CacheError::InvalidMemoKey(format!(
            "arguments of {} are not JSON-renderable: {}",
            function, e
        ))
    })?;

    let key = format!("{}:{}", function, rendered);
    if key.len() > MAX_PLAIN_KEY_LENGTH {
        Ok(sha256_hex(key))
    } else {
        Ok(key)
    }
}

impl<K, V> GenericCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone + EstimateSize,
{
    // == Get Or Try Insert ==
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// The lock is not held while `compute` runs. On `Err` nothing is stored
    /// and the error is returned unchanged.
    pub fn get_or_try_insert_with<E, F>(
        &self,
        key: K,
        ttl: Option<Duration>,
        compute: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let value = compute()?;
        self.set(key, value.clone(), ttl);
        Ok(value)
    }
}

// == Memoize ==
/// Runs `compute` through `cache`, keyed on `function` and `args`.
///
/// # Arguments
/// * `cache` - Cache holding memoized results
/// * `function` - Stable name identifying the computation
/// * `args` - Arguments that fully determine the result
/// * `ttl` - Optional TTL override for the stored result
/// * `compute` - The computation itself
pub fn memoize<V, A, E, F>(
    cache: &GenericCache<String, V>,
    function: &str,
    args: &A,
    ttl: Option<Duration>,
    compute: F,
) -> std::result::Result<V, E>
where
    V: Clone + EstimateSize,
    A: Serialize + ?Sized,
    E: From<CacheError>,
    F: FnOnce() -> std::result::Result<V, E>,
{
    let key = memo_key(function, args)?;
    cache.get_or_try_insert_with(key, ttl, compute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::EvictionPolicy;
    use std::cell::Cell;
    use std::collections::{BTreeMap, HashMap};

    fn cache() -> GenericCache<String, f64> {
        GenericCache::with_policy(16, EvictionPolicy::Lru).unwrap()
    }

    #[test]
    fn test_memo_key_short_is_readable() {
        let key = memo_key("nuclear_repulsion", &("h2o", 6)).unwrap();
        assert_eq!(key, "nuclear_repulsion:[\"h2o\",6]");
    }

    #[test]
    fn test_memo_key_long_is_hashed() {
        let args = vec![1.0f64; 64];
        let key = memo_key("overlap", &args).unwrap();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, memo_key("overlap", &args).unwrap());
    }

    #[test]
    fn test_memo_key_sorted_maps() {
        let mut a = BTreeMap::new();
        a.insert("maxiter", 100);
        a.insert("e_convergence", 8);
        let mut b = BTreeMap::new();
        b.insert("e_convergence", 8);
        b.insert("maxiter", 100);

        assert_eq!(memo_key("scf", &a).unwrap(), memo_key("scf", &b).unwrap());
    }

    #[test]
    fn test_memo_key_rejects_unrenderable_args() {
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple keys");
        assert!(matches!(
            memo_key("bad", &map),
            Err(CacheError::InvalidMemoKey(_))
        ));
    }

    #[test]
    fn test_get_or_try_insert_computes_once() {
        let cache = cache();
        let calls = Cell::new(0);
        let compute = || -> std::result::Result<f64, String> {
            calls.set(calls.get() + 1);
            Ok(-76.4)
        };

        assert_eq!(cache.get_or_try_insert_with("e".to_string(), None, compute), Ok(-76.4));
        assert_eq!(cache.get_or_try_insert_with("e".to_string(), None, compute), Ok(-76.4));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failed_computation_not_cached() {
        let cache = cache();
        let result: std::result::Result<f64, String> =
            cache.get_or_try_insert_with("e".to_string(), None, || Err("scf diverged".into()));

        assert_eq!(result, Err("scf diverged".to_string()));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_memoize_distinguishes_arguments() {
        let cache = cache();
        let square = |x: f64| memoize(&cache, "square", &x, None, || Ok::<_, CacheError>(x * x));

        assert_eq!(square(3.0), Ok(9.0));
        assert_eq!(square(4.0), Ok(16.0));
        assert_eq!(square(3.0), Ok(9.0));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().hits, 1);
    }
}
