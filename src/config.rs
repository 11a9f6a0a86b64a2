//! Configuration Module
//!
//! Capacity, expiry and statistics settings for the three stores, loadable
//! from environment variables or deserialized from a host config file.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::EvictionPolicy;
use crate::error::{CacheError, Result};

// == Defaults ==
/// Default capacity of the generic cache and the molecule index.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;
/// Default capacity of the result store.
pub const DEFAULT_RESULT_MAX_ENTRIES: usize = 500;
/// Default TTL of the generic cache in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 3600;
/// Default number of decimals kept when hashing coordinates.
pub const DEFAULT_HASH_PRECISION: u32 = 6;
/// Largest accepted hash precision; beyond this f64 rounding stops being meaningful.
pub const MAX_HASH_PRECISION: u32 = 12;

// == Generic Cache Config ==
/// Configuration of a [`GenericCache`](crate::cache::GenericCache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries before eviction kicks in
    pub max_entries: usize,
    /// TTL applied when `set` is called without one; `None` disables expiry
    pub default_ttl_seconds: Option<u64>,
    /// Victim selection rule
    pub eviction_policy: EvictionPolicy,
    /// Whether hit/miss/eviction counters are maintained
    pub enable_stats: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl_seconds: Some(DEFAULT_TTL_SECONDS),
            eviction_policy: EvictionPolicy::Lru,
            enable_stats: true,
        }
    }
}

impl CacheConfig {
    /// Loads the configuration from `CACHE_*` environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds, or `none` (default: 3600)
    /// - `CACHE_EVICTION_POLICY` - `lru`, `lfu`, `fifo` or `ttl` (default: lru)
    /// - `CACHE_ENABLE_STATS` - `true`/`false` (default: true)
    pub fn from_env() -> Result<Self> {
        Self::from_env_prefixed("CACHE")
    }

    /// Same as [`CacheConfig::from_env`] with a custom variable prefix.
    pub fn from_env_prefixed(prefix: &str) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            max_entries: env_value(&var_name(prefix, "MAX_ENTRIES"))?
                .unwrap_or(defaults.max_entries),
            default_ttl_seconds: env_ttl(&var_name(prefix, "DEFAULT_TTL"))?
                .unwrap_or(defaults.default_ttl_seconds),
            eviction_policy: env_value(&var_name(prefix, "EVICTION_POLICY"))?
                .unwrap_or(defaults.eviction_policy),
            enable_stats: env_flag(&var_name(prefix, "ENABLE_STATS"))?
                .unwrap_or(defaults.enable_stats),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would break the capacity invariant.
    pub fn validate(&self) -> Result<()> {
        validate_capacity(self.max_entries)
    }

    /// Default TTL as a `Duration`.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl_seconds.map(Duration::from_secs)
    }
}

// == Specialized Store Config ==
/// Configuration of a [`MoleculeIndex`](crate::molecule::MoleculeIndex) or
/// [`ResultStore`](crate::results::ResultStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of records before the oldest is evicted
    pub max_entries: usize,
    /// Expiry for records; `None` keeps records until evicted or deleted
    pub default_ttl_seconds: Option<u64>,
    /// Whether hit/miss/eviction counters are maintained
    pub enable_stats: bool,
    /// Decimal places kept when hashing coordinates.
    ///
    /// A molecule index and a result store only agree on molecule hashes
    /// when they use the same value here, so feeding
    /// [`MoleculeRecord::hash`](crate::molecule::MoleculeRecord) into
    /// `ResultStore::invalidate_by_molecule` requires matching precisions.
    /// Both default to 6, and `MOLECULE_CACHE_HASH_PRECISION` and
    /// `RESULT_CACHE_HASH_PRECISION` should be set together.
    pub hash_precision: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::molecules()
    }
}

impl StoreConfig {
    /// Defaults for a molecule index.
    pub fn molecules() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl_seconds: None,
            enable_stats: true,
            hash_precision: DEFAULT_HASH_PRECISION,
        }
    }

    /// Defaults for a result store.
    pub fn results() -> Self {
        Self {
            max_entries: DEFAULT_RESULT_MAX_ENTRIES,
            ..Self::molecules()
        }
    }

    /// Overrides the capacity.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Loads `{prefix}_*` variables on top of `base`.
    ///
    /// # Environment Variables
    /// - `{prefix}_MAX_ENTRIES`
    /// - `{prefix}_DEFAULT_TTL` - seconds, or `none`
    /// - `{prefix}_ENABLE_STATS`
    /// - `{prefix}_HASH_PRECISION`
    pub fn from_env_prefixed(prefix: &str, base: StoreConfig) -> Result<Self> {
        let config = Self {
            max_entries: env_value(&var_name(prefix, "MAX_ENTRIES"))?
                .unwrap_or(base.max_entries),
            default_ttl_seconds: env_ttl(&var_name(prefix, "DEFAULT_TTL"))?
                .unwrap_or(base.default_ttl_seconds),
            enable_stats: env_flag(&var_name(prefix, "ENABLE_STATS"))?
                .unwrap_or(base.enable_stats),
            hash_precision: env_value(&var_name(prefix, "HASH_PRECISION"))?
                .unwrap_or(base.hash_precision),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads a molecule-index configuration from `MOLECULE_CACHE_*`.
    pub fn molecules_from_env() -> Result<Self> {
        Self::from_env_prefixed("MOLECULE_CACHE", Self::molecules())
    }

    /// Loads a result-store configuration from `RESULT_CACHE_*`.
    pub fn results_from_env() -> Result<Self> {
        Self::from_env_prefixed("RESULT_CACHE", Self::results())
    }

    /// Rejects zero capacity and unusable hash precision.
    pub fn validate(&self) -> Result<()> {
        validate_capacity(self.max_entries)?;
        if self.hash_precision > MAX_HASH_PRECISION {
            return Err(CacheError::InvalidConfig(format!(
                "hash_precision must be at most {}, got {}",
                MAX_HASH_PRECISION, self.hash_precision
            )));
        }
        Ok(())
    }

    /// Record TTL as a `Duration`.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl_seconds.map(Duration::from_secs)
    }
}

// == Helpers ==
fn validate_capacity(max_entries: usize) -> Result<()> {
    if max_entries == 0 {
        return Err(CacheError::InvalidConfig(
            "max_entries must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn var_name(prefix: &str, suffix: &str) -> String {
    format!("{}_{}", prefix, suffix)
}

fn env_value<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CacheError::InvalidConfig(format!("{}={:?}: {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}

/// `Some(None)` when the variable explicitly disables expiry.
fn env_ttl(name: &str) -> Result<Option<Option<u64>>> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("none") => {
            Ok(Some(None))
        }
        Ok(_) => env_value::<u64>(name).map(|v| v.map(Some)),
        Err(_) => Ok(None),
    }
}

fn env_flag(name: &str) -> Result<Option<bool>> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(CacheError::InvalidConfig(format!(
                "{}={:?}: expected a boolean",
                name, raw
            ))),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl_seconds, Some(3600));
        assert_eq!(config.eviction_policy, EvictionPolicy::Lru);
        assert!(config.enable_stats);
        assert_eq!(config.default_ttl(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_store_config_defaults() {
        let molecules = StoreConfig::molecules();
        assert_eq!(molecules.max_entries, 1000);
        assert_eq!(molecules.default_ttl_seconds, None);
        assert_eq!(molecules.hash_precision, 6);

        let results = StoreConfig::results();
        assert_eq!(results.max_entries, 500);
        assert_eq!(results.default_ttl(), None);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = CacheConfig {
            max_entries: 0,
            ..CacheConfig::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
        assert!(StoreConfig::results().with_max_entries(0).validate().is_err());
    }

    #[test]
    fn test_hash_precision_rejected() {
        let config = StoreConfig {
            hash_precision: 20,
            ..StoreConfig::molecules()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_cache_config_from_env_defaults() {
        let config = CacheConfig::from_env_prefixed("QCC_TEST_UNSET").unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_cache_config_from_env_values() {
        env::set_var("QCC_TEST_VALUES_MAX_ENTRIES", "42");
        env::set_var("QCC_TEST_VALUES_DEFAULT_TTL", "none");
        env::set_var("QCC_TEST_VALUES_EVICTION_POLICY", "lfu");
        env::set_var("QCC_TEST_VALUES_ENABLE_STATS", "false");

        let config = CacheConfig::from_env_prefixed("QCC_TEST_VALUES").unwrap();
        assert_eq!(config.max_entries, 42);
        assert_eq!(config.default_ttl_seconds, None);
        assert_eq!(config.eviction_policy, EvictionPolicy::Lfu);
        assert!(!config.enable_stats);
    }

    #[test]
    fn test_negative_capacity_from_env_is_error() {
        env::set_var("QCC_TEST_NEGATIVE_MAX_ENTRIES", "-5");
        let result = CacheConfig::from_env_prefixed("QCC_TEST_NEGATIVE");
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_store_config_from_env() {
        env::set_var("QCC_TEST_STORE_HASH_PRECISION", "4");
        env::set_var("QCC_TEST_STORE_DEFAULT_TTL", "120");

        let config =
            StoreConfig::from_env_prefixed("QCC_TEST_STORE", StoreConfig::results()).unwrap();
        assert_eq!(config.max_entries, 500);
        assert_eq!(config.hash_precision, 4);
        assert_eq!(config.default_ttl_seconds, Some(120));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: CacheConfig =
            serde_json::from_str(r#"{"max_entries": 10, "eviction_policy": "fifo"}"#).unwrap();
        assert_eq!(config.max_entries, 10);
        assert_eq!(config.eviction_policy, EvictionPolicy::Fifo);
        assert_eq!(config.default_ttl_seconds, Some(3600));
    }
}
