//! Cache Store Module
//!
//! Generic keyed cache combining HashMap storage with policy-driven eviction
//! and lazy TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Counters, EstimateSize, EvictionPolicy};
use crate::config::CacheConfig;
use crate::error::Result;

// == Generic Cache ==
/// Size-bounded key/value cache with TTL expiry and a fixed eviction policy.
///
/// Every operation holds the internal lock for its full extent, so eviction
/// and insertion in `set` are atomic with respect to other callers. Values are
/// returned as clones; callers never get a reference into the cache.
#[derive(Debug)]
pub struct GenericCache<K, V> {
    config: CacheConfig,
    state: Mutex<CacheState<K, V>>,
}

#[derive(Debug)]
struct CacheState<K, V> {
    entries: HashMap<K, CacheEntry<K, V>>,
    counters: Counters,
    total_size_bytes: usize,
    /// Logical clock ordering insertions and accesses
    tick: u64,
}

impl<K, V> CacheState<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.remove(key)?;
        self.total_size_bytes = self.total_size_bytes.saturating_sub(entry.size_bytes);
        Some(entry)
    }

    // == Select Victim ==
    /// Picks the entry the policy gives up. Ticks are unique, so the choice
    /// never depends on HashMap iteration order.
    fn select_victim(&self, policy: EvictionPolicy, now: Instant) -> Option<K> {
        let least_recent = || self.entries.values().min_by_key(|e| e.accessed_seq);

        let victim = match policy {
            EvictionPolicy::Lru => least_recent(),
            EvictionPolicy::Lfu => self
                .entries
                .values()
                .min_by_key(|e| (e.access_count, e.inserted_seq)),
            EvictionPolicy::Fifo => self.entries.values().min_by_key(|e| e.inserted_seq),
            EvictionPolicy::Ttl => self
                .entries
                .values()
                .filter(|e| e.is_expired_at(now))
                .min_by_key(|e| e.inserted_seq)
                .or_else(least_recent),
        };

        victim.map(|e| e.key.clone())
    }

    fn evict_one(&mut self, policy: EvictionPolicy) {
        if let Some(key) = self.select_victim(policy, Instant::now()) {
            self.remove(&key);
            self.counters.record_eviction();
            debug!(?key, %policy, "evicted cache entry");
        }
    }
}

impl<K, V> GenericCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone + EstimateSize,
{
    // == Constructor ==
    /// Creates a cache from a validated configuration.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: CacheConfig) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                counters: Counters::new(config.enable_stats),
                total_size_bytes: 0,
                tick: 0,
            }),
            config,
        }
    }

    /// Shorthand for a cache with the given capacity and policy, other
    /// settings at their defaults.
    pub fn with_policy(max_entries: usize, eviction_policy: EvictionPolicy) -> Result<Self> {
        Self::new(CacheConfig {
            max_entries,
            eviction_policy,
            ..CacheConfig::default()
        })
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let expired = match state.entries.get(key) {
            Some(entry) => entry.is_expired_at(Instant::now()),
            None => {
                state.counters.record_miss();
                trace!(?key, "cache miss");
                return None;
            }
        };

        if expired {
            state.remove(key);
            state.counters.record_miss();
            debug!(?key, "removed expired cache entry on read");
            return None;
        }

        let tick = state.next_tick();
        let entry = state.entries.get_mut(key)?;
        entry.touch(tick);
        let value = entry.value.clone();
        state.counters.record_hit();
        trace!(?key, "cache hit");
        Some(value)
    }

    // == Set ==
    /// Stores `value` under `key`, fully replacing any existing entry.
    ///
    /// `ttl` falls back to the configured default. Inserting a new key into a
    /// full cache evicts exactly one entry first; replacing an existing key
    /// never evicts.
    pub fn set(&self, key: K, value: V, ttl: Option<Duration>) {
        let ttl = ttl.or_else(|| self.config.default_ttl());
        let size_bytes = value.estimated_size();

        let mut guard = self.state.lock();
        let state = &mut *guard;

        if state.remove(&key).is_none() && state.entries.len() >= self.config.max_entries {
            state.evict_one(self.config.eviction_policy);
        }

        let tick = state.next_tick();
        state.total_size_bytes += size_bytes;
        state
            .entries
            .insert(key.clone(), CacheEntry::new(key, value, ttl, size_bytes, tick));
    }

    // == Delete ==
    /// Removes an entry. Returns false if the key was not present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.lock().remove(key).is_some()
    }

    // == Contains ==
    /// Checks for a live entry without touching statistics or recency.
    ///
    /// An expired entry is removed, as with `get`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.state.lock();
        match state.entries.get(key).map(|e| e.is_expired()) {
            Some(false) => true,
            Some(true) => {
                state.remove(key);
                false
            }
            None => false,
        }
    }

    // == Clear ==
    /// Drops every entry. Hit/miss/eviction counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.total_size_bytes = 0;
    }

    /// Drops every entry and zeroes the counters.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.total_size_bytes = 0;
        state.counters.reset();
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats::new(&state.counters, state.entries.len(), state.total_size_bytes)
    }

    // == Keys ==
    /// Keys of live entries in insertion order.
    pub fn keys(&self) -> Vec<K> {
        let state = self.state.lock();
        let now = Instant::now();
        let mut live: Vec<_> = state
            .entries
            .values()
            .filter(|e| !e.is_expired_at(now))
            .map(|e| (e.inserted_seq, e.key.clone()))
            .collect();
        live.sort_by_key(|(seq, _)| *seq);
        live.into_iter().map(|(_, key)| key).collect()
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let mut state = self.state.lock();
        let now = Instant::now();
        let expired: Vec<K> = state
            .entries
            .values()
            .filter(|e| e.is_expired_at(now))
            .map(|e| e.key.clone())
            .collect();

        for key in &expired {
            state.remove(key);
        }
        expired.len()
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

impl<K, V> Default for GenericCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone + EstimateSize,
{
    fn default() -> Self {
        Self::from_valid(CacheConfig::default())
    }
}
