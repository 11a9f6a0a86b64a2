//! Cache Entry Module
//!
//! Defines a single cache entry with the bookkeeping the eviction policies need.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value together with its access metadata.
///
/// `inserted_seq` and `accessed_seq` are ticks of a per-cache counter; they
/// give every entry a unique position so policy comparisons never tie on
/// timestamps taken within the same clock resolution.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// Key the entry is stored under
    pub key: K,
    /// The stored value
    pub value: V,
    /// When the entry was inserted (or last replaced)
    pub created_at: Instant,
    /// When the entry was last read through `get`
    pub last_accessed: Instant,
    /// Number of successful `get` calls
    pub access_count: u64,
    /// Lifetime of the entry, None = no expiration
    pub ttl: Option<Duration>,
    /// Estimated size of the value, informational only
    pub size_bytes: usize,
    pub(crate) inserted_seq: u64,
    pub(crate) accessed_seq: u64,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a fresh entry.
    ///
    /// # Arguments
    /// * `key` - Key the entry is stored under
    /// * `value` - The value to store
    /// * `ttl` - Optional lifetime
    /// * `size_bytes` - Estimated value size
    /// * `seq` - Current tick of the owning cache
    pub fn new(key: K, value: V, ttl: Option<Duration>, size_bytes: usize, seq: u64) -> Self {
        let now = Instant::now();
        Self {
            key,
            value,
            created_at: now,
            last_accessed: now,
            access_count: 0,
            ttl,
            size_bytes,
            inserted_seq: seq,
            accessed_seq: seq,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired.
    ///
    /// Boundary condition: the entry is expired once `now >= created_at + ttl`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against an explicit instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at() {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Instant at which the entry expires, if it has a TTL.
    ///
    /// A TTL too large to represent is treated as no expiry.
    pub fn expires_at(&self) -> Option<Instant> {
        self.ttl.and_then(|ttl| self.created_at.checked_add(ttl))
    }

    // == Age ==
    /// Time elapsed since the entry was created.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Time To Live ==
    /// Remaining lifetime, `Some(ZERO)` once expired, None without a TTL.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at()
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }

    // == Touch ==
    /// Records a read: bumps recency and the access counter.
    pub fn touch(&mut self, seq: u64) {
        self.last_accessed = Instant::now();
        self.accessed_seq = seq;
        self.access_count += 1;
    }
}
