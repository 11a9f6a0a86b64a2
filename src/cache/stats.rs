//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Counters ==
/// Hit/miss/eviction counters shared by every store.
///
/// When disabled the record methods are no-ops and the counters stay at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Successful lookups
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed to make room for new ones
    pub evictions: u64,
    #[serde(skip)]
    enabled: bool,
}

impl Counters {
    /// Creates zeroed counters.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Whether counting is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        if self.enabled {
            self.hits += 1;
        }
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        if self.enabled {
            self.misses += 1;
        }
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        if self.enabled {
            self.evictions += 1;
        }
    }

    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    /// Zeroes the counters, keeping the enabled flag.
    pub fn reset(&mut self) {
        *self = Self::new(self.enabled);
    }
}

// == Cache Stats ==
/// Snapshot of a generic cache's metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted by the eviction policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub current_entries: usize,
    /// Sum of the estimated sizes of all stored values
    pub total_size_bytes: usize,
    /// hits / (hits + misses), 0.0 when there were no lookups
    pub hit_rate: f64,
}

impl CacheStats {
    // == Constructor ==
    /// Builds a snapshot from counters and current occupancy.
    pub fn new(counters: &Counters, current_entries: usize, total_size_bytes: usize) -> Self {
        Self {
            hits: counters.hits,
            misses: counters.misses,
            evictions: counters.evictions,
            current_entries,
            total_size_bytes,
            hit_rate: counters.hit_rate(),
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let counters = Counters::new(true);
        assert_eq!(counters.hits, 0);
        assert_eq!(counters.misses, 0);
        assert_eq!(counters.evictions, 0);
        assert!(counters.is_enabled());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let counters = Counters::new(true);
        assert_eq!(counters.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut counters = Counters::new(true);
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        assert_eq!(counters.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut counters = Counters::new(true);
        counters.record_hit();
        counters.record_miss();
        counters.record_miss();
        counters.record_miss();
        assert_eq!(counters.hit_rate(), 0.25);
    }

    #[test]
    fn test_disabled_counters_stay_zero() {
        let mut counters = Counters::new(false);
        counters.record_hit();
        counters.record_miss();
        counters.record_eviction();
        assert_eq!(counters, Counters::new(false));
    }

    #[test]
    fn test_reset_keeps_flag() {
        let mut counters = Counters::new(true);
        counters.record_eviction();
        counters.reset();
        assert_eq!(counters.evictions, 0);
        assert!(counters.is_enabled());
    }

    #[test]
    fn test_stats_snapshot() {
        let mut counters = Counters::new(true);
        counters.record_hit();
        counters.record_miss();
        let stats = CacheStats::new(&counters, 3, 120);

        assert_eq!(stats.current_entries, 3);
        assert_eq!(stats.total_size_bytes, 120);
        assert_eq!(stats.hit_rate, 0.5);
        assert_eq!(stats.hit_rate(), 0.5);
    }
}
