//! Eviction Policy Module
//!
//! Selects which entry a full cache gives up to make room for a new one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Eviction Policy ==
/// Rule used to pick the victim when a cache is at capacity.
///
/// Fixed for the lifetime of a cache instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least recently used: smallest last-access tick
    #[default]
    Lru,
    /// Least frequently used: smallest access count, oldest insertion on ties
    Lfu,
    /// First in, first out: smallest insertion tick
    Fifo,
    /// First expired entry in insertion order, otherwise LRU
    Ttl,
}

impl EvictionPolicy {
    /// Lower-case tag used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
            EvictionPolicy::Fifo => "fifo",
            EvictionPolicy::Ttl => "ttl",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            "fifo" => Ok(EvictionPolicy::Fifo),
            "ttl" => Ok(EvictionPolicy::Ttl),
            other => Err(CacheError::InvalidPolicy(other.to_string())),
        }
    }
}
