//! Cache Module
//!
//! Generic in-memory caching with TTL expiration and pluggable eviction.

mod entry;
mod memo;
mod policy;
mod size;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use memo::{memo_key, memoize, MAX_PLAIN_KEY_LENGTH};
pub use policy::EvictionPolicy;
pub use size::{EstimateSize, FALLBACK_SIZE, PRIMITIVE_SIZE};
pub use stats::{CacheStats, Counters};
pub use store::GenericCache;
