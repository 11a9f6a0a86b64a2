//! QChem Cache - In-memory caching for quantum chemistry workloads
//!
//! Provides a generic TTL cache with pluggable eviction, a deduplicating
//! molecule index and a calculation result store with bulk invalidation.

use std::collections::BTreeMap;

pub mod cache;
pub mod config;
pub mod defaults;
pub mod error;
pub mod geometry;
pub mod hashing;
pub mod molecule;
pub mod results;
pub mod tasks;

/// Free-form annotations attached to stored records.
pub type Metadata = BTreeMap<String, serde_json::Value>;

pub use cache::{memo_key, memoize, CacheStats, EvictionPolicy, GenericCache};
pub use config::{CacheConfig, StoreConfig};
pub use defaults::{default_cache, molecule_index, reset_defaults, result_store};
pub use error::{CacheError, Result};
pub use geometry::{compare_geometries, Atom, Molecule};
pub use molecule::{MoleculeIndex, MoleculeRecord};
pub use results::{CalculationKey, CalculationType, InvalidationFilter, ResultRecord, ResultStore};
pub use tasks::{spawn_purge_task, PurgeExpired};
