//! Expiry Purge Task
//!
//! Background task that periodically removes expired entries from a shared
//! store. Expiry is otherwise only noticed lazily, on read.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{EstimateSize, GenericCache};
use crate::molecule::MoleculeIndex;
use crate::results::ResultStore;

// == Purge Expired ==
/// A store that can drop its expired entries in one sweep.
pub trait PurgeExpired {
    /// Removes expired entries, returning how many were dropped.
    fn purge_expired(&self) -> usize;
}

impl<K, V> PurgeExpired for GenericCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone + EstimateSize,
{
    fn purge_expired(&self) -> usize {
        GenericCache::purge_expired(self)
    }
}

impl PurgeExpired for MoleculeIndex {
    fn purge_expired(&self) -> usize {
        MoleculeIndex::purge_expired(self)
    }
}

impl PurgeExpired for ResultStore {
    fn purge_expired(&self) -> usize {
        ResultStore::purge_expired(self)
    }
}

/// Spawns a task that purges `store` every `interval`.
///
/// Must be called from within a Tokio runtime. The store lock is taken
/// synchronously for the duration of each sweep and never held across an
/// await point.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort it.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(GenericCache::<String, f64>::default());
/// let handle = spawn_purge_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_purge_task<S>(store: Arc<S>, interval: Duration) -> JoinHandle<()>
where
    S: PurgeExpired + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "starting expiry purge task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired();
            if removed > 0 {
                info!(removed, "expiry purge removed entries");
            } else {
                debug!("expiry purge found nothing to remove");
            }
        }
    })
}
