//! Result Store Module
//!
//! Memoizes calculation outputs under a composite key, with method and
//! calculation-type indices for bulk invalidation.
//!
//! The secondary indices are eventually consistent: an explicit delete or
//! invalidation does not prune them, so every read through an index skips
//! hashes that are no longer in the primary map. Evictions and expiry do
//! prune, which keeps the buckets bounded by the store's capacity plus
//! whatever explicit deletes left behind.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, trace};

use crate::cache::Counters;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::geometry::Molecule;
use crate::results::{
    CalcOptions, CalculationKey, CalculationType, InvalidationFilter, ResultRecord,
    ResultStoreStats,
};
use crate::Metadata;

// == Result Store ==
/// Capacity-bounded store of calculation results.
#[derive(Debug)]
pub struct ResultStore {
    config: StoreConfig,
    state: Mutex<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    records: HashMap<String, Slot>,
    by_method: HashMap<String, Vec<String>>,
    by_type: HashMap<CalculationType, Vec<String>>,
    counters: Counters,
    tick: u64,
}

#[derive(Debug)]
struct Slot {
    record: Arc<ResultRecord>,
    seq: u64,
    inserted: Instant,
}

fn push_unique(bucket: &mut Vec<String>, key_hash: &str) {
    if !bucket.iter().any(|h| h == key_hash) {
        bucket.push(key_hash.to_string());
    }
}

impl StoreState {
    fn is_expired(slot: &Slot, ttl: Option<Duration>, now: Instant) -> bool {
        ttl.and_then(|ttl| slot.inserted.checked_add(ttl))
            .is_some_and(|expires| now >= expires)
    }

    /// Primary-map removal only; indices keep the stale hash.
    fn remove(&mut self, key_hash: &str) -> bool {
        self.records.remove(key_hash).is_some()
    }

    /// Removal that also drops the hash from its method and type buckets.
    /// Used for evictions and expiry, which callers never see coming.
    fn remove_indexed(&mut self, key_hash: &str) -> bool {
        let Some(slot) = self.records.remove(key_hash) else {
            return false;
        };
        let key = &slot.record.key;
        if let Some(bucket) = self.by_method.get_mut(&key.method) {
            bucket.retain(|h| h != key_hash);
            if bucket.is_empty() {
                self.by_method.remove(&key.method);
            }
        }
        if let Some(bucket) = self.by_type.get_mut(&key.calculation_type) {
            bucket.retain(|h| h != key_hash);
            if bucket.is_empty() {
                self.by_type.remove(&key.calculation_type);
            }
        }
        true
    }

    fn live(&mut self, key_hash: &str, ttl: Option<Duration>) -> Option<Arc<ResultRecord>> {
        let expired = Self::is_expired(self.records.get(key_hash)?, ttl, Instant::now());
        if expired {
            self.remove_indexed(key_hash);
            debug!(key_hash, "removed expired result");
            return None;
        }
        self.records.get(key_hash).map(|slot| Arc::clone(&slot.record))
    }

    fn live_from(&mut self, hashes: &[String], ttl: Option<Duration>) -> Vec<Arc<ResultRecord>> {
        hashes.iter().filter_map(|h| self.live(h, ttl)).collect()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .records
            .iter()
            .min_by_key(|(_, slot)| slot.seq)
            .map(|(hash, _)| hash.clone());

        if let Some(key_hash) = oldest {
            self.remove_indexed(&key_hash);
            self.counters.record_eviction();
            debug!(%key_hash, "evicted oldest result");
        }
    }

    fn delete_all(&mut self, hashes: &[String]) -> usize {
        hashes.iter().filter(|h| self.remove(h)).count()
    }

    fn invalidate_molecule(&mut self, molecule_hash: &str) -> usize {
        let doomed: Vec<String> = self
            .records
            .iter()
            .filter(|(_, slot)| slot.record.key.molecule_hash == molecule_hash)
            .map(|(hash, _)| hash.clone())
            .collect();
        self.delete_all(&doomed)
    }

    fn invalidate_method(&mut self, method: &str) -> usize {
        let bucket = self.by_method.remove(method).unwrap_or_default();
        self.delete_all(&bucket)
    }

    fn invalidate_type(&mut self, calculation_type: CalculationType) -> usize {
        let bucket = self.by_type.remove(&calculation_type).unwrap_or_default();
        self.delete_all(&bucket)
    }
}

impl ResultStore {
    // == Constructor ==
    /// Creates a store from a validated configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: StoreConfig) -> Self {
        Self {
            state: Mutex::new(StoreState {
                records: HashMap::new(),
                by_method: HashMap::new(),
                by_type: HashMap::new(),
                counters: Counters::new(config.enable_stats),
                tick: 0,
            }),
            config,
        }
    }

    /// Store with the given capacity and default settings otherwise.
    pub fn with_capacity(max_entries: usize) -> Result<Self> {
        Self::new(StoreConfig::results().with_max_entries(max_entries))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // == Build Key ==
    /// Builds a key using this store's hash precision. The molecule hash
    /// matches a `MoleculeIndex` hash only when both precisions agree.
    ///
    /// # Arguments
    /// * `calculation_type` - What was computed
    /// * `molecule` - Geometry with charge and multiplicity
    /// * `method` / `basis` - Level of theory, case-insensitive
    /// * `reference` - Reference wavefunction, `rhf` when None
    /// * `options` - Engine options; None and empty are equivalent
    pub fn build_key(
        &self,
        calculation_type: CalculationType,
        molecule: &Molecule,
        method: &str,
        basis: &str,
        reference: Option<&str>,
        options: Option<&CalcOptions>,
    ) -> CalculationKey {
        let mut builder = CalculationKey::builder(calculation_type, molecule, method, basis)
            .precision(self.config.hash_precision);
        if let Some(reference) = reference {
            builder = builder.reference(reference);
        }
        if let Some(options) = options {
            builder = builder.options(options);
        }
        builder.build()
    }

    // == Get ==
    /// Cached result for `key`, if present and unexpired.
    pub fn get(&self, key: &CalculationKey) -> Option<Arc<ResultRecord>> {
        self.get_by_hash(&key.key_hash())
    }

    /// Cached result by precomputed key hash.
    pub fn get_by_hash(&self, key_hash: &str) -> Option<Arc<ResultRecord>> {
        let mut state = self.state.lock();
        let found = state.live(key_hash, self.config.default_ttl());
        match found {
            Some(_) => {
                state.counters.record_hit();
                trace!(key_hash, "result cache hit");
            }
            None => {
                state.counters.record_miss();
                trace!(key_hash, "result cache miss");
            }
        }
        found
    }

    // == Set ==
    /// Stores a result, replacing any previous one under the same key.
    ///
    /// # Arguments
    /// * `key` - Calculation identity
    /// * `result` - Engine output
    /// * `computation_time` - Wall-clock time the engine took
    /// * `engine_version` - Version tag of the engine
    /// * `metadata` - Free-form annotations
    pub fn set(
        &self,
        key: &CalculationKey,
        result: Value,
        computation_time: Duration,
        engine_version: &str,
        metadata: Option<Metadata>,
    ) -> Arc<ResultRecord> {
        let key_hash = key.key_hash();
        let record = Arc::new(ResultRecord {
            key: key.clone(),
            key_hash: key_hash.clone(),
            result,
            created_at: Utc::now(),
            computation_time_seconds: computation_time.as_secs_f64(),
            engine_version: engine_version.to_string(),
            metadata: metadata.unwrap_or_default(),
        });

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if !state.records.contains_key(&key_hash) && state.records.len() >= self.config.max_entries
        {
            state.evict_oldest();
        }

        state.tick += 1;
        state.records.insert(
            key_hash.clone(),
            Slot {
                record: Arc::clone(&record),
                seq: state.tick,
                inserted: Instant::now(),
            },
        );
        push_unique(state.by_method.entry(key.method.clone()).or_default(), &key_hash);
        push_unique(state.by_type.entry(key.calculation_type).or_default(), &key_hash);

        record
    }

    // == Get Or Compute ==
    /// Returns the cached result for `key` or runs `compute`, timing it and
    /// storing its output. An `Err` is returned unchanged and nothing is stored.
    pub fn get_or_compute<E, F>(
        &self,
        key: &CalculationKey,
        engine_version: &str,
        compute: F,
    ) -> std::result::Result<Arc<ResultRecord>, E>
    where
        F: FnOnce() -> std::result::Result<Value, E>,
    {
        if let Some(record) = self.get(key) {
            return Ok(record);
        }

        let started = Instant::now();
        let result = compute()?;
        Ok(self.set(key, result, started.elapsed(), engine_version, None))
    }

    // == Delete ==
    /// Removes the result for `key`. Secondary indices are left as they are.
    pub fn delete(&self, key: &CalculationKey) -> bool {
        self.delete_by_hash(&key.key_hash())
    }

    pub fn delete_by_hash(&self, key_hash: &str) -> bool {
        self.state.lock().remove(key_hash)
    }

    // == Invalidation ==
    /// Deletes every result computed on the given molecule. Scans the store.
    pub fn invalidate_by_molecule(&self, molecule_hash: &str) -> usize {
        let count = self.state.lock().invalidate_molecule(molecule_hash);
        info!(molecule_hash, count, "invalidated results by molecule");
        count
    }

    /// Deletes every result computed with `method` (case-insensitive).
    pub fn invalidate_by_method(&self, method: &str) -> usize {
        let method = method.trim().to_lowercase();
        let count = self.state.lock().invalidate_method(&method);
        info!(%method, count, "invalidated results by method");
        count
    }

    /// Deletes every result of the given calculation type.
    pub fn invalidate_by_type(&self, calculation_type: CalculationType) -> usize {
        let count = self.state.lock().invalidate_type(calculation_type);
        info!(%calculation_type, count, "invalidated results by type");
        count
    }

    /// Applies each criterion of `filter` in turn under one lock acquisition.
    pub fn invalidate(&self, filter: &InvalidationFilter) -> usize {
        let mut state = self.state.lock();
        let mut count = 0;
        if let Some(molecule_hash) = &filter.molecule_hash {
            count += state.invalidate_molecule(molecule_hash);
        }
        if let Some(method) = &filter.method {
            count += state.invalidate_method(&method.trim().to_lowercase());
        }
        if let Some(calculation_type) = filter.calculation_type {
            count += state.invalidate_type(calculation_type);
        }
        info!(?filter, count, "invalidated results");
        count
    }

    // == Index Reads ==
    /// Live results computed with `method`, in insertion order.
    pub fn get_by_method(&self, method: &str) -> Vec<Arc<ResultRecord>> {
        let method = method.trim().to_lowercase();
        let mut state = self.state.lock();
        let bucket = state.by_method.get(&method).cloned().unwrap_or_default();
        state.live_from(&bucket, self.config.default_ttl())
    }

    /// Live results of `calculation_type`, in insertion order.
    pub fn get_by_type(&self, calculation_type: CalculationType) -> Vec<Arc<ResultRecord>> {
        let mut state = self.state.lock();
        let bucket = state.by_type.get(&calculation_type).cloned().unwrap_or_default();
        state.live_from(&bucket, self.config.default_ttl())
    }

    // == Compact Indices ==
    /// Drops stale hashes from the secondary indices, returning how many
    /// references were removed.
    pub fn compact_indices(&self) -> usize {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let records = &state.records;
        let mut removed = 0;

        for bucket in state.by_method.values_mut() {
            let before = bucket.len();
            bucket.retain(|h| records.contains_key(h));
            removed += before - bucket.len();
        }
        state.by_method.retain(|_, bucket| !bucket.is_empty());

        for bucket in state.by_type.values_mut() {
            let before = bucket.len();
            bucket.retain(|h| records.contains_key(h));
            removed += before - bucket.len();
        }
        state.by_type.retain(|_, bucket| !bucket.is_empty());

        debug!(removed, "compacted result indices");
        removed
    }

    // == Purge Expired ==
    /// Removes results past the configured TTL.
    pub fn purge_expired(&self) -> usize {
        let ttl = self.config.default_ttl();
        let mut state = self.state.lock();
        let now = Instant::now();
        let expired: Vec<String> = state
            .records
            .iter()
            .filter(|(_, slot)| StoreState::is_expired(slot, ttl, now))
            .map(|(hash, _)| hash.clone())
            .collect();
        expired.iter().filter(|h| state.remove_indexed(h)).count()
    }

    // == Clear ==
    /// Drops every result and index. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.records.clear();
        state.by_method.clear();
        state.by_type.clear();
    }

    /// Drops every result and zeroes the counters.
    pub fn reset(&self) {
        self.clear();
        self.state.lock().counters.reset();
    }

    // == Stats ==
    pub fn stats(&self) -> ResultStoreStats {
        let state = self.state.lock();
        let mut by_type: BTreeMap<CalculationType, usize> =
            CalculationType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut methods = HashSet::new();
        for slot in state.records.values() {
            *by_type.entry(slot.record.key.calculation_type).or_default() += 1;
            methods.insert(slot.record.key.method.as_str());
        }

        ResultStoreStats {
            n_results: state.records.len(),
            n_methods: methods.len(),
            max_entries: self.config.max_entries,
            by_type,
            hits: state.counters.hits,
            misses: state.counters.misses,
            evictions: state.counters.evictions,
            hit_rate: state.counters.hit_rate(),
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::from_valid(StoreConfig::results())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::MoleculeIndex;
    use serde_json::json;

    fn water() -> Molecule {
        Molecule::from_tuples(&[
            ("O", 0.0, 0.0, 0.0),
            ("H", 0.96, 0.0, 0.0),
            ("H", -0.24, 0.93, 0.0),
        ])
    }

    fn ammonia() -> Molecule {
        Molecule::from_tuples(&[
            ("N", 0.0, 0.0, 0.0),
            ("H", 1.01, 0.0, 0.0),
            ("H", -0.34, 0.95, 0.0),
            ("H", -0.34, -0.48, 0.82),
        ])
    }

    fn store(max_entries: usize) -> ResultStore {
        ResultStore::with_capacity(max_entries).unwrap()
    }

    fn key(
        store: &ResultStore,
        t: CalculationType,
        molecule: &Molecule,
        method: &str,
    ) -> CalculationKey {
        store.build_key(t, molecule, method, "6-31g*", None, None)
    }

    fn put(store: &ResultStore, key: &CalculationKey, energy: f64) {
        store.set(key, json!({ "energy": energy }), Duration::from_millis(5), "1.9.1", None);
    }

    #[test]
    fn test_round_trip_and_molecule_invalidation() {
        let store = store(10);
        let water = water();
        let key = store.build_key(CalculationType::Energy, &water, "b3lyp", "6-31g*", None, None);

        store.set(&key, json!({"energy": -76.4}), Duration::from_secs(2), "1.9.1", None);
        let record = store.get(&key).unwrap();
        assert_eq!(record.result, json!({"energy": -76.4}));
        assert_eq!(record.engine_version, "1.9.1");
        assert_eq!(record.computation_time_seconds, 2.0);

        assert_eq!(store.invalidate_by_molecule(&key.molecule_hash), 1);
        assert!(store.get(&key).is_none());
    }

    #[test]
    fn test_molecule_hash_follows_index_precision() {
        let coarse = MoleculeIndex::with_capacity(10).unwrap();
        let fine = MoleculeIndex::new(StoreConfig {
            hash_precision: 8,
            ..StoreConfig::molecules()
        })
        .unwrap();
        let store = store(10);
        let k = key(&store, CalculationType::Energy, &water(), "hf");
        put(&store, &k, -76.0);

        let coarse_hash = coarse.set(&water(), None).hash.clone();
        let fine_hash = fine.set(&water(), None).hash.clone();
        assert_eq!(k.molecule_hash, coarse_hash);
        assert_eq!(store.invalidate_by_molecule(&fine_hash), 0);
        assert_eq!(store.invalidate_by_molecule(&coarse_hash), 1);
    }

    #[test]
    fn test_reference_defaults_to_rhf() {
        let store = store(10);
        let implicit =
            store.build_key(CalculationType::Energy, &water(), "HF", "STO-3G", None, None);
        let explicit =
            store.build_key(CalculationType::Energy, &water(), "hf", "sto-3g", Some("RHF"), None);
        assert_eq!(implicit, explicit);
        assert_eq!(implicit.reference, "rhf");
    }

    #[test]
    fn test_options_never_fuzzy_match() {
        let store = store(10);
        let mut options = CalcOptions::new();
        options.insert("maxiter".to_string(), json!(100));
        let plain = key(&store, CalculationType::Energy, &water(), "scf");
        let tuned = store.build_key(
            CalculationType::Energy,
            &water(),
            "scf",
            "6-31g*",
            None,
            Some(&options),
        );

        put(&store, &plain, -76.0);
        assert!(store.get(&tuned).is_none());
    }

    #[test]
    fn test_set_replaces_result() {
        let store = store(10);
        let k = key(&store, CalculationType::Energy, &water(), "mp2");
        put(&store, &k, -76.1);
        put(&store, &k, -76.2);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&k).unwrap().result["energy"], json!(-76.2));
        assert_eq!(store.get_by_method("mp2").len(), 1);
        assert_eq!(store.get_by_type(CalculationType::Energy).len(), 1);
    }

    #[test]
    fn test_eviction_removes_oldest() {
        let store = store(2);
        let a = key(&store, CalculationType::Energy, &water(), "hf");
        let b = key(&store, CalculationType::Energy, &water(), "mp2");
        let c = key(&store, CalculationType::Energy, &water(), "ccsd");
        put(&store, &a, -76.0);
        put(&store, &b, -76.2);
        store.get(&a);
        put(&store, &c, -76.3);

        assert_eq!(store.len(), 2);
        assert!(store.get(&a).is_none());
        assert!(store.get(&b).is_some());
        assert!(store.get_by_method("hf").is_empty());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_eviction_prunes_indices() {
        let store = store(2);
        for i in 0..1000 {
            let molecule =
                Molecule::from_tuples(&[("H", 0.0, 0.0, 0.0), ("H", 0.74, 0.0, i as f64)]);
            let k = key(&store, CalculationType::Energy, &molecule, "b3lyp");
            put(&store, &k, -1.17);
        }

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 998);
        assert_eq!(store.compact_indices(), 0);
        assert_eq!(store.get_by_method("b3lyp").len(), 2);
        assert_eq!(store.get_by_type(CalculationType::Energy).len(), 2);
    }

    #[test]
    fn test_purge_prunes_indices() {
        let store = ResultStore::new(StoreConfig {
            default_ttl_seconds: Some(0),
            ..StoreConfig::results()
        })
        .unwrap();
        put(&store, &key(&store, CalculationType::Energy, &water(), "hf"), 0.0);
        put(&store, &key(&store, CalculationType::Gradient, &water(), "hf"), 0.0);

        assert_eq!(store.purge_expired(), 2);
        assert_eq!(store.compact_indices(), 0);
    }

    #[test]
    fn test_delete_leaves_indices_but_reads_filter() {
        let store = store(10);
        let a = key(&store, CalculationType::Energy, &water(), "hf");
        let b = key(&store, CalculationType::Gradient, &water(), "hf");
        put(&store, &a, -76.0);
        put(&store, &b, 0.0);

        assert!(store.delete(&a));
        assert!(!store.delete(&a));

        let by_method = store.get_by_method("HF");
        assert_eq!(by_method.len(), 1);
        assert_eq!(by_method[0].key, b);
        assert!(store.get_by_type(CalculationType::Energy).is_empty());
        assert_eq!(store.compact_indices(), 2);
        assert_eq!(store.compact_indices(), 0);
    }

    #[test]
    fn test_invalidate_by_method() {
        let store = store(10);
        for t in [CalculationType::Energy, CalculationType::Gradient] {
            put(&store, &key(&store, t, &water(), "b3lyp"), 0.0);
            put(&store, &key(&store, t, &ammonia(), "b3lyp"), 0.0);
        }
        put(&store, &key(&store, CalculationType::Energy, &water(), "hf"), 0.0);

        assert_eq!(store.invalidate_by_method("B3LYP"), 4);
        assert!(store.get_by_method("b3lyp").is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_type(CalculationType::Energy).len(), 1);
        assert_eq!(store.invalidate_by_method("b3lyp"), 0);
    }

    #[test]
    fn test_invalidate_counts_only_live_records() {
        let store = store(10);
        let a = key(&store, CalculationType::Energy, &water(), "hf");
        let b = key(&store, CalculationType::Energy, &ammonia(), "hf");
        put(&store, &a, 0.0);
        put(&store, &b, 0.0);
        store.delete(&a);

        assert_eq!(store.invalidate_by_type(CalculationType::Energy), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalidate_by_type_then_reinsert() {
        let store = store(10);
        let k = key(&store, CalculationType::Hessian, &water(), "hf");
        put(&store, &k, 0.0);

        assert_eq!(store.invalidate_by_type(CalculationType::Hessian), 1);
        assert!(store.get_by_type(CalculationType::Hessian).is_empty());

        put(&store, &k, 1.0);
        assert_eq!(store.get_by_type(CalculationType::Hessian).len(), 1);
        assert_eq!(store.get_by_method("hf").len(), 1);
    }

    #[test]
    fn test_combined_invalidation() {
        let store = store(10);
        let water = water();
        put(&store, &key(&store, CalculationType::Energy, &water, "hf"), 0.0);
        put(&store, &key(&store, CalculationType::Sapt, &ammonia(), "sapt0"), 0.0);
        put(&store, &key(&store, CalculationType::Energy, &ammonia(), "mp2"), 0.0);

        let water_hash = key(&store, CalculationType::Energy, &water, "hf").molecule_hash;
        let filter = InvalidationFilter::default()
            .molecule(water_hash)
            .calculation_type(CalculationType::Sapt);

        assert_eq!(store.invalidate(&filter), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_or_compute() {
        let store = store(10);
        let k = key(&store, CalculationType::Energy, &water(), "hf");

        let failed: std::result::Result<_, String> =
            store.get_or_compute(&k, "1.9.1", || Err("scf failed to converge".to_string()));
        assert!(failed.is_err());
        assert!(store.is_empty());

        let first = store
            .get_or_compute(&k, "1.9.1", || Ok::<_, String>(json!({"energy": -75.98})))
            .unwrap();
        let second = store
            .get_or_compute(&k, "1.9.1", || Err::<Value, _>("should not run".to_string()))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_stats_by_type() {
        let store = store(10);
        put(&store, &key(&store, CalculationType::Energy, &water(), "hf"), 0.0);
        put(&store, &key(&store, CalculationType::Energy, &ammonia(), "hf"), 0.0);
        put(&store, &key(&store, CalculationType::Tddft, &water(), "cam-b3lyp"), 0.0);
        store.get(&key(&store, CalculationType::Energy, &water(), "hf"));
        store.get(&key(&store, CalculationType::Sapt, &water(), "hf"));

        let stats = store.stats();
        assert_eq!(stats.n_results, 3);
        assert_eq!(stats.n_methods, 2);
        assert_eq!(stats.by_type[&CalculationType::Energy], 2);
        assert_eq!(stats.by_type[&CalculationType::Tddft], 1);
        assert_eq!(stats.by_type[&CalculationType::Hessian], 0);
        assert_eq!(stats.by_type.len(), 8);
        assert_eq!(stats.hit_rate, 0.5);
    }

    #[test]
    fn test_ttl_when_configured() {
        let store = ResultStore::new(StoreConfig {
            default_ttl_seconds: Some(0),
            ..StoreConfig::results()
        })
        .unwrap();
        let k = key(&store, CalculationType::Energy, &water(), "hf");
        put(&store, &k, 0.0);

        assert!(store.get(&k).is_none());
        assert!(store.get_by_method("hf").is_empty());
    }

    #[test]
    fn test_clear_and_reset() {
        let store = store(10);
        let k = key(&store, CalculationType::Energy, &water(), "hf");
        put(&store, &k, 0.0);
        store.get(&k);

        store.clear();
        assert!(store.is_empty());
        assert!(store.get_by_method("hf").is_empty());
        assert_eq!(store.stats().hits, 1);

        store.reset();
        assert_eq!(store.stats().hits, 0);
    }
}
