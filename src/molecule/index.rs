//! Molecule Index Module
//!
//! Content-addressed store of molecular geometries with a formula secondary
//! index for tolerance-based lookup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::Counters;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::geometry::{hill_formula, Molecule};
use crate::hashing::molecule_hash;
use crate::molecule::{MoleculeIndexStats, MoleculeRecord};
use crate::Metadata;

/// Default coordinate tolerance for [`MoleculeIndex::get_by_geometry`], in Angstrom.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

// == Molecule Index ==
/// Deduplicating store of molecules keyed by canonical hash.
///
/// Invariant: every hash listed under a formula exists in the primary map.
#[derive(Debug)]
pub struct MoleculeIndex {
    config: StoreConfig,
    state: Mutex<IndexState>,
}

#[derive(Debug)]
struct IndexState {
    records: HashMap<String, Slot>,
    by_formula: HashMap<String, Vec<String>>,
    counters: Counters,
    tick: u64,
}

#[derive(Debug)]
struct Slot {
    record: Arc<MoleculeRecord>,
    seq: u64,
    inserted: Instant,
}

impl IndexState {
    fn is_expired(&self, slot: &Slot, config: &StoreConfig, now: Instant) -> bool {
        config
            .default_ttl()
            .and_then(|ttl| slot.inserted.checked_add(ttl))
            .is_some_and(|expires| now >= expires)
    }

    fn remove(&mut self, hash: &str) -> Option<Arc<MoleculeRecord>> {
        let slot = self.records.remove(hash)?;
        let formula = &slot.record.formula;
        if let Some(bucket) = self.by_formula.get_mut(formula) {
            bucket.retain(|h| h != hash);
            if bucket.is_empty() {
                self.by_formula.remove(formula);
            }
        }
        Some(slot.record)
    }

    /// Live record for `hash`, dropping it first if it has expired.
    fn live(&mut self, hash: &str, config: &StoreConfig) -> Option<Arc<MoleculeRecord>> {
        let expired = {
            let slot = self.records.get(hash)?;
            self.is_expired(slot, config, Instant::now())
        };
        if expired {
            self.remove(hash);
            debug!(hash, "removed expired molecule");
            return None;
        }
        self.records.get(hash).map(|slot| Arc::clone(&slot.record))
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .records
            .iter()
            .min_by_key(|(_, slot)| slot.seq)
            .map(|(hash, _)| hash.clone());

        if let Some(hash) = oldest {
            self.remove(&hash);
            self.counters.record_eviction();
            debug!(%hash, "evicted oldest molecule");
        }
    }
}

impl MoleculeIndex {
    // == Constructor ==
    /// Creates an index from a validated configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: StoreConfig) -> Self {
        Self {
            state: Mutex::new(IndexState {
                records: HashMap::new(),
                by_formula: HashMap::new(),
                counters: Counters::new(config.enable_stats),
                tick: 0,
            }),
            config,
        }
    }

    /// Index with the given capacity and default settings otherwise.
    pub fn with_capacity(max_entries: usize) -> Result<Self> {
        Self::new(StoreConfig::molecules().with_max_entries(max_entries))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // == Hash ==
    /// Canonical hash of `molecule` at this index's precision.
    pub fn hash(&self, molecule: &Molecule) -> String {
        molecule_hash(
            &molecule.atoms,
            molecule.charge,
            molecule.multiplicity,
            self.config.hash_precision,
        )
    }

    // == Set ==
    /// Stores `molecule`, replacing any record with the same hash.
    ///
    /// A new hash arriving at capacity evicts the oldest record first.
    pub fn set(&self, molecule: &Molecule, metadata: Option<Metadata>) -> Arc<MoleculeRecord> {
        let hash = self.hash(molecule);
        let formula = hill_formula(&molecule.atoms);
        let record = Arc::new(MoleculeRecord {
            hash: hash.clone(),
            atoms: molecule.atoms.clone(),
            charge: molecule.charge,
            multiplicity: molecule.multiplicity,
            n_atoms: molecule.atoms.len(),
            formula: formula.clone(),
            created_at: Utc::now(),
            metadata: metadata.unwrap_or_default(),
        });

        let mut state = self.state.lock();
        if !state.records.contains_key(&hash) && state.records.len() >= self.config.max_entries {
            state.evict_oldest();
        }

        state.tick += 1;
        let seq = state.tick;
        state.records.insert(
            hash.clone(),
            Slot {
                record: Arc::clone(&record),
                seq,
                inserted: Instant::now(),
            },
        );

        let bucket = state.by_formula.entry(formula).or_default();
        if !bucket.contains(&hash) {
            bucket.push(hash);
        }

        record
    }

    // == Get ==
    /// Looks a molecule up by canonical hash.
    pub fn get(&self, hash: &str) -> Option<Arc<MoleculeRecord>> {
        let mut state = self.state.lock();
        let found = state.live(hash, &self.config);
        match found {
            Some(_) => state.counters.record_hit(),
            None => state.counters.record_miss(),
        }
        found
    }

    // == Get By Formula ==
    /// All live molecules sharing `formula`, in the order they were first added.
    pub fn get_by_formula(&self, formula: &str) -> Vec<Arc<MoleculeRecord>> {
        let mut state = self.state.lock();
        let hashes = state.by_formula.get(formula).cloned().unwrap_or_default();
        hashes
            .iter()
            .filter_map(|hash| state.live(hash, &self.config))
            .collect()
    }

    // == Get By Geometry ==
    /// Finds a stored molecule matching `molecule`.
    ///
    /// Tries the exact canonical hash first. On a miss, scans only the
    /// formula bucket for a record with equal charge and multiplicity whose
    /// atoms each lie within `tolerance` of the query's atom at the same
    /// position. Permuted atom orderings are matched only by the exact path.
    pub fn get_by_geometry(
        &self,
        molecule: &Molecule,
        tolerance: f64,
    ) -> Option<Arc<MoleculeRecord>> {
        let hash = self.hash(molecule);
        let mut state = self.state.lock();

        if let Some(record) = state.live(&hash, &self.config) {
            state.counters.record_hit();
            trace!(%hash, "exact geometry match");
            return Some(record);
        }

        let formula = hill_formula(&molecule.atoms);
        let candidates = state.by_formula.get(&formula).cloned().unwrap_or_default();
        let found = candidates
            .iter()
            .filter_map(|candidate| state.live(candidate, &self.config))
            .find(|record| {
                record.charge == molecule.charge
                    && record.multiplicity == molecule.multiplicity
                    && record.matches_geometry(&molecule.atoms, tolerance)
            });

        match found {
            Some(ref record) => {
                state.counters.record_hit();
                trace!(hash = %record.hash, "fuzzy geometry match");
            }
            None => state.counters.record_miss(),
        }
        found
    }

    // == Delete ==
    /// Removes a molecule and prunes its formula bucket.
    pub fn delete(&self, hash: &str) -> bool {
        self.state.lock().remove(hash).is_some()
    }

    // == Clear ==
    /// Drops every record and bucket. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.records.clear();
        state.by_formula.clear();
    }

    /// Drops every record and zeroes the counters.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.records.clear();
        state.by_formula.clear();
        state.counters.reset();
    }

    // == Purge Expired ==
    /// Removes records past the configured TTL.
    pub fn purge_expired(&self) -> usize {
        let mut state = self.state.lock();
        let now = Instant::now();
        let expired: Vec<String> = state
            .records
            .iter()
            .filter(|(_, slot)| state.is_expired(slot, &self.config, now))
            .map(|(hash, _)| hash.clone())
            .collect();

        for hash in &expired {
            state.remove(hash);
        }
        expired.len()
    }

    // == Stats ==
    pub fn stats(&self) -> MoleculeIndexStats {
        let state = self.state.lock();
        MoleculeIndexStats {
            n_molecules: state.records.len(),
            n_formulas: state.by_formula.len(),
            max_entries: self.config.max_entries,
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

impl Default for MoleculeIndex {
    fn default() -> Self {
        Self::from_valid(StoreConfig::molecules())
    }
}
