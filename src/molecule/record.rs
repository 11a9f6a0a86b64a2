//! Molecule records and index statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geometry::{matches_positionally, Atom};
use crate::Metadata;

// == Molecule Record ==
/// A deduplicated molecule, addressed by its canonical hash.
///
/// Records are shared as `Arc<MoleculeRecord>` and never modified after
/// creation; a repeated `set` replaces the record wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeRecord {
    /// Canonical content hash
    pub hash: String,
    /// Atoms in the order they were supplied
    pub atoms: Vec<Atom>,
    pub charge: i32,
    pub multiplicity: u32,
    pub n_atoms: usize,
    /// Hill-notation formula
    pub formula: String,
    pub created_at: DateTime<Utc>,
    pub metadata: Metadata,
}

impl MoleculeRecord {
    /// Positional comparison against another atom list; see
    /// [`matches_positionally`].
    pub fn matches_geometry(&self, atoms: &[Atom], tolerance: f64) -> bool {
        matches_positionally(&self.atoms, atoms, tolerance)
    }
}

// == Index Stats ==
/// Snapshot of a molecule index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeIndexStats {
    /// Stored molecules
    pub n_molecules: usize,
    /// Distinct formula buckets
    pub n_formulas: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}
