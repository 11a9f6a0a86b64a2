//! Molecule Module
//!
//! Geometry deduplication through canonical hashing, with exact and
//! tolerance-based lookup.

mod index;
mod record;

pub use index::{MoleculeIndex, DEFAULT_TOLERANCE};
pub use record::{MoleculeIndexStats, MoleculeRecord};
