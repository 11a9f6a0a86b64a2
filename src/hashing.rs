//! Hashing Module
//!
//! Content hashes shared by the molecule index and the result store. Both must
//! agree byte for byte, so the canonicalization lives here and nowhere else.

use sha2::{Digest, Sha256};

use crate::geometry::Atom;

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_ref());
    hex::encode(hasher.finalize())
}

/// Rounds to `precision` decimals, folding `-0.0` into `0.0`.
pub fn round_coordinate(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// == Molecule Hash ==
/// Canonical content hash of a geometry with its charge and multiplicity.
///
/// Atoms are sorted by element and rounded coordinates before hashing, so
/// any permutation of the same atom list yields the same hash. Two inputs
/// that agree to `precision` decimals hash identically.
pub fn molecule_hash(atoms: &[Atom], charge: i32, multiplicity: u32, precision: u32) -> String {
    let mut rounded: Vec<(&str, [f64; 3])> = atoms
        .iter()
        .map(|atom| {
            (
                atom.element.as_str(),
                [
                    round_coordinate(atom.x, precision),
                    round_coordinate(atom.y, precision),
                    round_coordinate(atom.z, precision),
                ],
            )
        })
        .collect();

    rounded.sort_by(|(ea, ca), (eb, cb)| {
        ea.cmp(eb)
            .then_with(|| ca[0].total_cmp(&cb[0]))
            .then_with(|| ca[1].total_cmp(&cb[1]))
            .then_with(|| ca[2].total_cmp(&cb[2]))
    });

    let digits = precision as usize;
    let mut canonical = format!("{}_{}", charge, multiplicity);
    for (element, [x, y, z]) in rounded {
        canonical.push_str(&format!(
            "|{}_{:.*}_{:.*}_{:.*}",
            element, digits, x, digits, y, digits, z
        ));
    }

    sha256_hex(canonical)
}
