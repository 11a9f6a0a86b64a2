//! Geometry Module
//!
//! Atom lists as supplied by geometry ingestion: element symbols with
//! Cartesian coordinates in Angstrom, plus charge and spin multiplicity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// == Atom ==
/// One atom: element symbol and position in Angstrom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Atom {
    /// Creates an atom, normalizing the symbol (`"cl"` and `"CL"` become `"Cl"`).
    pub fn new(element: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            element: normalize_element(element),
            x,
            y,
            z,
        }
    }

    /// Euclidean distance to another atom's position.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

impl From<(&str, f64, f64, f64)> for Atom {
    fn from((element, x, y, z): (&str, f64, f64, f64)) -> Self {
        Atom::new(element, x, y, z)
    }
}

fn normalize_element(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// == Molecule ==
/// Ordered atom list with total charge and spin multiplicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub charge: i32,
    pub multiplicity: u32,
}

impl Molecule {
    /// Neutral singlet with the given atoms.
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            charge: 0,
            multiplicity: 1,
        }
    }

    /// Builds a molecule from `(element, x, y, z)` tuples.
    pub fn from_tuples(atoms: &[(&str, f64, f64, f64)]) -> Self {
        Self::new(atoms.iter().copied().map(Atom::from).collect())
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Hill-notation formula of the atom list.
    pub fn formula(&self) -> String {
        hill_formula(&self.atoms)
    }
}

// == Hill Formula ==
/// Formula in Hill order: carbon first, then hydrogen when carbon is
/// present, then the rest alphabetically. A count of one is omitted.
pub fn hill_formula(atoms: &[Atom]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for atom in atoms {
        *counts.entry(atom.element.as_str()).or_default() += 1;
    }

    let mut ordered: Vec<(&str, usize)> = Vec::with_capacity(counts.len());
    if let Some(carbon) = counts.remove("C") {
        ordered.push(("C", carbon));
        if let Some(hydrogen) = counts.remove("H") {
            ordered.push(("H", hydrogen));
        }
    }
    ordered.extend(counts);

    ordered
        .into_iter()
        .map(|(element, count)| {
            if count == 1 {
                element.to_string()
            } else {
                format!("{}{}", element, count)
            }
        })
        .collect()
}

// == Positional Match ==
/// True when both lists have the same length, the same element at every
/// position, and every atom lies within `tolerance` of its counterpart.
///
/// Atoms are compared in the given order; permuted lists do not match.
pub fn matches_positionally(a: &[Atom], b: &[Atom], tolerance: f64) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(p, q)| p.element == q.element && p.distance_to(q) <= tolerance)
}

// == Geometry Comparison ==
/// Per-atom displacement summary between two geometries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryComparison {
    pub same_size: bool,
    pub elements_match: bool,
    pub displacements: Vec<f64>,
    /// None when the atom counts differ
    pub max_displacement: Option<f64>,
    /// None when the atom counts differ
    pub rms_displacement: Option<f64>,
}

/// Compares two geometries atom by atom in the given order.
pub fn compare_geometries(a: &[Atom], b: &[Atom]) -> GeometryComparison {
    if a.len() != b.len() {
        return GeometryComparison {
            same_size: false,
            elements_match: false,
            displacements: Vec::new(),
            max_displacement: None,
            rms_displacement: None,
        };
    }

    let displacements: Vec<f64> = a.iter().zip(b).map(|(p, q)| p.distance_to(q)).collect();
    let elements_match = a.iter().zip(b).all(|(p, q)| p.element == q.element);

    let (max, rms) = if displacements.is_empty() {
        (0.0, 0.0)
    } else {
        let max = displacements.iter().copied().fold(0.0, f64::max);
        let mean_sq =
            displacements.iter().map(|d| d * d).sum::<f64>() / displacements.len() as f64;
        (max, mean_sq.sqrt())
    };

    GeometryComparison {
        same_size: true,
        elements_match,
        displacements,
        max_displacement: Some(max),
        rms_displacement: Some(rms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_normalization() {
        assert_eq!(Atom::new("cl", 0.0, 0.0, 0.0).element, "Cl");
        assert_eq!(Atom::new(" H ", 0.0, 0.0, 0.0).element, "H");
        assert_eq!(Atom::new("NA", 0.0, 0.0, 0.0).element, "Na");
    }

    #[test]
    fn test_hill_formula_with_carbon() {
        let ethanol = Molecule::from_tuples(&[
            ("O", 0.0, 0.0, 0.0),
            ("C", 1.0, 0.0, 0.0),
            ("H", 2.0, 0.0, 0.0),
            ("C", 3.0, 0.0, 0.0),
            ("H", 4.0, 0.0, 0.0),
            ("H", 5.0, 0.0, 0.0),
            ("H", 6.0, 0.0, 0.0),
            ("H", 7.0, 0.0, 0.0),
            ("H", 8.0, 0.0, 0.0),
        ]);
        assert_eq!(ethanol.formula(), "C2H6O");
    }

    #[test]
    fn test_hill_formula_without_carbon() {
        let water = Molecule::from_tuples(&[
            ("O", 0.0, 0.0, 0.0),
            ("H", 0.96, 0.0, 0.0),
            ("H", -0.24, 0.93, 0.0),
        ]);
        assert_eq!(water.formula(), "H2O");

        let salt = Molecule::from_tuples(&[("Na", 0.0, 0.0, 0.0), ("Cl", 2.4, 0.0, 0.0)]);
        assert_eq!(salt.formula(), "ClNa");
    }

    #[test]
    fn test_matches_positionally() {
        let a = vec![Atom::new("O", 0.0, 0.0, 0.0), Atom::new("H", 0.96, 0.0, 0.0)];
        let near = vec![Atom::new("O", 1e-8, 0.0, 0.0), Atom::new("H", 0.96, 1e-8, 0.0)];
        let swapped = vec![a[1].clone(), a[0].clone()];

        assert!(matches_positionally(&a, &near, 1e-6));
        assert!(!matches_positionally(&a, &near, 1e-9));
        assert!(!matches_positionally(&a, &swapped, 1e-6));
        assert!(!matches_positionally(&a, &a[..1], 1e-6));
    }

    #[test]
    fn test_compare_geometries() {
        let a = vec![Atom::new("O", 0.0, 0.0, 0.0), Atom::new("H", 1.0, 0.0, 0.0)];
        let b = vec![Atom::new("O", 0.0, 0.0, 0.0), Atom::new("H", 1.0, 0.5, 0.0)];

        let cmp = compare_geometries(&a, &b);
        assert!(cmp.same_size);
        assert!(cmp.elements_match);
        assert_eq!(cmp.max_displacement, Some(0.5));
        assert!((cmp.rms_displacement.unwrap() - (0.125f64).sqrt()).abs() < 1e-12);

        let cmp = compare_geometries(&a, &b[..1]);
        assert!(!cmp.same_size);
        assert_eq!(cmp.max_displacement, None);
    }
}
