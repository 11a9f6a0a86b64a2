//! Calculation keys
//!
//! Composite identity of a calculation: what was computed, on which molecule,
//! at which level of theory and with which options.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DEFAULT_HASH_PRECISION;
use crate::error::CacheError;
use crate::geometry::Molecule;
use crate::hashing::{molecule_hash, sha256_hex};

/// Reference wavefunction used when none is given.
pub const DEFAULT_REFERENCE: &str = "rhf";

/// Hex characters of the options digest kept in the key.
const OPTIONS_HASH_LENGTH: usize = 16;

/// Engine options participating in the key. Sorted by name.
pub type CalcOptions = BTreeMap<String, Value>;

// == Calculation Type ==
/// Kind of calculation a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Energy,
    Optimization,
    Frequencies,
    Properties,
    Tddft,
    Sapt,
    Gradient,
    Hessian,
}

impl CalculationType {
    pub const ALL: [CalculationType; 8] = [
        CalculationType::Energy,
        CalculationType::Optimization,
        CalculationType::Frequencies,
        CalculationType::Properties,
        CalculationType::Tddft,
        CalculationType::Sapt,
        CalculationType::Gradient,
        CalculationType::Hessian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationType::Energy => "energy",
            CalculationType::Optimization => "optimization",
            CalculationType::Frequencies => "frequencies",
            CalculationType::Properties => "properties",
            CalculationType::Tddft => "tddft",
            CalculationType::Sapt => "sapt",
            CalculationType::Gradient => "gradient",
            CalculationType::Hessian => "hessian",
        }
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        CalculationType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or(CacheError::InvalidCalculationType(tag))
    }
}

// == Calculation Key ==
/// Identity of a cached calculation.
///
/// Text fields are stored lower-cased. Any change to any option value gives
/// a different `options_hash` and therefore a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalculationKey {
    pub calculation_type: CalculationType,
    pub molecule_hash: String,
    pub method: String,
    pub basis: String,
    pub reference: String,
    /// Empty when no options were given
    pub options_hash: String,
}

impl CalculationKey {
    /// Starts a key for `calculation_type` on `molecule` at the given level
    /// of theory. Reference, options and precision have defaults.
    pub fn builder<'a>(
        calculation_type: CalculationType,
        molecule: &'a Molecule,
        method: &str,
        basis: &str,
    ) -> CalculationKeyBuilder<'a> {
        CalculationKeyBuilder {
            calculation_type,
            molecule,
            method: method.to_string(),
            basis: basis.to_string(),
            reference: DEFAULT_REFERENCE.to_string(),
            options: None,
            precision: DEFAULT_HASH_PRECISION,
        }
    }

    /// Deterministic hash over every field; the primary key of the result store.
    pub fn key_hash(&self) -> String {
        sha256_hex(format!(
            "{}|{}|{}|{}|{}|{}",
            self.calculation_type,
            self.molecule_hash,
            self.method,
            self.basis,
            self.reference,
            self.options_hash
        ))
    }
}

/// Digest of a canonical rendering of `options`; empty for no options.
pub fn options_hash(options: Option<&CalcOptions>) -> String {
    match options {
        Some(options) if !options.is_empty() => {
            // serde_json objects keep keys sorted, nested ones included.
            let canonical = Value::Object(
                options
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )
            .to_string();
            let mut digest = sha256_hex(canonical);
            digest.truncate(OPTIONS_HASH_LENGTH);
            digest
        }
        _ => String::new(),
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

// == Key Builder ==
#[derive(Debug)]
pub struct CalculationKeyBuilder<'a> {
    calculation_type: CalculationType,
    molecule: &'a Molecule,
    method: String,
    basis: String,
    reference: String,
    options: Option<&'a CalcOptions>,
    precision: u32,
}

impl<'a> CalculationKeyBuilder<'a> {
    /// Overrides the default `rhf` reference.
    pub fn reference(mut self, reference: &str) -> Self {
        self.reference = reference.to_string();
        self
    }

    pub fn options(mut self, options: &'a CalcOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Coordinate precision of the molecule hash; must match the stores'.
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn build(self) -> CalculationKey {
        CalculationKey {
            calculation_type: self.calculation_type,
            molecule_hash: molecule_hash(
                &self.molecule.atoms,
                self.molecule.charge,
                self.molecule.multiplicity,
                self.precision,
            ),
            method: normalize(&self.method),
            basis: normalize(&self.basis),
            reference: normalize(&self.reference),
            options_hash: options_hash(self.options),
        }
    }
}
