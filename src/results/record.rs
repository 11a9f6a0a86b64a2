//! Result records, store statistics and invalidation filters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::results::{CalculationKey, CalculationType};
use crate::Metadata;

// == Result Record ==
/// A memoized calculation output.
///
/// Shared as `Arc<ResultRecord>`; replaced wholesale on `set`, never edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub key: CalculationKey,
    pub key_hash: String,
    /// Engine output as structured JSON
    pub result: Value,
    pub created_at: DateTime<Utc>,
    /// Wall-clock time the engine spent producing `result`
    pub computation_time_seconds: f64,
    /// Version tag of the engine that produced the result
    pub engine_version: String,
    pub metadata: Metadata,
}

// == Store Stats ==
/// Snapshot of a result store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultStoreStats {
    pub n_results: usize,
    /// Methods with at least one live result
    pub n_methods: usize,
    pub max_entries: usize,
    /// Live results per calculation type, every type listed
    pub by_type: BTreeMap<CalculationType, usize>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}

// == Invalidation Filter ==
/// Criteria for [`ResultStore::invalidate`](crate::results::ResultStore::invalidate).
/// Each criterion set is applied in turn; counts add up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationFilter {
    pub molecule_hash: Option<String>,
    pub method: Option<String>,
    pub calculation_type: Option<CalculationType>,
}

impl InvalidationFilter {
    pub fn molecule(mut self, molecule_hash: impl Into<String>) -> Self {
        self.molecule_hash = Some(molecule_hash.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn calculation_type(mut self, calculation_type: CalculationType) -> Self {
        self.calculation_type = Some(calculation_type);
        self
    }
}
