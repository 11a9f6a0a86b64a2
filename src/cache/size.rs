//! Size Estimation Module
//!
//! Rough per-value size estimates reported in cache statistics. The numbers
//! feed telemetry only; no store enforces a byte budget.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use serde_json::Value;

/// Estimate for numeric and boolean primitives.
pub const PRIMITIVE_SIZE: usize = 8;

/// Estimate for types that do not override [`EstimateSize::estimated_size`].
pub const FALLBACK_SIZE: usize = 100;

// == Estimate Size ==
/// Informational size of a cached value in bytes.
///
/// Types without a meaningful estimate can opt in with an empty impl and
/// get [`FALLBACK_SIZE`].
pub trait EstimateSize {
    fn estimated_size(&self) -> usize {
        FALLBACK_SIZE
    }
}

macro_rules! primitive_size {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EstimateSize for $ty {
                fn estimated_size(&self) -> usize {
                    PRIMITIVE_SIZE
                }
            }
        )*
    };
}

primitive_size!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize, f32, f64, bool, char);

// Counted as one byte so that `Vec<u8>` and `[u8]` are sized by length.
impl EstimateSize for u8 {
    fn estimated_size(&self) -> usize {
        1
    }
}

impl EstimateSize for () {
    fn estimated_size(&self) -> usize {
        0
    }
}

impl EstimateSize for str {
    fn estimated_size(&self) -> usize {
        self.len()
    }
}

impl EstimateSize for String {
    fn estimated_size(&self) -> usize {
        self.len()
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for &T {
    fn estimated_size(&self) -> usize {
        (**self).estimated_size()
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for Box<T> {
    fn estimated_size(&self) -> usize {
        (**self).estimated_size()
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for Arc<T> {
    fn estimated_size(&self) -> usize {
        (**self).estimated_size()
    }
}

impl<T: EstimateSize> EstimateSize for Option<T> {
    fn estimated_size(&self) -> usize {
        self.as_ref().map_or(0, EstimateSize::estimated_size)
    }
}

impl<T: EstimateSize> EstimateSize for [T] {
    fn estimated_size(&self) -> usize {
        self.iter().map(EstimateSize::estimated_size).sum()
    }
}

impl<T: EstimateSize> EstimateSize for Vec<T> {
    fn estimated_size(&self) -> usize {
        self.as_slice().estimated_size()
    }
}

impl<T: EstimateSize> EstimateSize for VecDeque<T> {
    fn estimated_size(&self) -> usize {
        self.iter().map(EstimateSize::estimated_size).sum()
    }
}

impl<T: EstimateSize, S> EstimateSize for HashSet<T, S> {
    fn estimated_size(&self) -> usize {
        self.iter().map(EstimateSize::estimated_size).sum()
    }
}

impl<T: EstimateSize> EstimateSize for BTreeSet<T> {
    fn estimated_size(&self) -> usize {
        self.iter().map(EstimateSize::estimated_size).sum()
    }
}

impl<K: EstimateSize, V: EstimateSize, S> EstimateSize for HashMap<K, V, S> {
    fn estimated_size(&self) -> usize {
        self.iter()
            .map(|(k, v)| k.estimated_size() + v.estimated_size())
            .sum()
    }
}

impl<K: EstimateSize, V: EstimateSize> EstimateSize for BTreeMap<K, V> {
    fn estimated_size(&self) -> usize {
        self.iter()
            .map(|(k, v)| k.estimated_size() + v.estimated_size())
            .sum()
    }
}

impl<A: EstimateSize, B: EstimateSize> EstimateSize for (A, B) {
    fn estimated_size(&self) -> usize {
        self.0.estimated_size() + self.1.estimated_size()
    }
}

impl<A: EstimateSize, B: EstimateSize, C: EstimateSize> EstimateSize for (A, B, C) {
    fn estimated_size(&self) -> usize {
        self.0.estimated_size() + self.1.estimated_size() + self.2.estimated_size()
    }
}

impl EstimateSize for Value {
    fn estimated_size(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Bool(_) | Value::Number(_) => PRIMITIVE_SIZE,
            Value::String(s) => s.len(),
            Value::Array(items) => items.iter().map(EstimateSize::estimated_size).sum(),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| k.len() + v.estimated_size())
                .sum(),
        }
    }
}
