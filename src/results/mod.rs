//! Results Module
//!
//! Memoization of calculation outputs keyed on molecule identity and level
//! of theory.

mod key;
mod record;
mod store;

pub use key::{
    options_hash, CalcOptions, CalculationKey, CalculationKeyBuilder, CalculationType,
    DEFAULT_REFERENCE,
};
pub use record::{InvalidationFilter, ResultRecord, ResultStoreStats};
pub use store::ResultStore;
