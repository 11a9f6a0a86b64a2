//! Background Tasks Module
//!
//! Periodic maintenance for long-lived stores.
//!
//! # Tasks
//! - Expiry purge: removes expired entries at a configured interval

mod cleanup;

pub use cleanup::{spawn_purge_task, PurgeExpired};
