//! Query engine for the climate database.
//!
//! Wraps a read-only SQLite pool. Each operation is one fixed aggregate or
//! listing query over the `measurement` and `station` tables:
//! - precipitation readings inside a date window
//! - the distinct station identifiers
//! - temperature readings of the most active station
//! - min/avg/max temperature from a start date, or over an inclusive range

mod client;
mod error;

pub use client::{ClimateStore, StoreConfig};
pub use error::StoreError;
