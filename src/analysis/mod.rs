//! Aggregation over in-memory sequences.
//!
//! `aggregator` holds the frequency table and statistics primitives, `keys`
//! the reusable key-extraction rules, and `derived` the aggregations built
//! from them.

pub mod aggregator;
pub mod derived;
pub mod keys;

pub use aggregator::*;
pub use derived::*;
pub use keys::*;
