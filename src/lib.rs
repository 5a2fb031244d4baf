//! Tally - frequency tables and summary statistics.
//!
//! The library counts keys derived from a sequence of items and computes
//! summary statistics over numeric values. All aggregation is pure: every
//! call builds its results from the input it is given.
//!
//! ```
//! use tally::{build_frequency_table, compute_statistics, most_common};
//!
//! let table = build_frequency_table(["a", "b", "a", "c", "b", "a"], |s| Some(*s));
//! assert_eq!(most_common(&table, 2).unwrap(), vec![("a", 3), ("b", 2)]);
//!
//! let stats = compute_statistics([85, 92, 78, 96, 88]).unwrap();
//! assert_eq!(stats.count(), 5);
//! assert_eq!(stats.maximum(), 96.0);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod report;

pub use analysis::{
    build_frequency_table, compute_statistics, most_common, FrequencyTable, SummaryStatistics,
};
pub use error::AggregateError;
