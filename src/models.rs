//! Report data models.
//!
//! These are the serializable shapes handed to the report generators. They
//! are built from frequency tables and statistics after aggregation.

use crate::analysis::{FrequencyTable, SummaryStatistics};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// One row of a frequency report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    /// Display form of the key.
    pub key: String,
    /// Number of occurrences.
    pub count: usize,
    /// Share of all counted items, as a percentage.
    pub percent: f64,
}

/// Frequency table summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyReport {
    /// Items that produced a key.
    pub total: usize,
    /// Distinct keys.
    pub distinct: usize,
    /// Reported entries, count descending.
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyReport {
    /// Build a report from `table` and the ranked entries to show.
    pub fn new<K>(table: &FrequencyTable<K>, ranked: Vec<(K, usize)>) -> Self
    where
        K: Hash + Eq + fmt::Display,
    {
        let total = table.total();

        let entries = ranked
            .into_iter()
            .map(|(key, count)| FrequencyEntry {
                key: key.to_string(),
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / total as f64
                },
            })
            .collect();

        Self {
            total,
            distinct: table.len(),
            entries,
        }
    }

    /// Whether some distinct keys were left out of `entries`.
    pub fn is_truncated(&self) -> bool {
        self.entries.len() < self.distinct
    }
}

/// Metadata about a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Where the input came from (file path or "stdin").
    pub source: String,
    /// Aggregation mode.
    pub mode: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Raw items read from the input.
    pub items_read: usize,
    /// Items that were skipped (no key, or not a number).
    pub items_skipped: usize,
}

/// A complete aggregation report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<FrequencyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SummaryStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grades: Option<FrequencyReport>,
    /// Values strictly above the mean, in input order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above_mean: Option<Vec<f64>>,
}

impl Report {
    /// Creates an empty report with the given metadata.
    pub fn new(metadata: ReportMetadata) -> Self {
        Self {
            metadata,
            frequency: None,
            statistics: None,
            grades: None,
            above_mean: None,
        }
    }
}
