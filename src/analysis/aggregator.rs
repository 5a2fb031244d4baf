//! Frequency tables and summary statistics.
//!
//! This module provides the core aggregation primitives: counting keys
//! derived from a sequence of items, ranking the most common keys, and
//! computing summary statistics over numeric values.

use crate::error::{AggregateError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::hash::Hash;

/// Occurrence counts keyed by a derived key.
///
/// Keys keep the order in which they were first seen. That order is the
/// tie-breaker for [`most_common`] and the order of iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Hash + Eq> {
    counts: IndexMap<K, usize>,
}

impl<K: Hash + Eq> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> FrequencyTable<K> {
    fn increment(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count for `key`, if it was seen.
    pub fn get(&self, key: &K) -> Option<usize> {
        self.counts.get(key).copied()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of items that produced a key.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(key, count)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(k, c)| (k, *c))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    /// Consume the table into `(key, count)` pairs in first-insertion order.
    pub fn into_entries(self) -> Vec<(K, usize)> {
        self.counts.into_iter().collect()
    }

    /// The `n` most common keys, count descending, earliest key first on ties.
    pub fn top(&self, n: usize) -> Vec<(K, usize)>
    where
        K: Clone,
    {
        let mut ranked: Vec<(K, usize)> = self
            .counts
            .iter()
            .map(|(k, c)| (k.clone(), *c))
            .collect();

        // sort_by_key is stable, so equal counts keep insertion order
        ranked.sort_by_key(|(_, count)| Reverse(*count));
        ranked.truncate(n);
        ranked
    }
}

/// Build a frequency table from `items`.
///
/// `key_fn` maps each item to its key, or to `None` to skip the item.
/// Items are visited once, in order.
pub fn build_frequency_table<T, K, I, F>(items: I, mut key_fn: F) -> FrequencyTable<K>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq,
    F: FnMut(&T) -> Option<K>,
{
    let mut table = FrequencyTable::default();

    for item in items {
        if let Some(key) = key_fn(&item) {
            table.increment(key);
        }
    }

    table
}

/// Get the `n` most common entries of `table`.
///
/// Fails with [`AggregateError::InvalidArgument`] when `n` is negative.
pub fn most_common<K>(table: &FrequencyTable<K>, n: i64) -> Result<Vec<(K, usize)>>
where
    K: Hash + Eq + Clone,
{
    let n = usize::try_from(n).map_err(|_| {
        AggregateError::InvalidArgument(format!("n must be non-negative, got {}", n))
    })?;

    Ok(table.top(n))
}

/// Summary statistics over a numeric sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    count: usize,
    sum: f64,
    mean: f64,
    minimum: f64,
    maximum: f64,
    mode: Vec<f64>,
}

impl SummaryStatistics {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Values sharing the highest occurrence count, in first-seen order.
    pub fn mode(&self) -> &[f64] {
        &self.mode
    }

    /// Difference between maximum and minimum.
    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }
}

/// Compute count, sum, mean, minimum, maximum and mode in a single pass.
///
/// Fails with [`AggregateError::EmptyInput`] when `values` is empty and with
/// [`AggregateError::InvalidArgument`] when a value is NaN or infinite, or
/// when the sum overflows `f64`.
pub fn compute_statistics<I>(values: I) -> Result<SummaryStatistics>
where
    I: IntoIterator,
    I::Item: Into<f64>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut minimum = f64::INFINITY;
    let mut maximum = f64::NEG_INFINITY;
    let mut occurrences: FrequencyTable<u64> = FrequencyTable::default();

    for value in values {
        let value: f64 = value.into();
        if !value.is_finite() {
            return Err(AggregateError::InvalidArgument(format!(
                "value at position {} is not finite: {}",
                count, value
            )));
        }

        count += 1;
        sum += value;
        if !sum.is_finite() {
            return Err(AggregateError::InvalidArgument(format!(
                "sum overflows after {} values",
                count
            )));
        }

        minimum = minimum.min(value);
        maximum = maximum.max(value);
        // -0.0 and 0.0 are the same value
        let normalized = if value == 0.0 { 0.0f64 } else { value };
        occurrences.increment(normalized.to_bits());
    }

    if count == 0 {
        return Err(AggregateError::EmptyInput);
    }

    // The sum is finite here. Rounding in it can push the mean a hair
    // outside [min, max]
    let mean = (sum / count as f64).clamp(minimum, maximum);

    let highest = occurrences.iter().map(|(_, c)| c).max().unwrap_or(0);
    let mode = occurrences
        .iter()
        .filter(|(_, c)| *c == highest)
        .map(|(bits, _)| f64::from_bits(*bits))
        .collect();

    Ok(SummaryStatistics {
        count,
        sum,
        mean,
        minimum,
        maximum,
        mode,
    })
}
