//! Aggregations built on top of frequency tables and statistics.

use super::aggregator::{build_frequency_table, compute_statistics, FrequencyTable};
use super::keys::{normalized_word, trimmed_lowercase, Grade, GradeScale};
use crate::error::Result;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::hash::Hash;

/// Word counts for a block of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    /// Words that survived normalization.
    pub total_words: usize,
    /// Distinct normalized words.
    pub unique_words: usize,
    /// Most common words, count descending.
    pub most_common: Vec<(String, usize)>,
}

/// Count words in `text`, keeping the `top` most common.
///
/// Words are split on whitespace, lowercased and stripped of anything that
/// is not alphanumeric. Tokens with nothing left are ignored.
pub fn word_frequency(text: &str, top: usize) -> WordFrequency {
    let table = word_table(text);

    WordFrequency {
        total_words: table.total(),
        unique_words: table.len(),
        most_common: table.top(top),
    }
}

/// Frequency table of normalized words in `text`.
pub fn word_table(text: &str) -> FrequencyTable<String> {
    build_frequency_table(text.split_whitespace(), |w| normalized_word(w))
}

/// Count scores per letter grade.
///
/// Only grades that occur appear in the table, in order of first occurrence.
pub fn grade_distribution<I>(scores: I, scale: &GradeScale) -> FrequencyTable<Grade>
where
    I: IntoIterator<Item = f64>,
{
    build_frequency_table(scores, |score| scale.grade(*score))
}

/// Remove duplicates, keeping the first occurrence of each item.
pub fn unique_in_order<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Hash + Eq,
{
    items.into_iter().collect::<IndexSet<T>>().into_iter().collect()
}

/// Result of cleaning a list of text entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSummary {
    /// Entries supplied.
    pub original_count: usize,
    /// Entries that were not blank.
    pub cleaned_count: usize,
    /// Distinct entries after trimming and lowercasing.
    pub unique_count: usize,
    /// The distinct entries, in first-seen order.
    pub unique: Vec<String>,
}

/// Drop blank entries, trim and lowercase the rest, and deduplicate.
pub fn clean_text<S: AsRef<str>>(items: &[S]) -> TextSummary {
    let cleaned: Vec<String> = items.iter().filter_map(|s| trimmed_lowercase(s)).collect();
    let cleaned_count = cleaned.len();
    let unique = unique_in_order(cleaned);

    TextSummary {
        original_count: items.len(),
        cleaned_count,
        unique_count: unique.len(),
        unique,
    }
}

/// Group items by key, preserving first-seen key order and item order.
///
/// Items whose key is `None` are dropped.
pub fn group_by<T, K, I, F>(items: I, mut key_fn: F) -> IndexMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq,
    F: FnMut(&T) -> Option<K>,
{
    let mut grouped: IndexMap<K, Vec<T>> = IndexMap::new();

    for item in items {
        if let Some(key) = key_fn(&item) {
            grouped.entry(key).or_default().push(item);
        }
    }

    grouped
}

/// Values strictly greater than the mean of `values`, in input order.
pub fn above_mean(values: &[f64]) -> Result<Vec<f64>> {
    let stats = compute_statistics(values.iter().copied())?;
    Ok(values
        .iter()
        .copied()
        .filter(|v| *v > stats.mean())
        .collect())
}

/// The item with the highest score; the earliest one wins ties.
pub fn best_by<T, F>(items: &[T], mut score_fn: F) -> Option<&T>
where
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(&T, f64)> = None;

    for item in items {
        let score = score_fn(item);
        match best {
            Some((_, top)) if score <= top => {}
            _ if score.is_nan() => {}
            _ => best = Some((item, score)),
        }
    }

    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AggregateError;

    #[test]
    fn test_word_frequency() {
        let text = "Python is great. Python is powerful. I love Python programming.";
        let freq = word_frequency(text, 2);

        assert_eq!(freq.total_words, 10);
        assert_eq!(freq.unique_words, 7);
        assert_eq!(
            freq.most_common,
            vec![("python".to_string(), 3), ("is".to_string(), 2)]
        );
    }

    #[test]
    fn test_word_frequency_ignores_punctuation_tokens() {
        let freq = word_frequency("hello -- world !!", 5);
        assert_eq!(freq.total_words, 2);
    }

    #[test]
    fn test_grade_distribution() {
        let grades = vec![85.0, 92.0, 78.0, 96.0, 88.0, 76.0, 89.0, 94.0, 82.0, 90.0, 87.0, 93.0];
        let dist = grade_distribution(grades, &GradeScale::default());

        assert_eq!(dist.get(&Grade::A), Some(5));
        assert_eq!(dist.get(&Grade::B), Some(5));
        assert_eq!(dist.get(&Grade::C), Some(2));
        assert_eq!(dist.get(&Grade::F), None);
        assert_eq!(dist.total(), 12);
    }

    #[test]
    fn test_unique_in_order() {
        let unique = unique_in_order(vec![1, 2, 3, 2, 4, 3, 5, 1, 6]);
        assert_eq!(unique, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_clean_text() {
        let items = ["  Apple  ", "banana", "", "Cherry", "apple", "  ", "Banana"];
        let summary = clean_text(&items);

        assert_eq!(summary.original_count, 7);
        assert_eq!(summary.cleaned_count, 5);
        assert_eq!(summary.unique_count, 3);
        assert_eq!(summary.unique, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_group_by() {
        let products = vec![
            ("Laptop", "Electronics"),
            ("Book", "Education"),
            ("Phone", "Electronics"),
            ("Pen", "Education"),
            ("Tablet", "Electronics"),
        ];

        let grouped = group_by(products, |(_, category)| Some(*category));

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get_index(0).map(|(k, _)| *k), Some("Electronics"));
        assert_eq!(grouped.get("Electronics").map(|v| v.len()), Some(3));
        assert_eq!(grouped.get("Education").map(|v| v[1].0), Some("Pen"));
    }

    #[test]
    fn test_above_mean() {
        let above = above_mean(&[85.0, 92.0, 78.0, 96.0, 88.0]).unwrap();
        assert_eq!(above, vec![92.0, 96.0, 88.0]);
    }

    #[test]
    fn test_above_mean_empty() {
        assert_eq!(above_mean(&[]).unwrap_err(), AggregateError::EmptyInput);
    }

    #[test]
    fn test_best_by() {
        let sales = [
            ("Laptop", 5.0, 999.99),
            ("Mouse", 20.0, 25.50),
            ("Keyboard", 15.0, 75.00),
            ("Monitor", 8.0, 299.99),
        ];

        let best = best_by(&sales, |(_, qty, price)| qty * price);
        assert_eq!(best.map(|s| s.0), Some("Laptop"));
    }

    #[test]
    fn test_best_by_ties_and_empty() {
        let items = [("first", 1.0), ("second", 1.0)];
        assert_eq!(best_by(&items, |i| i.1).map(|i| i.0), Some("first"));

        let empty: [(&str, f64); 0] = [];
        assert!(best_by(&empty, |i| i.1).is_none());
    }
}
