//! Input reading and tokenization.
//!
//! This module turns raw text from a file or stdin into the sequences the
//! aggregator works on: words, lines and numeric values.

use crate::analysis::normalized_word;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Settings that control how words become frequency keys.
#[derive(Debug, Clone)]
pub struct WordFilter {
    /// Keep the original letter case instead of lowercasing.
    pub case_sensitive: bool,
    /// Words shorter than this (in characters) are skipped.
    pub min_length: usize,
    /// Normalized words that are never counted.
    pub stop_words: HashSet<String>,
}

impl Default for WordFilter {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            min_length: 1,
            stop_words: HashSet::new(),
        }
    }
}

impl From<&crate::config::FrequencyConfig> for WordFilter {
    fn from(config: &crate::config::FrequencyConfig) -> Self {
        Self {
            case_sensitive: config.case_sensitive,
            min_length: config.min_word_length,
            stop_words: config
                .stop_words
                .iter()
                .filter_map(|w| normalized_word(w))
                .collect(),
        }
    }
}

impl WordFilter {
    /// Key for `word`, or `None` if it should be skipped.
    pub fn key(&self, word: &str) -> Option<String> {
        let normalized = normalized_word(&word)?;

        if normalized.chars().count() < self.min_length || self.stop_words.contains(&normalized) {
            return None;
        }

        if self.case_sensitive {
            Some(word.chars().filter(|c| c.is_alphanumeric()).collect())
        } else {
            Some(normalized)
        }
    }
}

/// Numbers parsed from text, plus the tokens that were not numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedNumbers {
    pub values: Vec<f64>,
    pub rejected: Vec<String>,
}

/// Read the whole input from `path`, or from stdin when `path` is `None`.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("Reading input from {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            debug!("Reading input from stdin");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Split text into whitespace-separated tokens.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Split text into lines, keeping blank ones.
pub fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Parse every whitespace- or comma-separated token as a number.
///
/// Tokens that do not parse, or parse to a non-finite value, are collected
/// in `rejected` and logged.
pub fn parse_numbers(text: &str) -> ParsedNumbers {
    let mut parsed = ParsedNumbers::default();

    for token in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => parsed.values.push(value),
            _ => {
                warn!("Skipping invalid number: {}", token);
                parsed.rejected.push(token.to_string());
            }
        }
    }

    debug!(
        "Parsed {} numbers ({} rejected)",
        parsed.values.len(),
        parsed.rejected.len()
    );

    parsed
}
