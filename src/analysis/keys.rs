//! Key-extraction rules.
//!
//! Each rule maps an item to `Some(key)` or to `None` to skip the item, and
//! can be passed straight to [`build_frequency_table`](super::build_frequency_table).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Use the item itself as its key.
pub fn identity<T: Clone>(item: &T) -> Option<T> {
    Some(item.clone())
}

/// Lowercase a word and strip everything that is not alphanumeric.
///
/// Returns `None` when nothing is left (e.g. a lone punctuation mark).
pub fn normalized_word<S: AsRef<str>>(word: &S) -> Option<String> {
    let cleaned: String = word
        .as_ref()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Trim surrounding whitespace and lowercase; `None` for blank text.
pub fn trimmed_lowercase<S: AsRef<str>>(text: &S) -> Option<String> {
    let trimmed = text.as_ref().trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Letter grade for a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Lower bounds (inclusive) for each passing grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeScale {
    #[serde(default = "default_a")]
    pub a: f64,
    #[serde(default = "default_b")]
    pub b: f64,
    #[serde(default = "default_c")]
    pub c: f64,
    #[serde(default = "default_d")]
    pub d: f64,
}

impl Default for GradeScale {
    fn default() -> Self {
        Self {
            a: default_a(),
            b: default_b(),
            c: default_c(),
            d: default_d(),
        }
    }
}

fn default_a() -> f64 {
    90.0
}

fn default_b() -> f64 {
    80.0
}

fn default_c() -> f64 {
    70.0
}

fn default_d() -> f64 {
    60.0
}

impl GradeScale {
    /// Grade for `score`. NaN scores are skipped.
    pub fn grade(&self, score: f64) -> Option<Grade> {
        if score.is_nan() {
            return None;
        }

        let grade = if score >= self.a {
            Grade::A
        } else if score >= self.b {
            Grade::B
        } else if score >= self.c {
            Grade::C
        } else if score >= self.d {
            Grade::D
        } else {
            Grade::F
        };

        Some(grade)
    }

    /// Thresholds must strictly descend from A to D.
    pub fn is_valid(&self) -> bool {
        self.a > self.b && self.b > self.c && self.c > self.d
    }
}

/// Letter grade on the default scale.
pub fn letter_grade(score: &f64) -> Option<Grade> {
    GradeScale::default().grade(*score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(identity(&7), Some(7));
        assert_eq!(identity(&"x".to_string()), Some("x".to_string()));
    }

    #[test]
    fn test_normalized_word() {
        assert_eq!(normalized_word(&"Python."), Some("python".to_string()));
        assert_eq!(normalized_word(&"don't"), Some("dont".to_string()));
        assert_eq!(normalized_word(&"--"), None);
        assert_eq!(normalized_word(&""), None);
    }

    #[test]
    fn test_trimmed_lowercase() {
        assert_eq!(trimmed_lowercase(&"  Apple  "), Some("apple".to_string()));
        assert_eq!(trimmed_lowercase(&"   "), None);
    }

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(&95.0), Some(Grade::A));
        assert_eq!(letter_grade(&90.0), Some(Grade::A));
        assert_eq!(letter_grade(&89.9), Some(Grade::B));
        assert_eq!(letter_grade(&78.0), Some(Grade::C));
        assert_eq!(letter_grade(&60.0), Some(Grade::D));
        assert_eq!(letter_grade(&12.0), Some(Grade::F));
        assert_eq!(letter_grade(&f64::NAN), None);
    }

    #[test]
    fn test_custom_scale() {
        let scale = GradeScale {
            a: 93.0,
            b: 85.0,
            c: 75.0,
            d: 65.0,
        };
        assert!(scale.is_valid());
        assert_eq!(scale.grade(92.0), Some(Grade::B));
        assert_eq!(scale.grade(64.0), Some(Grade::F));
    }

    #[test]
    fn test_invalid_scale() {
        let scale = GradeScale {
            a: 50.0,
            ..GradeScale::default()
        };
        assert!(!scale.is_valid());
    }
}
