//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.tally.toml` files.

use crate::analysis::GradeScale;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".tally.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Frequency table settings.
    #[serde(default)]
    pub frequency: FrequencyConfig,

    /// Letter grade thresholds.
    #[serde(default)]
    pub grades: GradeScale,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Frequency table settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyConfig {
    /// Number of most common entries to report.
    #[serde(default = "default_top")]
    pub top: i64,

    /// Keep letter case when counting words.
    #[serde(default)]
    pub case_sensitive: bool,

    /// Minimum word length (in characters) to count.
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    /// Words that are never counted.
    #[serde(default)]
    pub stop_words: Vec<String>,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            top: default_top(),
            case_sensitive: false,
            min_word_length: default_min_word_length(),
            stop_words: Vec::new(),
        }
    }
}

fn default_top() -> i64 {
    5
}

fn default_min_word_length() -> usize {
    1
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal places for statistics in Markdown output.
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Include the full frequency table, not just the most common entries.
    #[serde(default)]
    pub include_all_entries: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            include_all_entries: false,
        }
    }
}

fn default_precision() -> usize {
    2
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.tally.toml` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        if !self.grades.is_valid() {
            bail!("Grade thresholds must strictly descend from a to d");
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(top) = args.top {
            self.frequency.top = top;
        }

        if args.case_sensitive {
            self.frequency.case_sensitive = true;
        }

        if let Some(min) = args.min_length {
            self.frequency.min_word_length = min;
        }

        if let Some(ref stop_words) = args.stop_words {
            self.frequency.stop_words = stop_words.clone();
        }

        if args.all {
            self.report.include_all_entries = true;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.frequency.top, 5);
        assert_eq!(config.grades.a, 90.0);
        assert_eq!(config.report.precision, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[frequency]
top = 3
stop_words = ["the", "a"]

[grades]
a = 93.0
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.frequency.top, 3);
        assert_eq!(config.frequency.min_word_length, 1);
        assert_eq!(config.frequency.stop_words, vec!["the", "a"]);
        assert_eq!(config.grades.a, 93.0);
        assert_eq!(config.grades.b, 80.0);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[frequency]"));
        assert!(toml_str.contains("[grades]"));
        assert!(toml_str.contains("[report]"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.frequency.top, 5);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[frequency]\ntop = 10\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.frequency.top, 10);
    }

    #[test]
    fn test_load_rejects_bad_grade_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[grades]\na = 50.0\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[frequency\ntop = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
