//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Tally - frequency tables and summary statistics
///
/// Count words, lines or grades, or summarize a list of numbers, from a
/// file or stdin. Markdown/JSON reports.
///
/// Examples:
///   tally notes.txt
///   tally --mode numbers --format json scores.txt
///   echo "85 92 78 96 88" | tally --mode grades
///   tally --mode lines --all emails.txt
///   tally --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Input file (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// What to aggregate
    #[arg(short, long, default_value = "words", value_name = "MODE")]
    pub mode: Mode,

    /// Number of most common entries to report
    ///
    /// Overrides the config file. Must not be negative.
    #[arg(short = 'n', long, value_name = "COUNT", allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// Report every entry of the frequency table
    #[arg(short, long)]
    pub all: bool,

    /// Keep letter case when counting words
    #[arg(long)]
    pub case_sensitive: bool,

    /// Skip words shorter than this many characters
    #[arg(long, value_name = "CHARS")]
    pub min_length: Option<usize>,

    /// Words to ignore (comma-separated)
    ///
    /// Example: --stop-words the,a,an
    #[arg(long, value_name = "WORDS", value_delimiter = ',')]
    pub stop_words: Option<Vec<String>>,

    /// Output file path for the report (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .tally.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .tally.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// What the input sequence is and how it is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// Word frequencies (default)
    #[default]
    Words,
    /// Distinct line frequencies (trimmed, lowercased)
    Lines,
    /// Summary statistics over numbers
    Numbers,
    /// Summary statistics plus letter grade distribution
    Grades,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `[general] verbose` from the config file; `--quiet`
    /// still wins over it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Filter directives for the log subscriber.
    ///
    /// Explicit `--quiet`/`--verbose` flags take precedence, then `rust_log`
    /// (the `RUST_LOG` value), then the config file and the default level.
    pub fn log_directives(&self, config_verbose: bool, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(directives) if !directives.is_empty() && !self.quiet && !self.verbose => {
                directives.to_string()
            }
            _ => self.log_level(config_verbose).as_str().to_lowercase(),
        }
    }
}
