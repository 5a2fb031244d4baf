//! Markdown and JSON report generation.
//!
//! This module renders a [`Report`] built from the aggregation results.

use crate::analysis::SummaryStatistics;
use crate::cli::OutputFormat;
use crate::models::{FrequencyReport, Report, ReportMetadata};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Generate a complete Markdown report.
///
/// `precision` is the number of decimal places used for statistics.
pub fn generate_markdown_report(report: &Report, precision: usize) -> String {
    let mut output = String::new();

    output.push_str("# Tally Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));

    if let Some(ref frequency) = report.frequency {
        output.push_str(&generate_frequency_section("Frequencies", frequency));
    }

    if let Some(ref stats) = report.statistics {
        output.push_str(&generate_statistics_section(stats, precision));
    }

    if let Some(ref grades) = report.grades {
        output.push_str(&generate_frequency_section("Grade Distribution", grades));
    }

    if let Some(ref above) = report.above_mean {
        output.push_str(&generate_above_mean_section(above, precision));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!("- **Mode:** {}\n", metadata.mode));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Items Read:** {}\n", metadata.items_read));
    if metadata.items_skipped > 0 {
        section.push_str(&format!("- **Items Skipped:** {}\n", metadata.items_skipped));
    }
    section.push('\n');

    section
}

/// Generate a frequency table section.
fn generate_frequency_section(title: &str, frequency: &FrequencyReport) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", title));
    section.push_str(&format!(
        "*Counted: {} | Distinct: {}*\n\n",
        frequency.total, frequency.distinct
    ));

    if frequency.entries.is_empty() {
        section.push_str("Nothing to count.\n\n");
        return section;
    }

    section.push_str("| # | Key | Count | Share |\n");
    section.push_str("|---:|:---|---:|---:|\n");

    for (i, entry) in frequency.entries.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {} | {:.1}% |\n",
            i + 1,
            escape_cell(&entry.key),
            entry.count,
            entry.percent
        ));
    }

    if frequency.is_truncated() {
        section.push_str(&format!(
            "\n*{} more not shown.*\n",
            frequency.distinct - frequency.entries.len()
        ));
    }
    section.push('\n');

    section
}

/// Generate the summary statistics section.
fn generate_statistics_section(stats: &SummaryStatistics, precision: usize) -> String {
    let mut section = String::new();

    section.push_str("## Statistics\n\n");
    section.push_str("| Count | Sum | Mean | Min | Max | Range |\n");
    section.push_str("|---:|---:|---:|---:|---:|---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} |\n\n",
        stats.count(),
        format_number(stats.sum(), precision),
        format_number(stats.mean(), precision),
        format_number(stats.minimum(), precision),
        format_number(stats.maximum(), precision),
        format_number(stats.range(), precision),
    ));

    // Every value ties for the mode when all are distinct; not worth listing
    if stats.mode().len() < stats.count() {
        let mode: Vec<String> = stats
            .mode()
            .iter()
            .map(|v| format_number(*v, precision))
            .collect();
        section.push_str(&format!("**Most frequent:** {}\n\n", mode.join(", ")));
    }

    section
}

fn generate_above_mean_section(values: &[f64], precision: usize) -> String {
    let mut section = String::new();

    section.push_str("## Above Mean\n\n");
    if values.is_empty() {
        section.push_str("No values above the mean.\n\n");
    } else {
        let rendered: Vec<String> = values.iter().map(|v| format_number(*v, precision)).collect();
        section.push_str(&rendered.join(", "));
        section.push_str("\n\n");
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by tally v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Format with `precision` decimals, dropping them for whole numbers.
fn format_number(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.*}", precision, value)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Write a Markdown report to a file.
pub fn write_report(report: &Report, precision: usize, path: &Path) -> Result<()> {
    let content = generate_markdown_report(report, precision);

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write a JSON report to a file.
pub fn write_json_report(report: &Report, path: &Path) -> Result<()> {
    let content = generate_json_report(report)?;

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

/// Write the report to `path` in the requested format.
pub fn save_report(
    report: &Report,
    format: OutputFormat,
    precision: usize,
    path: &Path,
) -> Result<()> {
    let written = match format {
        OutputFormat::Markdown => write_report(report, precision, path),
        OutputFormat::Json => write_json_report(report, path),
    };

    written.with_context(|| format!("Failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{build_frequency_table, compute_statistics};
    use chrono::Utc;

    fn create_test_metadata() -> ReportMetadata {
        ReportMetadata {
            source: "scores.txt".to_string(),
            mode: "grades".to_string(),
            generated_at: Utc::now(),
            items_read: 6,
            items_skipped: 1,
        }
    }

    fn create_test_report() -> Report {
        let scores = [85.0, 92.0, 78.0, 96.0, 88.0];
        let table = build_frequency_table(vec!["a", "b", "a", "c"], |s| Some(*s));

        let mut report = Report::new(create_test_metadata());
        report.frequency = Some(FrequencyReport::new(&table, table.top(2)));
        report.statistics = Some(compute_statistics(scores).unwrap());
        report.above_mean = Some(vec![92.0, 96.0, 88.0]);
        report
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report, 2);

        assert!(markdown.contains("# Tally Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Frequencies"));
        assert!(markdown.contains("| 1 | a | 2 | 50.0% |"));
        assert!(markdown.contains("*1 more not shown.*"));
        assert!(markdown.contains("## Statistics"));
        assert!(markdown.contains("| 5 | 439 | 87.80 | 78 | 96 | 18 |"));
        assert!(markdown.contains("## Above Mean"));
        assert!(!markdown.contains("## Grade Distribution"));
    }

    #[test]
    fn test_generate_metadata_section() {
        let section = generate_metadata_section(&create_test_metadata());

        assert!(section.contains("scores.txt"));
        assert!(section.contains("grades"));
        assert!(section.contains("Items Skipped:** 1"));
    }

    #[test]
    fn test_statistics_section_lists_mode() {
        let stats = compute_statistics([1.0, 2.0, 2.0]).unwrap();
        let section = generate_statistics_section(&stats, 1);
        assert!(section.contains("**Most frequent:** 2"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"frequency\""));
        assert!(json.contains("\"mean\": 87.8"));
        assert!(!json.contains("\"grades\""));
    }

    #[test]
    fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let report = create_test_report();

        let md_path = dir.path().join("report.md");
        write_report(&report, 2, &md_path).unwrap();
        assert!(std::fs::read_to_string(&md_path).unwrap().starts_with("# Tally Report"));

        let json_path = dir.path().join("report.json");
        write_json_report(&report, &json_path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["statistics"]["count"], 5);
    }

    #[test]
    fn test_save_report_by_format() {
        let dir = tempfile::tempdir().unwrap();
        let report = create_test_report();

        let md_path = dir.path().join("out.md");
        save_report(&report, OutputFormat::Markdown, 1, &md_path).unwrap();
        let markdown = std::fs::read_to_string(&md_path).unwrap();
        assert!(markdown.contains("| 5 | 439 | 87.8 | 78 | 96 | 18 |"));

        let json_path = dir.path().join("out.json");
        save_report(&report, OutputFormat::Json, 1, &json_path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["source"], "scores.txt");
    }

    #[test]
    fn test_save_report_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.md");

        let err = save_report(&create_test_report(), OutputFormat::Markdown, 2, &path).unwrap_err();
        assert!(err.to_string().contains("Failed to write report to"));
    }
}
