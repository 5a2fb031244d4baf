//! Report assembly.
//!
//! Runs the aggregation selected by [`Mode`] over the input text and
//! collects the results into a [`Report`].

use crate::analysis::{
    above_mean, build_frequency_table, compute_statistics, grade_distribution, most_common,
    trimmed_lowercase, FrequencyTable,
};
use crate::cli::Mode;
use crate::config::Config;
use crate::error::Result;
use crate::input::{lines, parse_numbers, words, WordFilter};
use crate::models::{FrequencyReport, Report, ReportMetadata};
use chrono::Utc;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Aggregate `text` according to `mode` and build a report.
///
/// Fails with `InvalidArgument` for a negative `top`, and with `EmptyInput`
/// when a numeric mode finds no numbers.
pub fn build_report(mode: Mode, text: &str, source: &str, config: &Config) -> Result<Report> {
    let mut metadata = ReportMetadata {
        source: source.to_string(),
        mode: format!("{:?}", mode).to_lowercase(),
        generated_at: Utc::now(),
        items_read: 0,
        items_skipped: 0,
    };

    match mode {
        Mode::Words => {
            let tokens = words(text);
            let filter = WordFilter::from(&config.frequency);
            let table = build_frequency_table(tokens.iter(), |w| filter.key(w));

            metadata.items_read = tokens.len();
            metadata.items_skipped = tokens.len() - table.total();

            let mut report = Report::new(metadata);
            report.frequency = Some(rank(&table, config)?);
            Ok(report)
        }
        Mode::Lines => {
            let all_lines = lines(text);
            let table = build_frequency_table(all_lines.iter(), |l| trimmed_lowercase(*l));

            metadata.items_read = all_lines.len();
            metadata.items_skipped = all_lines.len() - table.total();

            let mut report = Report::new(metadata);
            report.frequency = Some(rank(&table, config)?);
            Ok(report)
        }
        Mode::Numbers | Mode::Grades => {
            let parsed = parse_numbers(text);
            metadata.items_read = parsed.values.len() + parsed.rejected.len();
            metadata.items_skipped = parsed.rejected.len();

            let stats = compute_statistics(parsed.values.iter().copied())?;
            let mut report = Report::new(metadata);
            report.above_mean = Some(above_mean(&parsed.values)?);

            if mode == Mode::Grades {
                let table = grade_distribution(parsed.values.iter().copied(), &config.grades);
                let mut ranked = table.top(table.len());
                ranked.sort_by_key(|(grade, _)| *grade);
                report.grades = Some(FrequencyReport::new(&table, ranked));
            }

            report.statistics = Some(stats);
            Ok(report)
        }
    }
}

/// Rank `table` per the configured `top` / `include_all_entries`.
fn rank<K>(table: &FrequencyTable<K>, config: &Config) -> Result<FrequencyReport>
where
    K: Hash + Eq + Clone + fmt::Display,
{
    // A negative top is rejected even when every entry is reported
    let top = config.frequency.top;
    let n = if config.report.include_all_entries && top >= 0 {
        table.len() as i64
    } else {
        top
    };
    let ranked = most_common(table, n)?;

    debug!("Ranked {} of {} distinct keys", ranked.len(), table.len());
    Ok(FrequencyReport::new(table, ranked))
}
