//! Progress and report output
//!
//! Spinner while long operations run, plus the formatted summaries the CLI
//! prints for loads, rankings and queries.

use crate::ranker::RankReport;
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::time::Duration;

/// Spinner shown while a long operation runs
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Format a duration as milliseconds with microsecond precision
pub fn format_millis(duration: Duration) -> String {
    format!("{:.3} ms", duration.as_secs_f64() * 1000.0)
}

/// Print a section header
pub fn print_header(title: &str) {
    println!();
    println!(
        "{} {}",
        style("student-registry").cyan().bold(),
        style(title).bold()
    );
    println!("{}", style("─".repeat(50)).dim());
}

/// Print what a load produced
pub fn print_load_summary(source: &str, records: usize, skipped: usize, bytes: u64) {
    println!(
        "  {} {} ({})",
        style("Source:").bold(),
        source,
        format_size(bytes, BINARY)
    );
    println!(
        "  {} {}",
        style("Records:").bold(),
        format_number(records as u64)
    );
    if skipped > 0 {
        println!(
            "  {} {}",
            style("Skipped rows:").yellow().bold(),
            format_number(skipped as u64)
        );
    }
}

/// Print one `id - name` line, optionally with a grade
pub fn print_record_line(id: impl Display, name: &str, grade: Option<f64>) {
    match grade {
        Some(grade) => println!("  {} ({}) - Grade: {:.1}", name, id, grade),
        None => println!("  {} - {}", id, name),
    }
}

/// Print "... (showing first N of M)" when output was truncated
pub fn print_truncation(shown: usize, total: usize) {
    if total > shown {
        println!(
            "  {}",
            style(format!(
                "... (showing first {} of {})",
                shown,
                format_number(total as u64)
            ))
            .dim()
        );
    }
}

/// Print the timings of a ranking run
pub fn print_rank_summary(report: &RankReport, verified: bool) {
    println!();
    println!("{}", style("Ranking Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());

    for (id, (elapsed, size)) in report
        .worker_timings
        .iter()
        .zip(&report.chunk_sizes)
        .enumerate()
    {
        println!(
            "  {} {} ({} records)",
            style(format!("Worker {}:", id)).bold(),
            format_millis(*elapsed),
            format_number(*size as u64)
        );
    }

    println!("  {} {}", style("Merge:").bold(), format_millis(report.merge_time));
    println!(
        "  {} {} ({:.0} records/sec)",
        style("Total:").bold(),
        format_millis(report.total_time),
        report.records_per_second()
    );

    let verdict = if verified {
        style("PASSED").green().bold()
    } else {
        style("FAILED").red().bold()
    };
    println!("  {} {}", style("Verification:").bold(), verdict);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(Duration::from_micros(1500)), "1.500 ms");
        assert_eq!(format_millis(Duration::ZERO), "0.000 ms");
    }
}
