//! student-registry - In-Memory Academic Records Registry
//!
//! Entry point for the CLI application.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fmt::Display;
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use student_registry::config::{CliArgs, Command, CourseType, RunConfig};
use student_registry::loader::{self, LoadOutcome};
use student_registry::progress::{
    print_header, print_load_summary, print_rank_summary, print_record_line, print_truncation,
    ProgressReporter,
};
use student_registry::ranker::{is_ranked, ParallelRanker};
use student_registry::{Record, Registry};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Validate and create config
    let config = RunConfig::from_args(args).context("Invalid configuration")?;

    // Setup logging
    setup_logging(config.verbose)?;
    let show = config.show_progress;

    match config.command {
        Command::Generate { output, count } => run_generate(&output, count, show),
        Command::Show {
            input,
            limit,
            course_type,
        } => run_show(&input, limit, course_type, show),
        Command::Rank {
            input,
            workers,
            limit,
        } => run_rank(&input, workers, limit, show),
        Command::List { input, limit } => run_list(&input, limit, show),
        Command::Query {
            input,
            courses,
            min_grade,
            limit,
        } => run_query(&input, &courses, min_grade, limit, show),
        Command::Demo {
            output,
            count,
            workers,
        } => run_demo(&output, count, workers, show),
    }
}

fn run_generate(output: &Path, count: usize, show: bool) -> Result<()> {
    loader::generate_sample_file(output, count)
        .with_context(|| format!("Failed to create sample file '{}'", output.display()))?;

    if show {
        print_header("Sample Data");
        println!("  Created {} with {} records", output.display(), count);
    }
    Ok(())
}

/// Load a file, print the load summary, and refuse to continue with nothing
fn load<C: FromStr + Ord>(input: &Path, show: bool) -> Result<LoadOutcome<C>> {
    let outcome = loader::load_records::<C>(input)
        .with_context(|| format!("Failed to load '{}'", input.display()))?;

    if show {
        print_load_summary(
            &input.display().to_string(),
            outcome.records.len(),
            outcome.skipped_rows,
            outcome.bytes_read,
        );
    }

    if outcome.dropped_courses > 0 {
        warn!(dropped = outcome.dropped_courses, "Course entries dropped while loading");
    }

    if outcome.records.is_empty() {
        bail!("No records found in '{}'", input.display());
    }

    Ok(outcome)
}

fn run_show(input: &Path, limit: usize, course_type: CourseType, show: bool) -> Result<()> {
    if show {
        print_header(match course_type {
            CourseType::Text => "Records (text course codes)",
            CourseType::Numeric => "Records (numeric course codes)",
        });
    }

    match course_type {
        CourseType::Text => show_records(&load::<String>(input, show)?.records, limit),
        CourseType::Numeric => show_records(&load::<u32>(input, show)?.records, limit),
    }
    Ok(())
}

fn show_records<C: Display + Ord>(records: &[Record<String, C>], limit: usize) {
    println!();
    for (i, record) in records.iter().take(limit).enumerate() {
        println!("  Student {}:", i + 1);
        println!("  {}", record);
        println!();
    }
    print_truncation(limit.min(records.len()), records.len());
}

fn run_rank(input: &Path, workers: usize, limit: usize, show: bool) -> Result<()> {
    if show {
        print_header("Parallel Ranking");
    }

    let mut records = load::<String>(input, show)?.into_shared();
    let ranker = ParallelRanker::new(workers)?;

    let progress = show.then(ProgressReporter::new);
    if let Some(ref p) = progress {
        p.set_status(&format!(
            "Sorting {} records with {} workers...",
            records.len(),
            ranker.worker_count()
        ));
    }

    let report = ranker.rank(&mut records).context("Ranking failed")?;

    if let Some(ref p) = progress {
        p.finish_and_clear();
    }

    let verified = is_ranked(&records);
    print_rank_summary(&report, verified);

    println!("First {} (ranked):", limit.min(records.len()));
    for record in records.iter().take(limit) {
        print_record_line(record.id(), record.name(), None);
    }

    if records.len() > limit {
        println!("Last {} (ranked):", limit);
        for record in &records[records.len() - limit..] {
            print_record_line(record.id(), record.name(), None);
        }
    }

    if !verified {
        bail!("Ranked output is out of order");
    }
    Ok(())
}

fn build_registry(input: &Path, show: bool) -> Result<Registry<String, String>> {
    let records = load::<String>(input, show)?.into_shared();

    let registry = Registry::new();
    let added = registry.extend(records);
    info!(records = added, courses = registry.course_count(), "Registry built");

    Ok(registry)
}

fn run_list(input: &Path, limit: usize, show: bool) -> Result<()> {
    if show {
        print_header("Registry Orderings");
    }

    let registry = build_registry(input, show)?;

    println!();
    println!("Insertion order (first {}):", limit.min(registry.size()));
    let arrival = registry.insertion_order();
    for record in arrival.iter().take(limit) {
        print_record_line(record.id(), record.name(), None);
    }
    print_truncation(limit.min(arrival.len()), arrival.len());

    println!();
    println!("Ranked order (first {}):", limit.min(registry.size()));
    let ranked = registry.ranked_order();
    for record in ranked.iter().take(limit) {
        print_record_line(record.id(), record.name(), None);
    }
    print_truncation(limit.min(ranked.len()), ranked.len());

    Ok(())
}

fn run_query(input: &Path, courses: &[String], min_grade: f64, limit: usize, show: bool) -> Result<()> {
    if show {
        print_header("Grade Queries");
    }

    let registry = build_registry(input, show)?;

    for course in courses {
        let matches = registry.students_with_grade(course, min_grade);

        println!();
        println!(
            "Students with grade >= {:.1} in {}: {} found",
            min_grade,
            course,
            matches.len()
        );
        for record in matches.iter().take(limit) {
            print_record_line(record.id(), record.name(), record.grade(course));
        }
        print_truncation(limit.min(matches.len()), matches.len());
    }

    Ok(())
}

fn run_demo(output: &Path, count: usize, workers: usize, show: bool) -> Result<()> {
    run_generate(output, count, show)?;
    run_show(output, 3, CourseType::Text, show)?;
    run_show(output, 3, CourseType::Numeric, show)?;
    run_rank(output, workers, 5, show)?;
    run_list(output, 10, show)?;
    run_query(output, &["OOPD".to_string(), "DSA".to_string()], 9.0, 10, show)
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("student_registry=debug,warn")
    } else {
        EnvFilter::new("student_registry=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
