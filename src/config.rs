//! Configuration types for student-registry
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use crate::loader::DEFAULT_SAMPLE_SIZE;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Maximum reasonable worker count
pub const MAX_WORKERS: usize = 512;

/// Default input/output file for records
pub const DEFAULT_INPUT: &str = "students.csv";

/// In-memory student registry with natural-order ranking
#[derive(Parser, Debug, Clone)]
#[command(
    name = "student-registry",
    version,
    about = "In-memory student registry with natural-order ranking and parallel sorting",
    long_about = "Loads student records from a comma-delimited file into an in-memory registry.\n\n\
                  Records are kept in arrival order and in natural roll-number order, with a\n\
                  per-course grade index for threshold queries. The 'rank' command benchmarks\n\
                  a chunked multi-threaded sort over the same records.",
    after_help = "EXAMPLES:\n    \
        student-registry generate -n 3000\n    \
        student-registry show --course-type numeric\n    \
        student-registry rank -w 4\n    \
        student-registry query --course OOPD --min-grade 9.0\n    \
        student-registry demo"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode - suppress headers and progress output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a sample records file
    Generate {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
        output: PathBuf,

        /// Number of records to generate
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_SIZE, value_name = "NUM")]
        count: usize,
    },

    /// Print the first few records from a file
    Show {
        /// Input file
        #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
        input: PathBuf,

        /// Number of records to print
        #[arg(short = 'n', long, default_value = "3", value_name = "NUM")]
        limit: usize,

        /// Course code type to parse the file with
        #[arg(long, value_enum, default_value_t = CourseType::Text)]
        course_type: CourseType,
    },

    /// Sort records with the parallel ranker and report timings
    Rank {
        /// Input file
        #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
        input: PathBuf,

        /// Number of worker threads
        #[arg(short = 'w', long, default_value_t = default_workers(), value_name = "NUM")]
        workers: usize,

        /// Records to print from each end of the result
        #[arg(short = 'n', long, default_value = "5", value_name = "NUM")]
        limit: usize,
    },

    /// List registry records in arrival and ranked order
    List {
        /// Input file
        #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
        input: PathBuf,

        /// Records to print per ordering
        #[arg(short = 'n', long, default_value = "10", value_name = "NUM")]
        limit: usize,
    },

    /// Find students with at least a given grade in a course
    Query {
        /// Input file
        #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
        input: PathBuf,

        /// Course code (repeatable)
        #[arg(short, long = "course", value_name = "CODE", action = clap::ArgAction::Append, required = true)]
        courses: Vec<String>,

        /// Minimum grade (inclusive)
        #[arg(short = 'g', long, default_value = "9.0", value_name = "GRADE")]
        min_grade: f64,

        /// Matches to print per course
        #[arg(short = 'n', long, default_value = "10", value_name = "NUM")]
        limit: usize,
    },

    /// Generate a sample file and run every command against it
    Demo {
        /// Sample file to create
        #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
        output: PathBuf,

        /// Number of sample records
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_SIZE, value_name = "NUM")]
        count: usize,

        /// Number of worker threads for ranking
        #[arg(short = 'w', long, default_value = "2", value_name = "NUM")]
        workers: usize,
    },
}

/// Course code representation used when parsing a file
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseType {
    /// Text course codes such as "OOPD"
    Text,
    /// Integer course codes such as 101
    Numeric,
}

fn default_workers() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Validated command
    pub command: Command,

    /// Show headers and progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl RunConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        match &args.command {
            Command::Generate { count, .. } => validate_count(*count)?,
            Command::Show { input, limit, .. } | Command::List { input, limit } => {
                validate_input(input)?;
                validate_limit(*limit)?;
            }
            Command::Rank {
                input,
                workers,
                limit,
            } => {
                validate_input(input)?;
                validate_workers(*workers)?;
                validate_limit(*limit)?;
            }
            Command::Query { input, limit, .. } => {
                validate_input(input)?;
                validate_limit(*limit)?;
            }
            Command::Demo { count, workers, .. } => {
                validate_count(*count)?;
                validate_workers(*workers)?;
            }
        }

        Ok(Self {
            command: args.command,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }
}

fn validate_workers(count: usize) -> Result<(), ConfigError> {
    if count == 0 || count > MAX_WORKERS {
        return Err(ConfigError::InvalidWorkerCount {
            count,
            max: MAX_WORKERS,
        });
    }
    Ok(())
}

fn validate_limit(limit: usize) -> Result<(), ConfigError> {
    if limit == 0 {
        return Err(ConfigError::InvalidLimit { limit });
    }
    Ok(())
}

fn validate_count(count: usize) -> Result<(), ConfigError> {
    if count == 0 {
        return Err(ConfigError::InvalidCount { count });
    }
    Ok(())
}

fn validate_input(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let config = RunConfig::from_args(parse(&["student-registry", "generate"])).unwrap();
        match config.command {
            Command::Generate { output, count } => {
                assert_eq!(output, PathBuf::from(DEFAULT_INPUT));
                assert_eq!(count, DEFAULT_SAMPLE_SIZE);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(config.show_progress);
        assert!(!config.verbose);
    }

    #[test]
    fn test_verbose_flag_reaches_config() {
        let config = RunConfig::from_args(parse(&["student-registry", "generate", "-v"])).unwrap();
        assert!(config.verbose);
        let config = RunConfig::from_args(parse(&["student-registry", "-v", "generate"])).unwrap();
        assert!(config.verbose);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let result = RunConfig::from_args(parse(&["student-registry", "rank", "-i", path, "-w", "0"]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidWorkerCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_missing_input_rejected() {
        let result = RunConfig::from_args(parse(&[
            "student-registry",
            "list",
            "-i",
            "/nonexistent/students.csv",
        ]));
        assert!(matches!(result, Err(ConfigError::MissingInput { .. })));
    }

    #[test]
    fn test_query_courses_and_global_flags() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let config = RunConfig::from_args(parse(&[
            "student-registry",
            "query",
            "-i",
            path,
            "--course",
            "OOPD",
            "--course",
            "DSA",
            "-g",
            "8.5",
            "-q",
        ]))
        .unwrap();

        assert!(!config.show_progress);
        match config.command {
            Command::Query {
                courses, min_grade, ..
            } => {
                assert_eq!(courses, vec!["OOPD", "DSA"]);
                assert!((min_grade - 8.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_zero_limit_rejected() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let result = RunConfig::from_args(parse(&["student-registry", "show", "-i", path, "-n", "0"]));
        assert!(matches!(result, Err(ConfigError::InvalidLimit { limit: 0 })));
    }
}
