//! Error types for student-registry
//!
//! This module defines the error hierarchy for:
//! - Parallel ranking (contract violations, worker failures)
//! - Loading records from delimited text files
//! - Configuration and CLI errors
//!
//! Recoverable conditions (malformed rows, unknown course codes) never reach
//! this module; they resolve locally into skipped rows or empty results.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the student-registry application
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Ranking errors
    #[error("Ranking error: {0}")]
    Rank(#[from] RankError),

    /// Record loading errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parallel ranker errors
#[derive(Error, Debug)]
pub enum RankError {
    /// Worker count outside the valid range
    #[error("Invalid worker count {count}: at least one worker is required")]
    InvalidWorkerCount { count: usize },

    /// Worker thread failure
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Thread could not be spawned
    #[error("Failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },
}

/// Record loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// Could not open the input file
    #[error("Could not open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read failed part-way through
    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// Sample file could not be written
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Invalid display limit
    #[error("Invalid limit {limit}: must be at least 1")]
    InvalidLimit { limit: usize },

    /// Invalid sample record count
    #[error("Invalid sample count {count}: must be at least 1")]
    InvalidCount { count: usize },

    /// Input file missing
    #[error("Input file '{path}' does not exist (run 'generate' first)")]
    MissingInput { path: PathBuf },
}

/// Result type alias for RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Result type alias for RankError
pub type RankResult<T> = std::result::Result<T, RankError>;

/// Result type alias for LoadError
pub type LoadResult<T> = std::result::Result<T, LoadError>;
