//! Loading records from comma-delimited files
//!
//! Row format:
//!
//! ```text
//! name, id, branch, startYear[, code:grade;code:grade;...]
//! ```
//!
//! Malformed rows are skipped and counted rather than reported as errors;
//! only I/O failures surface as [`LoadError`]. Course grades read from a
//! file are recorded as completed courses.

pub mod sample;

pub use sample::{generate_sample_file, write_sample, DEFAULT_SAMPLE_SIZE, SAMPLE_HEADER};

use crate::error::{LoadError, LoadResult};
use crate::record::Record;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

/// Column names that mark the first line as a header
static HEADER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(name|roll|roll[ _]?(no|number)|id|branch|start(ing)?[ _]?year|year|courses?)$")
        .expect("Invalid header regex")
});

/// Records read from a file plus what had to be skipped
#[derive(Debug)]
pub struct LoadOutcome<C> {
    /// Well-formed records in file order
    pub records: Vec<Record<String, C>>,

    /// Rows skipped (too few fields or bad start year)
    pub skipped_rows: usize,

    /// Course entries dropped from otherwise valid rows
    pub dropped_courses: usize,

    /// Whether the first line was recognised as a header
    pub header_skipped: bool,

    /// Bytes consumed from the source
    pub bytes_read: u64,
}

impl<C> Default for LoadOutcome<C> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped_rows: 0,
            dropped_courses: 0,
            header_skipped: false,
            bytes_read: 0,
        }
    }
}

impl<C> LoadOutcome<C> {
    /// Wrap every record for sharing with a registry or ranker
    pub fn into_shared(self) -> Vec<Arc<Record<String, C>>> {
        self.records.into_iter().map(Arc::new).collect()
    }
}

/// Load records from a file
pub fn load_records<C: FromStr + Ord>(path: &Path) -> LoadResult<LoadOutcome<C>> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = parse_records(BufReader::new(file))?;

    info!(
        path = %path.display(),
        records = outcome.records.len(),
        skipped = outcome.skipped_rows,
        "Records loaded"
    );

    Ok(outcome)
}

/// Parse records from any buffered reader
pub fn parse_records<C: FromStr + Ord, R: BufRead>(reader: R) -> LoadResult<LoadOutcome<C>> {
    let mut outcome = LoadOutcome::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Read {
            line: index + 1,
            source,
        })?;
        outcome.bytes_read += line.len() as u64 + 1;

        if index == 0 && is_header(&line) {
            outcome.header_skipped = true;
            continue;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_row(line, &mut outcome.dropped_courses) {
            Some(record) => outcome.records.push(record),
            None => {
                debug!(line = index + 1, "Skipping malformed row");
                outcome.skipped_rows += 1;
            }
        }
    }

    Ok(outcome)
}

/// A line is a header when any of its fields is a known column name
pub fn is_header(line: &str) -> bool {
    line.split(',').any(|field| HEADER_TOKEN.is_match(field.trim()))
}

fn parse_row<C: FromStr + Ord>(line: &str, dropped: &mut usize) -> Option<Record<String, C>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 4 {
        return None;
    }

    let start_year = fields[3].parse::<u32>().ok()?;
    let mut record = Record::new(fields[0], fields[1].to_string(), fields[2], start_year);

    if let Some(courses) = fields.get(4) {
        for entry in courses.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            match parse_course::<C>(entry) {
                Some((code, grade)) => record.add_completed_course(code, grade),
                None => *dropped += 1,
            }
        }
    }

    Some(record)
}

fn parse_course<C: FromStr>(entry: &str) -> Option<(C, f64)> {
    let (code, grade) = entry.split_once(':')?;
    let (code, grade) = (code.trim(), grade.trim());
    if code.is_empty() || grade.is_empty() {
        return None;
    }

    let code = code.parse::<C>().ok()?;
    let grade = grade.parse::<f64>().ok().filter(|g| g.is_finite())?;
    Some((code, grade))
}
