//! Sample data generation
//!
//! Produces a deterministic roster: three branches, four intake years and
//! two courses (OOPD, DSA) with grades cycling between 7.0 and 10.0.

use crate::error::{LoadError, LoadResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Number of records in the default sample file
pub const DEFAULT_SAMPLE_SIZE: usize = 3000;

/// Header line written at the top of sample files
pub const SAMPLE_HEADER: &str = "Name,RollNumber,Branch,StartingYear,Courses";

/// Write a header and `count` sample rows
pub fn write_sample<W: Write>(mut writer: W, count: usize) -> io::Result<()> {
    writeln!(writer, "{}", SAMPLE_HEADER)?;
    for i in 0..count {
        writeln!(writer, "{}", sample_row(i))?;
    }
    writer.flush()
}

/// Create (or overwrite) a sample file at `path`
pub fn generate_sample_file(path: &Path, count: usize) -> LoadResult<()> {
    let to_error = |source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    write_sample(BufWriter::new(file), count).map_err(to_error)?;

    info!(path = %path.display(), records = count, "Sample file written");
    Ok(())
}

fn sample_row(i: usize) -> String {
    let branch = match i % 3 {
        0 => "CSE",
        1 => "ECE",
        _ => "EEE",
    };
    let year = 2020 + i % 4;
    let oopd = 7.0 + (i % 31) as f64 * 0.1;
    let dsa = 7.0 + ((i * 3) % 31) as f64 * 0.1;

    format!(
        "Student{},2020CS{},{},{},OOPD:{:.1};DSA:{:.1}",
        i,
        1000 + i,
        branch,
        year,
        oopd,
        dsa
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rows() {
        assert_eq!(sample_row(0), "Student0,2020CS1000,CSE,2020,OOPD:7.0;DSA:7.0");
        assert_eq!(sample_row(1), "Student1,2020CS1001,ECE,2021,OOPD:7.1;DSA:7.3");
        assert_eq!(sample_row(30), "Student30,2020CS1030,CSE,2022,OOPD:10.0;DSA:9.8");
    }

    #[test]
    fn test_write_sample() {
        let mut buf = Vec::new();
        write_sample(&mut buf, 4).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], SAMPLE_HEADER);
        assert!(lines[4].starts_with("Student3,2020CS1003,CSE,2023,"));
    }
}
