//! Integration tests for student-registry
//!
//! These exercise the loader, registry and ranker together against files
//! written to a temporary directory.

use proptest::prelude::*;
use std::io::Write;
use std::sync::Arc;
use student_registry::loader::{self, DEFAULT_SAMPLE_SIZE};
use student_registry::natural::natural_cmp;
use student_registry::ranker::{is_ranked, rank, ParallelRanker};
use student_registry::{RankError, Record, Registry};
use tempfile::tempdir;

fn shared_records(grades: &[(&str, f64)]) -> Vec<Arc<Record<String, String>>> {
    grades
        .iter()
        .map(|(id, grade)| {
            let mut r = Record::new(format!("Student {}", id), id.to_string(), "CSE", 2020);
            r.add_completed_course("OOPD".to_string(), *grade);
            Arc::new(r)
        })
        .collect()
}

#[test]
fn test_sample_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");

    loader::generate_sample_file(&path, DEFAULT_SAMPLE_SIZE).unwrap();
    assert!(path.exists());

    let outcome = loader::load_records::<String>(&path).unwrap();
    assert!(outcome.header_skipped);
    assert_eq!(outcome.records.len(), DEFAULT_SAMPLE_SIZE);
    assert_eq!(outcome.skipped_rows, 0);
    assert_eq!(outcome.dropped_courses, 0);

    let first = &outcome.records[0];
    assert_eq!(first.name(), "Student0");
    assert_eq!(first.id(), "2020CS1000");
    assert_eq!(first.grade(&"OOPD".to_string()), Some(7.0));
}

#[test]
fn test_registry_from_sample_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");
    loader::generate_sample_file(&path, 310).unwrap();

    let registry = Registry::new();
    let added = registry.extend(loader::load_records::<String>(&path).unwrap().into_shared());
    assert_eq!(added, 310);
    assert_eq!(registry.size(), 310);
    assert_eq!(registry.course_count(), 2);

    // Sample ids are generated in natural order already
    let arrival: Vec<_> = registry.insertion_order().iter().map(|r| r.id().clone()).collect();
    let ranked: Vec<_> = registry.ranked_order().iter().map(|r| r.id().clone()).collect();
    assert_eq!(arrival, ranked);

    // OOPD grade is 7.0 + (i % 31) * 0.1, so >= 9.0 means i % 31 >= 20: 11 of every 31
    let high = registry.students_with_grade(&"OOPD".to_string(), 9.0);
    assert_eq!(high.len(), 110);
    let grades: Vec<f64> = high
        .iter()
        .filter_map(|r| r.grade(&"OOPD".to_string()))
        .collect();
    assert!(grades.iter().all(|g| *g >= 9.0));
    assert!(grades.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_hand_written_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "name,roll,branch,year,courses").unwrap();
    writeln!(file, "Asha,2020CS1005,CSE,2020,OOPD:9.0").unwrap();
    writeln!(file, "broken row").unwrap();
    writeln!(file, "Ravi,2020CS1002,ECE,2020,OOPD:9.0;DSA:6.0").unwrap();
    writeln!(file, "Mira,2020CS1001,EEE,2021,OOPD:8.9").unwrap();
    drop(file);

    let outcome = loader::load_records::<String>(&path).unwrap();
    assert_eq!(outcome.skipped_rows, 1);

    let registry = Registry::new();
    registry.extend(outcome.into_shared());

    let arrival: Vec<_> = registry.insertion_order().iter().map(|r| r.id().clone()).collect();
    assert_eq!(arrival, vec!["2020CS1005", "2020CS1002", "2020CS1001"]);

    let ranked: Vec<_> = registry.ranked_order().iter().map(|r| r.id().clone()).collect();
    assert_eq!(ranked, vec!["2020CS1001", "2020CS1002", "2020CS1005"]);

    let top: Vec<_> = registry
        .students_with_grade(&"OOPD".to_string(), 9.0)
        .iter()
        .map(|r| r.id().clone())
        .collect();
    assert_eq!(top, vec!["2020CS1002", "2020CS1005"]);
}

#[test]
fn test_rank_loaded_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.csv");
    loader::generate_sample_file(&path, 1000).unwrap();

    let mut records = loader::load_records::<String>(&path).unwrap().into_shared();
    records.reverse();
    assert!(!is_ranked(&records));

    let report = ParallelRanker::new(3).unwrap().rank(&mut records).unwrap();
    assert!(is_ranked(&records));
    assert_eq!(records.len(), 1000);
    assert_eq!(report.chunk_sizes, vec![333, 333, 334]);
    assert_eq!(report.worker_timings.len(), 3);
    assert_eq!(records[0].id(), "2020CS1000");
    assert_eq!(records[999].id(), "2020CS1999");
}

#[test]
fn test_rank_invalid_worker_count() {
    let mut records = shared_records(&[("b", 1.0), ("a", 2.0)]);
    let result = rank(&mut records, 0);
    assert!(matches!(result, Err(RankError::InvalidWorkerCount { count: 0 })));
    assert_eq!(records[0].id(), "b");
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempdir().unwrap();
    assert!(loader::load_records::<String>(&dir.path().join("absent.csv")).is_err());
}

fn id_and_grade() -> impl Strategy<Value = Vec<(String, f64)>> {
    proptest::collection::vec(("[a-d]{1,2}[0-9]{1,3}", 0u8..=100), 1..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(id, g)| (id, f64::from(g) / 10.0))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_ranked_order_is_sorted_permutation(rows in id_and_grade()) {
        let registry = Registry::new();
        for (id, grade) in &rows {
            let mut r = Record::new("n", id.clone(), "CSE", 2020);
            r.add_completed_course("OOPD".to_string(), *grade);
            registry.add_owned(r);
        }

        let mut arrival: Vec<String> = registry.insertion_order().iter().map(|r| r.id().clone()).collect();
        let ranked: Vec<String> = registry.ranked_order().iter().map(|r| r.id().clone()).collect();

        prop_assert!(ranked.windows(2).all(|w| natural_cmp(&w[0], &w[1]) != std::cmp::Ordering::Greater));
        arrival.sort_by(|a, b| natural_cmp(a, b));
        prop_assert_eq!(arrival, ranked);
    }

    #[test]
    fn prop_index_complete_and_monotonic(rows in id_and_grade(), low in 0u8..=100, high in 0u8..=100) {
        let registry = Registry::new();
        let mut added = Vec::new();
        for (id, grade) in &rows {
            let mut r = Record::new("n", id.clone(), "CSE", 2020);
            r.add_completed_course("OOPD".to_string(), *grade);
            added.push(registry.add_owned(r));
        }

        let course = "OOPD".to_string();
        for record in &added {
            let grade = record.grade(&course).unwrap();
            let found = registry.students_with_grade(&course, grade);
            prop_assert!(found.iter().any(|r| Arc::ptr_eq(r, record)));
        }

        let (low, high) = (f64::from(low.min(high)) / 10.0, f64::from(low.max(high)) / 10.0);
        let wide = registry.students_with_grade(&course, low);
        let narrow = registry.students_with_grade(&course, high);
        prop_assert!(narrow.iter().all(|r| wide.iter().any(|w| Arc::ptr_eq(w, r))));
        prop_assert_eq!(registry.students_with_grade(&course, 0.0).len(), added.len());
    }
}
