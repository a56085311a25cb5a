//! Secondary grade index
//!
//! Maps course code -> grade -> records, so "everyone with at least X in
//! course C" is a range scan instead of a full pass over the registry.

use crate::natural::NaturalKey;
use crate::record::Record;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

/// A grade with a total order, usable as a map key
///
/// Ordering follows `f64::total_cmp`, so NaN sorts above every number.
/// Negative zero is stored as zero so it compares equal to `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct Grade(f64);

impl Grade {
    pub fn new(value: f64) -> Self {
        // -0.0 + 0.0 == +0.0
        Self(value + 0.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Grade {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq for Grade {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Grade {}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Shared record ordered by the natural order of its identifier.
///
/// Distinct records with equal ids are told apart by allocation, so a bucket
/// keeps every one of them.
#[derive(Debug)]
struct ByNaturalId<K, C>(Arc<Record<K, C>>);

impl<K, C> ByNaturalId<K, C> {
    fn address(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl<K: NaturalKey, C: Ord> PartialEq for ByNaturalId<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: NaturalKey, C: Ord> Eq for ByNaturalId<K, C> {}

impl<K: NaturalKey, C: Ord> PartialOrd for ByNaturalId<K, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: NaturalKey, C: Ord> Ord for ByNaturalId<K, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .id()
            .natural_cmp(other.0.id())
            .then_with(|| self.address().cmp(&other.address()))
    }
}

type Bucket<K, C> = BTreeSet<ByNaturalId<K, C>>;

/// Course code -> grade -> records holding that grade
#[derive(Debug)]
pub struct GradeIndex<K, C> {
    courses: BTreeMap<C, BTreeMap<Grade, Bucket<K, C>>>,
}

impl<K, C> Default for GradeIndex<K, C> {
    fn default() -> Self {
        Self {
            courses: BTreeMap::new(),
        }
    }
}

impl<K: NaturalKey, C: Ord + Clone> GradeIndex<K, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every (course, grade) pair the record currently holds.
    ///
    /// NaN grades satisfy no threshold and are left out.
    pub fn insert(&mut self, record: &Arc<Record<K, C>>) {
        for (code, grade) in record.course_grades() {
            if grade.is_nan() {
                continue;
            }
            self.courses
                .entry(code.clone())
                .or_default()
                .entry(Grade::new(grade))
                .or_default()
                .insert(ByNaturalId(Arc::clone(record)));
        }
    }

    /// Records with a grade of at least `min_grade` in `code`.
    ///
    /// Ascending by grade, then natural id order within a grade. A record
    /// appears at most once. Unknown courses give an empty result.
    pub fn at_least(&self, code: &C, min_grade: f64) -> Vec<Arc<Record<K, C>>> {
        let Some(grades) = self.courses.get(code) else {
            return Vec::new();
        };
        if min_grade.is_nan() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut matches = Vec::new();

        for bucket in grades.range(Grade::new(min_grade)..).map(|(_, bucket)| bucket) {
            for entry in bucket {
                if seen.insert(entry.address()) {
                    matches.push(Arc::clone(&entry.0));
                }
            }
        }

        matches
    }

    /// Number of distinct courses indexed
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Indexed course codes in ascending order
    pub fn courses(&self) -> impl Iterator<Item = &C> + '_ {
        self.courses.keys()
    }
}
