//! Student record value type
//!
//! A record carries one student's identity, enrollment metadata and two
//! course-grade mappings: courses in progress and courses completed.
//! A course code lives in at most one of the two mappings; every mutator
//! below maintains that.
//!
//! Records are mutable only while owned. Once handed to a
//! [`Registry`](crate::registry::Registry) they are shared behind `Arc` and
//! frozen, so the registry's grade index can never go stale.

use std::collections::BTreeMap;
use std::fmt;

/// Course code to grade mapping
pub type CourseGrades<C> = BTreeMap<C, f64>;

/// One student's record, generic over identifier `K` and course code `C`
#[derive(Debug, Clone)]
pub struct Record<K, C> {
    /// Student name
    name: String,

    /// Identifier (roll number)
    id: K,

    /// Branch of study
    branch: String,

    /// Year of enrollment
    start_year: u32,

    /// Courses in progress
    active_courses: CourseGrades<C>,

    /// Courses completed
    completed_courses: CourseGrades<C>,
}

impl<K, C: Ord> Record<K, C> {
    /// Create a record with no courses
    pub fn new(name: impl Into<String>, id: K, branch: impl Into<String>, start_year: u32) -> Self {
        Self {
            name: name.into(),
            id,
            branch: branch.into(),
            start_year,
            active_courses: BTreeMap::new(),
            completed_courses: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &K {
        &self.id
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn start_year(&self) -> u32 {
        self.start_year
    }

    pub fn active_courses(&self) -> &CourseGrades<C> {
        &self.active_courses
    }

    pub fn completed_courses(&self) -> &CourseGrades<C> {
        &self.completed_courses
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_id(&mut self, id: K) {
        self.id = id;
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    pub fn set_start_year(&mut self, year: u32) {
        self.start_year = year;
    }

    /// Record a course in progress, replacing any completed entry for it
    pub fn add_active_course(&mut self, code: C, grade: f64) {
        self.completed_courses.remove(&code);
        self.active_courses.insert(code, grade);
    }

    /// Record a completed course, replacing any in-progress entry for it
    pub fn add_completed_course(&mut self, code: C, grade: f64) {
        self.active_courses.remove(&code);
        self.completed_courses.insert(code, grade);
    }

    /// Move a course from in progress to completed, keeping its grade.
    ///
    /// Returns false if the course is not in progress.
    pub fn complete_course(&mut self, code: &C) -> bool {
        match self.active_courses.remove_entry(code) {
            Some((code, grade)) => {
                self.completed_courses.insert(code, grade);
                true
            }
            None => false,
        }
    }

    /// Grade for a course; a completed grade takes precedence
    pub fn grade(&self, code: &C) -> Option<f64> {
        self.completed_courses
            .get(code)
            .or_else(|| self.active_courses.get(code))
            .copied()
    }

    /// Every (course, grade) pair across both mappings
    pub fn course_grades(&self) -> impl Iterator<Item = (&C, f64)> + '_ {
        self.completed_courses
            .iter()
            .chain(self.active_courses.iter())
            .map(|(code, grade)| (code, *grade))
    }

    /// Total number of courses across both mappings
    pub fn course_count(&self) -> usize {
        self.active_courses.len() + self.completed_courses.len()
    }
}

/// Records are the same student when their identifiers match
impl<K: PartialEq, C> PartialEq for Record<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K: Eq, C> Eq for Record<K, C> {}

impl<K: fmt::Display, C: fmt::Display> fmt::Display for Record<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student{{name='{}', id={}, branch='{}', startYear={}, activeCourses={{",
            self.name, self.id, self.branch, self.start_year
        )?;
        write_courses(f, &self.active_courses)?;
        write!(f, "}}, completedCourses={{")?;
        write_courses(f, &self.completed_courses)?;
        write!(f, "}}}}")
    }
}

fn write_courses<C: fmt::Display>(f: &mut fmt::Formatter<'_>, courses: &CourseGrades<C>) -> fmt::Result {
    for (i, (code, grade)) in courses.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}:{}", code, grade)?;
    }
    Ok(())
}
