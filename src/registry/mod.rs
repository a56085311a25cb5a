//! Dual-ordered student registry
//!
//! The registry keeps every record in two orders plus a grade index:
//!
//! ```text
//!                 add_student(record)
//!                         │
//!             ┌───────────┴───────────┐
//!             │   Mutex<RegistryState> │
//!             └───────────┬───────────┘
//!       ┌─────────────────┼──────────────────┐
//!       ▼                 ▼                  ▼
//! ┌───────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ insertion │   │    ranked    │   │   grade index    │
//! │   order   │   │ (natural id) │   │ course→grade→ids │
//! └───────────┘   └──────────────┘   └──────────────────┘
//! ```
//!
//! A single lock guards all three, so each public call is atomic from the
//! caller's point of view: once `add_student` returns, the ranked order and
//! the index already include the new record.

pub mod index;
pub mod view;

pub use index::{Grade, GradeIndex};
pub use view::OrderView;

use crate::natural::NaturalKey;
use crate::record::Record;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, trace};

struct RegistryState<K, C> {
    /// Arrival order, append only
    insertion_order: Vec<Arc<Record<K, C>>>,

    /// Same records sorted by natural id
    ranked_order: Vec<Arc<Record<K, C>>>,

    /// Course -> grade -> records
    grade_index: GradeIndex<K, C>,
}

/// Thread-safe registry of student records
pub struct Registry<K, C> {
    state: Mutex<RegistryState<K, C>>,
}

impl<K, C> Default for Registry<K, C> {
    fn default() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                insertion_order: Vec::new(),
                ranked_order: Vec::new(),
                grade_index: GradeIndex::default(),
            }),
        }
    }
}

impl<K: NaturalKey, C: Ord + Clone> Registry<K, C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to both orderings and the grade index.
    ///
    /// The record lands after any existing records with an equal id, which
    /// matches appending and then stable-sorting the ranked order.
    pub fn add_student(&self, record: Arc<Record<K, C>>) {
        let mut state = self.state.lock();

        state.insertion_order.push(Arc::clone(&record));

        let position = state
            .ranked_order
            .partition_point(|existing| existing.id().natural_cmp(record.id()) != Ordering::Greater);
        state.ranked_order.insert(position, Arc::clone(&record));

        state.grade_index.insert(&record);

        trace!(
            position = position,
            size = state.insertion_order.len(),
            courses = record.course_count(),
            "Record added"
        );
    }

    /// Take ownership of a record, add it, and return the shared handle
    pub fn add_owned(&self, record: Record<K, C>) -> Arc<Record<K, C>> {
        let record = Arc::new(record);
        self.add_student(Arc::clone(&record));
        record
    }

    /// Add records one at a time in iteration order; returns how many were added
    pub fn extend<I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = Arc<Record<K, C>>>,
    {
        let mut added = 0;
        for record in records {
            self.add_student(record);
            added += 1;
        }
        debug!(added = added, size = self.size(), "Records added to registry");
        added
    }

    /// Records with a grade of at least `min_grade` in `course`.
    ///
    /// Ordered by ascending grade, then natural id. Unknown courses and
    /// thresholds nobody meets give an empty result.
    pub fn students_with_grade(&self, course: &C, min_grade: f64) -> Vec<Arc<Record<K, C>>> {
        self.state.lock().grade_index.at_least(course, min_grade)
    }

    /// Number of records added so far
    pub fn size(&self) -> usize {
        self.state.lock().insertion_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Snapshot of records in arrival order
    pub fn insertion_order(&self) -> OrderView<K, C> {
        OrderView::new(self.state.lock().insertion_order.clone())
    }

    /// Snapshot of records in natural id order
    pub fn ranked_order(&self) -> OrderView<K, C> {
        OrderView::new(self.state.lock().ranked_order.clone())
    }

    /// Number of distinct courses present in the grade index
    pub fn course_count(&self) -> usize {
        self.state.lock().grade_index.course_count()
    }
}
