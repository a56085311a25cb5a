//! Read-only snapshots of the registry's two orderings

use crate::record::Record;
use std::sync::Arc;

/// An ordered snapshot of registry records
///
/// Taken under the registry lock; later insertions do not show up here.
/// Iterating borrows the view, so it can be walked any number of times.
#[derive(Debug)]
pub struct OrderView<K, C> {
    records: Vec<Arc<Record<K, C>>>,
}

impl<K, C> OrderView<K, C> {
    pub(crate) fn new(records: Vec<Arc<Record<K, C>>>) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Record<K, C>>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Arc<Record<K, C>>> {
        self.records.get(position)
    }

    pub fn as_slice(&self) -> &[Arc<Record<K, C>>] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<Arc<Record<K, C>>> {
        self.records
    }
}

impl<K, C> Clone for OrderView<K, C> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<K, C> IntoIterator for OrderView<K, C> {
    type Item = Arc<Record<K, C>>;
    type IntoIter = std::vec::IntoIter<Arc<Record<K, C>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, K, C> IntoIterator for &'a OrderView<K, C> {
    type Item = &'a Arc<Record<K, C>>;
    type IntoIter = std::slice::Iter<'a, Arc<Record<K, C>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
