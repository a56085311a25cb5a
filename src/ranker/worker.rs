//! Sort worker threads
//!
//! Each worker:
//! - Owns one chunk of the input for the whole sort phase
//! - Sorts it with a stable sort so equal keys keep their input order
//! - Hands the sorted chunk back together with its own wall-clock time

use crate::error::WorkerError;
use std::any::Any;
use std::cmp::Ordering;
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// A chunk after sorting, with the time its worker spent on it
#[derive(Debug)]
pub struct SortedChunk<T> {
    /// Sorted items
    pub items: Vec<T>,

    /// Time spent sorting
    pub elapsed: Duration,
}

/// A worker thread sorting one chunk inside a thread scope
pub struct SortWorker<'scope, T> {
    /// Worker ID (also the chunk index)
    id: usize,

    /// Thread handle
    handle: ScopedJoinHandle<'scope, SortedChunk<T>>,
}

impl<'scope, T: Send + 'scope> SortWorker<'scope, T> {
    /// Spawn a worker that takes ownership of `chunk`
    pub fn spawn<'env>(
        scope: &'scope Scope<'scope, 'env>,
        id: usize,
        chunk: Vec<T>,
        compare: fn(&T, &T) -> Ordering,
    ) -> Result<Self, WorkerError> {
        let handle = thread::Builder::new()
            .name(format!("ranker-{}", id))
            .spawn_scoped(scope, move || sort_chunk(id, chunk, compare))
            .map_err(|e| WorkerError::SpawnFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self { id, handle })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to finish and take back its chunk
    pub fn join(self) -> Result<SortedChunk<T>, WorkerError> {
        self.handle.join().map_err(|payload| WorkerError::Panicked {
            id: self.id,
            message: panic_message(payload.as_ref()),
        })
    }
}

fn sort_chunk<T>(id: usize, mut items: Vec<T>, compare: fn(&T, &T) -> Ordering) -> SortedChunk<T> {
    let start = Instant::now();
    items.sort_by(compare);
    let elapsed = start.elapsed();

    debug!(
        worker = id,
        items = items.len(),
        us = elapsed.as_micros() as u64,
        "Chunk sorted"
    );

    SortedChunk { items, elapsed }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Worker thread panicked".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_sorts_chunk() {
        let chunk = thread::scope(|scope| {
            let worker = SortWorker::spawn(scope, 0, vec![3, 1, 2], i32::cmp).unwrap();
            assert_eq!(worker.id(), 0);
            worker.join().unwrap()
        });
        assert_eq!(chunk.items, vec![1, 2, 3]);
    }

    #[test]
    fn test_worker_panic_is_reported() {
        fn explode(_: &i32, _: &i32) -> Ordering {
            panic!("comparator exploded");
        }

        let result = thread::scope(|scope| {
            SortWorker::spawn(scope, 7, vec![2, 1], explode).unwrap().join()
        });

        match result {
            Err(WorkerError::Panicked { id, message }) => {
                assert_eq!(id, 7);
                assert_eq!(message, "comparator exploded");
            }
            other => panic!("expected panic error, got {:?}", other.map(|c| c.items)),
        }
    }
}
