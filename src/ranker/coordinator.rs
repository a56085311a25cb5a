//! Rank coordinator - orchestrates the chunked parallel sort
//!
//! The coordinator is responsible for:
//! - Validating the worker count
//! - Partitioning the input into one chunk per worker
//! - Spawning workers and waiting for every one of them
//! - Merging the sorted chunks on the calling thread
//! - Timing each phase for reporting

use crate::error::{RankError, RankResult, WorkerError};
use crate::natural::NaturalKey;
use crate::ranker::merge::{merge_chunks, partition};
use crate::ranker::worker::{SortWorker, SortedChunk};
use crate::record::Record;
use std::cmp::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Timings from one ranking run
#[derive(Debug, Clone, Default)]
pub struct RankReport {
    /// Records ranked
    pub records: usize,

    /// Items handed to each worker
    pub chunk_sizes: Vec<usize>,

    /// Sort time per worker, indexed by worker ID
    pub worker_timings: Vec<Duration>,

    /// Time spent merging on the calling thread
    pub merge_time: Duration,

    /// End-to-end wall time
    pub total_time: Duration,
}

impl RankReport {
    /// Worker with the longest sort time
    pub fn slowest_worker(&self) -> Option<(usize, Duration)> {
        self.worker_timings
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, elapsed)| *elapsed)
    }

    /// Calculate records per second over the whole run
    pub fn records_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs > 0.0 {
            self.records as f64 / secs
        } else {
            0.0
        }
    }
}

/// Sorts record collections with a fixed number of worker threads
#[derive(Debug, Clone, Copy)]
pub struct ParallelRanker {
    worker_count: usize,
}

impl ParallelRanker {
    /// Create a ranker; zero workers is rejected
    pub fn new(worker_count: usize) -> RankResult<Self> {
        if worker_count == 0 {
            return Err(RankError::InvalidWorkerCount {
                count: worker_count,
            });
        }
        Ok(Self { worker_count })
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Sort `records` by natural id order, replacing the collection.
    ///
    /// The result depends only on the input and the worker count's
    /// partition, never on thread scheduling. On error the collection is
    /// left untouched. An empty collection is a no-op with no timings.
    pub fn rank<K, C>(&self, records: &mut Vec<Arc<Record<K, C>>>) -> RankResult<RankReport>
    where
        K: NaturalKey + Send + Sync,
        C: Ord + Send + Sync,
    {
        let start = Instant::now();

        if records.is_empty() {
            debug!("Nothing to rank");
            return Ok(RankReport::default());
        }

        info!(
            records = records.len(),
            workers = self.worker_count,
            "Ranking records"
        );

        let chunks: Vec<Vec<Arc<Record<K, C>>>> = partition(records.len(), self.worker_count)
            .into_iter()
            .map(|range| records[range].to_vec())
            .collect();
        let chunk_sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();

        let sorted = sort_chunks(chunks)?;
        let worker_timings: Vec<Duration> = sorted.iter().map(|chunk| chunk.elapsed).collect();

        let merge_start = Instant::now();
        let merged = merge_chunks(
            sorted.into_iter().map(|chunk| chunk.items).collect(),
            by_natural_id::<K, C>,
        );
        let merge_time = merge_start.elapsed();

        *records = merged;

        let report = RankReport {
            records: records.len(),
            chunk_sizes,
            worker_timings,
            merge_time,
            total_time: start.elapsed(),
        };

        info!(
            records = report.records,
            merge_ms = report.merge_time.as_millis() as u64,
            total_ms = report.total_time.as_millis() as u64,
            "Ranking complete"
        );

        Ok(report)
    }
}

/// Sort each chunk on its own thread; returns once every worker has finished
fn sort_chunks<K, C>(chunks: Vec<Vec<Arc<Record<K, C>>>>) -> RankResult<Vec<SortedChunk<Arc<Record<K, C>>>>>
where
    K: NaturalKey + Send + Sync,
    C: Ord + Send + Sync,
{
    thread::scope(|scope| -> RankResult<Vec<SortedChunk<Arc<Record<K, C>>>>> {
        let mut workers = Vec::with_capacity(chunks.len());
        for (id, chunk) in chunks.into_iter().enumerate() {
            workers.push(SortWorker::spawn(scope, id, chunk, by_natural_id::<K, C>)?);
        }

        // Join everything before looking at results so no worker is left running
        let results: Vec<Result<_, WorkerError>> = workers.into_iter().map(SortWorker::join).collect();
        results
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(RankError::from)
    })
}

fn by_natural_id<K: NaturalKey, C: Ord>(a: &Arc<Record<K, C>>, b: &Arc<Record<K, C>>) -> Ordering {
    a.id().natural_cmp(b.id())
}
