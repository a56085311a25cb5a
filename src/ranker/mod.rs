//! Parallel chunk-sort-then-merge ranking
//!
//! Sorts a record collection by natural id using a fixed pool of worker
//! threads. Independent of the registry; usable on any record collection.
//!
//! # Architecture
//!
//! ```text
//!                     ┌──────────────────────────┐
//!                     │     ParallelRanker       │
//!                     │  - partition into N      │
//!                     └────────────┬─────────────┘
//!                                  │ one owned chunk each
//!       ┌──────────────────────────┼──────────────────────────┐
//!       │                          │                          │
//! ┌─────▼─────┐              ┌─────▼─────┐              ┌─────▼─────┐
//! │ ranker-0  │              │ ranker-1  │     ...      │ ranker-N  │
//! │ sort+time │              │ sort+time │              │ sort+time │
//! └─────┬─────┘              └─────┬─────┘              └─────┬─────┘
//!       └──────────────────────────┼──────────────────────────┘
//!                                  │ join (all workers)
//!                     ┌────────────▼─────────────┐
//!                     │  linear-scan head merge  │
//!                     │  (calling thread)        │
//!                     └──────────────────────────┘
//! ```

pub mod coordinator;
pub mod merge;
pub mod worker;

pub use coordinator::{ParallelRanker, RankReport};
pub use merge::{merge_chunks, partition};

use crate::error::RankResult;
use crate::natural::NaturalKey;
use crate::record::Record;
use std::cmp::Ordering;
use std::sync::Arc;

/// Sort `records` with `worker_count` threads; zero workers is an error
pub fn rank<K, C>(records: &mut Vec<Arc<Record<K, C>>>, worker_count: usize) -> RankResult<RankReport>
where
    K: NaturalKey + Send + Sync,
    C: Ord + Send + Sync,
{
    ParallelRanker::new(worker_count)?.rank(records)
}

/// Check that records are in natural id order
pub fn is_ranked<K: NaturalKey, C: Ord>(records: &[Arc<Record<K, C>>]) -> bool {
    records
        .windows(2)
        .all(|pair| pair[0].id().natural_cmp(pair[1].id()) != Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankError;
    use crate::natural::natural_cmp;
    use proptest::prelude::*;

    fn shared(ids: &[String]) -> Vec<Arc<Record<String, String>>> {
        ids.iter()
            .map(|id| Arc::new(Record::new("n", id.clone(), "CSE", 2020)))
            .collect()
    }

    #[test]
    fn test_rank_rejects_zero_workers() {
        let mut input = shared(&["a".to_string()]);
        assert!(matches!(
            rank(&mut input, 0),
            Err(RankError::InvalidWorkerCount { .. })
        ));
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_is_ranked() {
        assert!(is_ranked(&shared(&["1".into(), "a2".into(), "a10".into()])));
        assert!(!is_ranked(&shared(&["a10".into(), "a2".into()])));
        assert!(is_ranked::<String, String>(&[]));
    }

    proptest! {
        #[test]
        fn prop_matches_whole_sort(
            ids in proptest::collection::vec("[A-Z]{0,2}[0-9]{0,3}", 0..60),
            workers in 1usize..9,
        ) {
            let mut input = shared(&ids);
            rank(&mut input, workers).unwrap();

            let mut expected = ids.clone();
            expected.sort_by(|a, b| natural_cmp(a, b));

            let ranked: Vec<String> = input.iter().map(|r| r.id().clone()).collect();
            prop_assert_eq!(ranked, expected);
        }
    }
}
