//! Chunk partitioning and the final k-way merge

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::ops::Range;

/// Split `len` items into exactly `chunks` contiguous ranges.
///
/// Every range but the last holds `len / chunks` items (at least one); the
/// last absorbs the remainder. When there are more chunks than items the
/// surplus ranges are empty. Zero chunks yields no ranges.
pub fn partition(len: usize, chunks: usize) -> Vec<Range<usize>> {
    if chunks == 0 {
        return Vec::new();
    }

    let base = (len / chunks).max(1);

    (0..chunks)
        .map(|i| {
            let start = (i * base).min(len);
            let end = if i == chunks - 1 {
                len
            } else {
                ((i + 1) * base).min(len)
            };
            start..end
        })
        .collect()
}

/// Merge individually sorted chunks into one sorted sequence.
///
/// Each step scans every chunk head and takes the smallest; on a tie the
/// lowest chunk index wins. That is O(total * chunks), which is fine for
/// the handful of chunks a worker pool produces.
pub fn merge_chunks<T>(chunks: Vec<Vec<T>>, compare: fn(&T, &T) -> Ordering) -> Vec<T> {
    let total = chunks.iter().map(Vec::len).sum();
    let mut heads: Vec<VecDeque<T>> = chunks.into_iter().map(VecDeque::from).collect();
    let mut merged = Vec::with_capacity(total);

    while let Some(best) = smallest_head(&heads, compare) {
        if let Some(item) = heads[best].pop_front() {
            merged.push(item);
        }
    }

    merged
}

fn smallest_head<T>(heads: &[VecDeque<T>], compare: fn(&T, &T) -> Ordering) -> Option<usize> {
    let mut best: Option<(usize, &T)> = None;

    for (index, queue) in heads.iter().enumerate() {
        let Some(head) = queue.front() else {
            continue;
        };

        match best {
            Some((_, current)) if compare(head, current) != Ordering::Less => {}
            _ => best = Some((index, head)),
        }
    }

    best.map(|(index, _)| index)
}
