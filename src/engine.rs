//! # Ranking Engine
//! Pure, testable logic that maps the run's scored working set → per-source
//! buckets. No I/O.
//!
//! Policy: rank globally by importance (stable, fetch-then-document order breaks
//! ties), keep the top N, then regroup. Buckets appear in the order their
//! source first shows up in the ranking; items inside a bucket keep their
//! original order. A source whose items all fall below the cut disappears.

use crate::ingest::types::ScoredItem;
use crate::snapshot::{BucketItem, SourceBucket};

pub const DEFAULT_TOP_N: usize = 30;

/// Global rank-and-trim.
pub fn rank(mut items: Vec<ScoredItem>, top_n: usize) -> Vec<ScoredItem> {
    // Ties fall back to seq even if the input arrives out of order.
    items.sort_by(|a, b| b.importance.cmp(&a.importance).then(a.seq.cmp(&b.seq)));
    items.truncate(top_n);
    items
}

/// Regroup an already ranked subset by source.
pub fn group_by_source(ranked: Vec<ScoredItem>) -> Vec<SourceBucket> {
    let mut order: Vec<String> = Vec::new();
    for it in &ranked {
        if !order.iter().any(|s| s == &it.source_category) {
            order.push(it.source_category.clone());
        }
    }

    let mut by_seq = ranked;
    by_seq.sort_by_key(|it| it.seq);

    let mut buckets: Vec<SourceBucket> = order
        .into_iter()
        .map(|source| SourceBucket {
            source,
            items: Vec::new(),
        })
        .collect();
    for it in by_seq {
        if let Some(b) = buckets.iter_mut().find(|b| b.source == it.source_category) {
            b.items.push(BucketItem::from(it));
        }
    }
    buckets
}

pub fn rank_and_group(items: Vec<ScoredItem>, top_n: usize) -> Vec<SourceBucket> {
    group_by_source(rank(items, top_n))
}
