// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod aggregator;
pub mod analyze;
pub mod channels;
pub mod config;
pub mod driver;
pub mod engine;
pub mod ingest;
pub mod logging;
pub mod probe;
pub mod snapshot;

// ---- Re-exports for stable public API ----
pub use crate::aggregator::{Aggregator, AggregatorSettings};
pub use crate::analyze::{annotate, score, Analyzer};
pub use crate::ingest::providers::{parse_short_post_feed, parse_video_feed};
pub use crate::ingest::types::{FeedFetcher, RawItem, ScoredItem, VideoItem};
pub use crate::snapshot::{Snapshot, SnapshotSink, SourceBucket};
