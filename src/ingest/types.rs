// src/ingest/types.rs
use serde::{Deserialize, Serialize};

/// One forum entry after parsing, before scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub title: String,
    pub url: String,
    pub summary: String,      // cleaned, <= 300 chars
    pub author: String,       // "unknown" when absent
    pub published_at: String, // ISO-8601 as found in the feed
}

/// One video entry that passed the recency window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub channel: String,
    pub title: String,
    pub url: String,
    pub video_id: String,
    pub published_at: String,
    pub description: String, // cleaned, <= 500 chars
}

/// A RawItem with its score and rationale attached.
///
/// `seq` is the position in fetch-then-document order across the whole run;
/// it is the tiebreak for ranking and the ordering key inside buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredItem {
    pub item: RawItem,
    pub source_category: String,
    pub importance: u8,
    pub rationale: String,
    pub seq: usize,
}

/// Injected network capability. Any failure (network, non-2xx, timeout)
/// surfaces as `None`.
#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
    fn name(&self) -> &'static str;
}
