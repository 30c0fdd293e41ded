//! # Snapshot
//! The run's output document and the sinks that persist it.
//!
//! JSON shape:
//! ```json
//! { "date": "YYYY-MM-DD",
//!   "shortPosts": [ { "source": "...", "items": [ {title,url,summary,rationale,author,publishedAt} ] } ],
//!   "videos": [ {channel,title,url,videoId,publishedAt,description} ],
//!   "socialPosts": null }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ingest::types::{ScoredItem, VideoItem};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BucketItem {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub rationale: String,
    pub author: String,
    pub published_at: String,
}

impl From<ScoredItem> for BucketItem {
    fn from(s: ScoredItem) -> Self {
        Self {
            title: s.item.title,
            url: s.item.url,
            summary: s.item.summary,
            rationale: s.rationale,
            author: s.item.author,
            published_at: s.item.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceBucket {
    pub source: String,
    pub items: Vec<BucketItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub date: String,
    pub short_posts: Vec<SourceBucket>,
    pub videos: Vec<VideoItem>,
    /// Reserved for the microblog track, which is disabled.
    pub social_posts: Option<serde_json::Value>,
}

impl Snapshot {
    pub fn item_count(&self) -> usize {
        self.short_posts.iter().map(|b| b.items.len()).sum()
    }
}

/// Persistence collaborator. A failure here ends the run.
#[async_trait::async_trait]
pub trait SnapshotSink: Send + Sync {
    async fn write(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Writes pretty-printed JSON to a fixed path, replacing any previous file.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SnapshotSink for JsonFileSink {
    async fn write(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating output dir {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("writing snapshot to {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "snapshot written");
        Ok(())
    }
}

// --- Test helper ---
pub struct MemorySink {
    pub writes: Mutex<Vec<Snapshot>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            writes: Mutex::new(vec![]),
        }
    }

    pub fn last(&self) -> Option<Snapshot> {
        self.writes.lock().ok().and_then(|w| w.last().cloned())
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SnapshotSink for MemorySink {
    async fn write(&self, snapshot: &Snapshot) -> Result<()> {
        self.writes
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink poisoned"))?
            .push(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot {
            date: "2026-10-14".into(),
            short_posts: vec![SourceBucket {
                source: "rust".into(),
                items: vec![BucketItem {
                    title: "t".into(),
                    url: "u".into(),
                    summary: "s".into(),
                    rationale: "r".into(),
                    author: "a".into(),
                    published_at: "p".into(),
                }],
            }],
            videos: vec![],
            social_posts: None,
        }
    }

    #[test]
    fn serializes_with_output_field_names() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["date"], "2026-10-14");
        assert!(v["socialPosts"].is_null());
        assert!(v.get("socialPosts").is_some());
        assert_eq!(v["shortPosts"][0]["source"], "rust");
        assert_eq!(v["shortPosts"][0]["items"][0]["publishedAt"], "p");
        assert!(v["videos"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_sink_creates_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs").join("nested").join("data.json");
        let sink = JsonFileSink::new(&path);

        sink.write(&sample()).await.unwrap();
        let mut second = sample();
        second.date = "2026-10-15".into();
        second.short_posts.clear();
        sink.write(&second).await.unwrap();

        let back: Snapshot = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, second);
    }
}
