// src/aggregator.rs
//! One digest run: fetch + parse every source, score and annotate, rank
//! globally, regroup, and assemble the `Snapshot`.
//!
//! Fetches are strictly sequential with a pacing delay between requests.
//! A failed or empty fetch contributes nothing; the run never aborts.

use chrono::{DateTime, Utc};
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::analyze::Analyzer;
use crate::channels::ChannelDirectory;
use crate::config::RunSettings;
use crate::engine::{rank_and_group, DEFAULT_TOP_N};
use crate::ingest::providers::{
    parse_short_post_feed_at, parse_video_feed_at, short_post_feed_url, video_feed_url,
};
use crate::ingest::types::{FeedFetcher, ScoredItem, VideoItem};
use crate::ingest::{ensure_metrics_described, has_entries};
use crate::snapshot::Snapshot;

#[derive(Clone, Copy, Debug)]
pub struct AggregatorSettings {
    pub top_n: usize,
    pub video_channel_limit: usize,
    pub short_post_delay: Duration,
    pub video_delay: Duration,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            video_channel_limit: 1,
            short_post_delay: Duration::from_millis(800),
            video_delay: Duration::from_millis(1_000),
        }
    }
}

impl AggregatorSettings {
    /// No pacing; handy for fixtures.
    pub fn unpaced(mut self) -> Self {
        self.short_post_delay = Duration::ZERO;
        self.video_delay = Duration::ZERO;
        self
    }
}

impl From<&RunSettings> for AggregatorSettings {
    fn from(r: &RunSettings) -> Self {
        Self {
            top_n: r.top_n,
            video_channel_limit: r.video_channel_limit,
            short_post_delay: r.short_post_delay(),
            video_delay: r.video_delay(),
        }
    }
}

pub struct Aggregator {
    fetcher: Arc<dyn FeedFetcher>,
    analyzer: Analyzer,
    channels: ChannelDirectory,
    settings: AggregatorSettings,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn FeedFetcher>) -> Self {
        Self {
            fetcher,
            analyzer: Analyzer::default(),
            channels: ChannelDirectory::default_seed(),
            settings: AggregatorSettings::default(),
        }
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_channels(mut self, channels: ChannelDirectory) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_settings(mut self, settings: AggregatorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn run(&self, sources: &[String], channels: &[String]) -> Snapshot {
        self.run_at(Utc::now(), sources, channels).await
    }

    /// Same as `run` with an explicit clock (snapshot date, default publish
    /// times, video recency window).
    pub async fn run_at(&self, now: DateTime<Utc>, sources: &[String], channels: &[String]) -> Snapshot {
        ensure_metrics_described();

        let scored = self.collect_short_posts(sources, now).await;
        let total = scored.len();
        let short_posts = rank_and_group(scored, self.settings.top_n);
        let kept: usize = short_posts.iter().map(|b| b.items.len()).sum();
        counter!("ingest_items_kept_total").increment(kept as u64);
        info!(total, kept, buckets = short_posts.len(), "short posts ranked");

        let videos = self.collect_videos(channels, now).await;

        info!("social track disabled, skipping");

        Snapshot {
            date: now.format("%Y-%m-%d").to_string(),
            short_posts,
            videos,
            social_posts: None,
        }
    }

    /// Global working set in fetch-then-document order.
    pub async fn collect_short_posts(&self, sources: &[String], now: DateTime<Utc>) -> Vec<ScoredItem> {
        info!(count = sources.len(), "fetching short-post sources");
        let mut working: Vec<ScoredItem> = Vec::new();

        for (i, source) in sources.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.settings.short_post_delay).await;
            }

            let url = short_post_feed_url(source);
            let body = self.fetcher.fetch(&url).await.unwrap_or_default();
            if !has_entries(&body) {
                warn!(source = %source, url = %url, fetcher = self.fetcher.name(), "no entries fetched");
                counter!("ingest_fetch_failures_total").increment(1);
                continue;
            }

            let items = parse_short_post_feed_at(&body, source, now);
            info!(source = %source, items = items.len(), "short-post feed fetched");
            for item in items {
                let seq = working.len();
                working.push(self.analyzer.analyze(item, source, seq));
            }
        }

        working
    }

    /// Videos from the first `video_channel_limit` channels.
    pub async fn collect_videos(&self, channels: &[String], now: DateTime<Utc>) -> Vec<VideoItem> {
        let limit = self.settings.video_channel_limit.min(channels.len());
        info!(configured = channels.len(), limit, "fetching video channels");

        let mut out = Vec::new();
        let mut fetched_any = false;
        for handle in channels.iter().take(limit) {
            let Some(channel_id) = self.channels.channel_id(handle) else {
                warn!(channel = %handle, "unknown channel id, skipping");
                counter!("ingest_unknown_channels_total").increment(1);
                continue;
            };

            if fetched_any {
                tokio::time::sleep(self.settings.video_delay).await;
            }
            fetched_any = true;

            let url = video_feed_url(channel_id);
            let body = self.fetcher.fetch(&url).await.unwrap_or_default();
            if !has_entries(&body) {
                warn!(channel = %handle, url = %url, "no entries fetched");
                counter!("ingest_fetch_failures_total").increment(1);
                continue;
            }

            let videos = parse_video_feed_at(&body, handle, now);
            info!(channel = %handle, videos = videos.len(), "recent videos fetched");
            out.extend(videos);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fetch::FixtureFetcher;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
    }

    fn feed(titles: &[&str]) -> String {
        let mut s = String::from("<feed>");
        for (i, t) in titles.iter().enumerate() {
            s.push_str(&format!(
                r#"<entry><title>{t}</title><link href="https://x.test/{i}"/></entry>"#
            ));
        }
        s.push_str("</feed>");
        s
    }

    #[tokio::test]
    async fn seq_spans_sources_in_fetch_order() {
        let f = FixtureFetcher::new()
            .with(short_post_feed_url("a"), feed(&["a0", "a1"]))
            .with(short_post_feed_url("b"), feed(&["b0"]));
        let agg = Aggregator::new(Arc::new(f)).with_settings(AggregatorSettings::default().unpaced());
        let set = agg
            .collect_short_posts(&["a".to_string(), "missing".to_string(), "b".to_string()], now())
            .await;
        let got: Vec<(String, usize)> = set.iter().map(|s| (s.item.title.clone(), s.seq)).collect();
        assert_eq!(
            got,
            vec![("a0".into(), 0), ("a1".into(), 1), ("b0".into(), 2)]
        );
    }

    #[tokio::test]
    async fn snapshot_date_uses_run_clock() {
        let agg = Aggregator::new(Arc::new(FixtureFetcher::new()))
            .with_settings(AggregatorSettings::default().unpaced());
        let snap = agg.run_at(now(), &[], &[]).await;
        assert_eq!(snap.date, "2026-10-14");
        assert!(snap.social_posts.is_none());
    }

    #[tokio::test]
    async fn body_without_entry_marker_is_ignored() {
        let f = FixtureFetcher::new().with(short_post_feed_url("a"), "<html>Too Many Requests</html>");
        let agg = Aggregator::new(Arc::new(f)).with_settings(AggregatorSettings::default().unpaced());
        assert!(agg.collect_short_posts(&["a".to_string()], now()).await.is_empty());
    }
}
