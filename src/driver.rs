// src/driver.rs
//! Run driver: config → aggregator → persistence.

use anyhow::{Context, Result};
use metrics::gauge;
use std::sync::Arc;
use tracing::info;

use crate::aggregator::{Aggregator, AggregatorSettings};
use crate::analyze::Analyzer;
use crate::channels::ChannelDirectory;
use crate::config::DigestConfig;
use crate::ingest::types::FeedFetcher;
use crate::snapshot::{Snapshot, SnapshotSink};

/// Build the aggregator a config describes.
pub fn aggregator_for(cfg: &DigestConfig, fetcher: Arc<dyn FeedFetcher>) -> Aggregator {
    let analyzer = Analyzer::from_paths(
        cfg.run.scoring_rules.as_deref(),
        cfg.run.rationale_rules.as_deref(),
    );
    let channels = ChannelDirectory::default_seed().with_overrides(&cfg.channels);
    Aggregator::new(fetcher)
        .with_analyzer(analyzer)
        .with_channels(channels)
        .with_settings(AggregatorSettings::from(&cfg.run))
}

/// Run once and persist. Only a persistence failure is an error.
pub async fn run_once(
    cfg: &DigestConfig,
    fetcher: Arc<dyn FeedFetcher>,
    sink: &dyn SnapshotSink,
) -> Result<Snapshot> {
    let sources = cfg.short_post_sources();
    let channels = cfg.video_channels();
    info!(
        sources = sources.len(),
        channels = channels.len(),
        fetcher = fetcher.name(),
        "digest run started"
    );

    let agg = aggregator_for(cfg, fetcher);
    let snapshot = agg.run(&sources, &channels).await;

    sink.write(&snapshot).await.context("persisting snapshot")?;

    let now = chrono::Utc::now().timestamp().max(0);
    gauge!("digest_last_run_ts").set(now as f64);
    info!(
        date = %snapshot.date,
        sources = sources.len(),
        buckets = snapshot.short_posts.len(),
        items = snapshot.item_count(),
        videos = snapshot.videos.len(),
        "digest run finished"
    );
    Ok(snapshot)
}
