//! Digest binary: one run, then exit.
//! Reads config (see `config.rs`), fetches feeds, writes the JSON snapshot.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use feed_pulse::config::load_config_default;
use feed_pulse::driver::run_once;
use feed_pulse::ingest::fetch::HttpFetcher;
use feed_pulse::snapshot::JsonFileSink;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    feed_pulse::logging::init_tracing();

    let cfg = load_config_default().map_err(|e| {
        error!(error = ?e, "failed to load config");
        e
    })?;

    let fetcher = HttpFetcher::new()
        .with_timeout(cfg.run.fetch_timeout_secs)
        .with_user_agent(cfg.run.user_agent.clone());
    let sink = JsonFileSink::new(cfg.run.output_path.clone());

    let snapshot = run_once(&cfg, Arc::new(fetcher), &sink).await?;

    info!(
        path = %sink.path().display(),
        buckets = snapshot.short_posts.len(),
        videos = snapshot.videos.len(),
        "done"
    );
    Ok(())
}
