// src/config.rs
//! Run configuration: which communities and channels to read, plus run knobs.
//!
//! TOML shape (JSON with the same structure is accepted too):
//! ```toml
//! [short_posts]
//! sources = ["singularity", "LocalLLaMA"]
//!
//! [videos]
//! channels = ["@SpaceX", "@Tesla"]
//!
//! [channels]            # extra handle → channel id entries
//! "@MyChannel" = "UCxxxxxxxxxxxxxxxxxxxxxx"
//!
//! [run]
//! top_n = 30
//! video_channel_limit = 1
//! ```
//! The legacy `{"R": {"subreddits": [...]}, "Y": {"channels": [...]}}` layout
//! is read as well. Missing sections mean empty lists.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::DEFAULT_TOP_N;
use crate::ingest::fetch::DEFAULT_USER_AGENT;

pub const ENV_CONFIG_PATH: &str = "FEED_PULSE_CONFIG";
pub const ENV_OUTPUT_PATH: &str = "FEED_PULSE_OUTPUT";
pub const DEFAULT_OUTPUT_PATH: &str = "docs/data.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DigestConfig {
    #[serde(default, alias = "R")]
    pub short_posts: ShortPostSection,
    #[serde(default, alias = "Y")]
    pub videos: VideoSection,
    #[serde(default)]
    pub channels: HashMap<String, String>,
    #[serde(default)]
    pub run: RunSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortPostSection {
    #[serde(default, alias = "subreddits")]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoSection {
    #[serde(default)]
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub top_n: usize,
    /// How many channels from the head of the list are fetched per run.
    pub video_channel_limit: usize,
    pub short_post_delay_ms: u64,
    pub video_delay_ms: u64,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub output_path: PathBuf,
    pub scoring_rules: Option<PathBuf>,
    pub rationale_rules: Option<PathBuf>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            video_channel_limit: 1,
            short_post_delay_ms: 800,
            video_delay_ms: 1_000,
            fetch_timeout_secs: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            scoring_rules: None,
            rationale_rules: None,
        }
    }
}

impl RunSettings {
    pub fn short_post_delay(&self) -> Duration {
        Duration::from_millis(self.short_post_delay_ms)
    }

    pub fn video_delay(&self) -> Duration {
        Duration::from_millis(self.video_delay_ms)
    }
}

impl DigestConfig {
    /// Trimmed, non-empty source identifiers in configured order.
    pub fn short_post_sources(&self) -> Vec<String> {
        clean_list(&self.short_posts.sources)
    }

    pub fn video_channels(&self) -> Vec<String> {
        clean_list(&self.videos.channels)
    }
}

/// Load from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<DigestConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str()).with_context(|| format!("parsing {}", path.display()))
}

/// Load config using env var + fallbacks:
/// 1) $FEED_PULSE_CONFIG
/// 2) config/feed_pulse.toml
/// 3) config/feed_pulse.json
/// 4) built-in defaults (nothing to fetch)
///
/// `$FEED_PULSE_OUTPUT` overrides `run.output_path` in every case.
pub fn load_config_default() -> Result<DigestConfig> {
    let mut cfg = resolve_config()?;
    if let Ok(out) = std::env::var(ENV_OUTPUT_PATH) {
        if !out.trim().is_empty() {
            cfg.run.output_path = PathBuf::from(out.trim());
        }
    }
    Ok(cfg)
}

fn resolve_config() -> Result<DigestConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    for candidate in ["config/feed_pulse.toml", "config/feed_pulse.json"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return load_config_from(&p);
        }
    }
    tracing::warn!("no config file found, running with empty source lists");
    Ok(DigestConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<DigestConfig> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        _ => {
            if let Ok(v) = serde_json::from_str(s) {
                return Ok(v);
            }
            toml::from_str(s).map_err(|e| anyhow!("unsupported config format: {e}"))
        }
    }
}

fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
