// src/probe.rs
//! Availability probe for alternate forum and microblog front-ends.
//! Sequential, one short request per endpoint.

use std::time::Instant;

use crate::ingest::fetch::HttpFetcher;
use crate::ingest::types::FeedFetcher;

pub const FORUM_MIRRORS: &[&str] = &[
    "https://libreddit.kavin.rocks",
    "https://libreddit.privacydev.net",
    "https://r.iff.ink",
    "https://reddit.invak.id",
    "https://snoo.habedieeh.re",
    "https://redlib.catsarch.com",
];

pub const MICROBLOG_MIRRORS: &[&str] = &[
    "https://nitter.poast.org",
    "https://nitter.privacydev.net",
    "https://nitter.lucabased.xyz",
    "https://nitter.woodland.cafe",
    "https://nitter.salastil.com",
    "https://nitter.moomoo.me",
    "https://nitter.soopy.moe",
    "https://nitter.freedit.eu",
];

pub const FORUM_PROBE_PATH: &str = "/r/technology/top.json?limit=1";
pub const MICROBLOG_PROBE_PATH: &str = "/elonmusk/rss";
pub const FORUM_PROBE_TIMEOUT_SECS: u64 = 3;
pub const MICROBLOG_PROBE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub endpoint: String,
    pub ok: bool,
    pub elapsed_ms: u64,
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ok {
            write!(f, "[OK] {} ({}ms)", self.endpoint, self.elapsed_ms)
        } else {
            write!(f, "[FAIL] {}", self.endpoint)
        }
    }
}

/// Probe `base + path` for every base, in order.
pub async fn probe_all(fetcher: &dyn FeedFetcher, bases: &[&str], path: &str) -> Vec<ProbeOutcome> {
    let mut out = Vec::with_capacity(bases.len());
    for base in bases {
        let url = format!("{}{}", base.trim_end_matches('/'), path);
        let t0 = Instant::now();
        let ok = fetcher.fetch(&url).await.is_some();
        let outcome = ProbeOutcome {
            endpoint: base.to_string(),
            ok,
            elapsed_ms: t0.elapsed().as_millis() as u64,
        };
        tracing::info!(target: "probe", endpoint = %outcome.endpoint, ok, elapsed_ms = outcome.elapsed_ms, "probed");
        out.push(outcome);
    }
    out
}

pub async fn probe_forum_mirrors() -> Vec<ProbeOutcome> {
    let f = HttpFetcher::new().with_timeout(FORUM_PROBE_TIMEOUT_SECS);
    probe_all(&f, FORUM_MIRRORS, FORUM_PROBE_PATH).await
}

pub async fn probe_microblog_mirrors() -> Vec<ProbeOutcome> {
    let f = HttpFetcher::new().with_timeout(MICROBLOG_PROBE_TIMEOUT_SECS);
    probe_all(&f, MICROBLOG_MIRRORS, MICROBLOG_PROBE_PATH).await
}
