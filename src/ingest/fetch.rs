// src/ingest/fetch.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::ingest::types::FeedFetcher;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// reqwest-backed fetcher with a fixed per-request timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(20),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        let rsp = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url} status"))?;
        rsp.text().await.context("reading response body")
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(error = ?e, url, "fetch failed");
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// In-memory fetcher keyed by URL. Unknown URLs behave like failed fetches.
/// Records every requested URL in call order.
pub struct FixtureFetcher {
    bodies: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for FixtureFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        self.bodies.get(url).cloned()
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_fetcher_serves_known_urls_and_records_calls() {
        let f = FixtureFetcher::new().with("https://a.test/feed", "<feed/>");
        assert_eq!(f.fetch("https://a.test/feed").await.as_deref(), Some("<feed/>"));
        assert!(f.fetch("https://b.test/feed").await.is_none());
        assert_eq!(
            f.requested(),
            vec!["https://a.test/feed".to_string(), "https://b.test/feed".to_string()]
        );
    }

    #[tokio::test]
    async fn http_fetcher_maps_connection_errors_to_none() {
        let f = HttpFetcher::new().with_timeout(2);
        assert!(f.fetch("http://127.0.0.1:9/feed.rss").await.is_none());
    }
}
