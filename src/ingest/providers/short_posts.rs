// src/ingest/providers/short_posts.rs
//! Forum (Atom) feed parser: one community feed → at most five `RawItem`s.

use chrono::{DateTime, SecondsFormat, Utc};
use metrics::{counter, histogram};
use once_cell::sync::OnceCell;
use regex::Regex;

use super::{capture, re_published, re_title};
use crate::ingest::types::RawItem;
use crate::ingest::{clean_text, decode_field, split_entries};

pub const MAX_POSTS_PER_SOURCE: usize = 5;
pub const MAX_SUMMARY_CHARS: usize = 300;
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Hot-posts feed of one community.
pub fn short_post_feed_url(source: &str) -> String {
    format!("https://www.reddit.com/r/{source}/hot/.rss")
}

fn re_link() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r#"<link href="([^"]+)"[^/]*/?>"#).unwrap())
}

fn re_content() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?s)<content[^>]*>(.*?)</content>").unwrap())
}

fn re_author() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?s)<author>.*?<name>(.*?)</name>.*?</author>").unwrap())
}

/// Parse with the current time as the default publish timestamp.
pub fn parse_short_post_feed(document: &str, source_category: &str) -> Vec<RawItem> {
    parse_short_post_feed_at(document, source_category, Utc::now())
}

/// Parse a forum feed. Entries without a title or link are skipped and do not
/// count against the per-source cap. Output keeps document order.
pub fn parse_short_post_feed_at(
    document: &str,
    source_category: &str,
    now: DateTime<Utc>,
) -> Vec<RawItem> {
    let t0 = std::time::Instant::now();
    let mut out = Vec::with_capacity(MAX_POSTS_PER_SOURCE);

    for entry in split_entries(document) {
        if out.len() >= MAX_POSTS_PER_SOURCE {
            break;
        }

        let title = capture(re_title(), entry).map(decode_field);
        let url = capture(re_link(), entry).map(decode_field);
        let (Some(title), Some(url)) = (title, url) else {
            continue;
        };
        if title.is_empty() || url.is_empty() {
            continue;
        }

        let summary = capture(re_content(), entry)
            .map(|c| clean_text(c, MAX_SUMMARY_CHARS))
            .unwrap_or_default();
        let author = capture(re_author(), entry)
            .map(decode_field)
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        let published_at = capture(re_published(), entry)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));

        out.push(RawItem {
            title,
            url,
            summary,
            author,
            published_at,
        });
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    counter!("ingest_entries_total").increment(out.len() as u64);
    tracing::debug!(source = source_category, items = out.len(), "short-post feed parsed");
    out
}
