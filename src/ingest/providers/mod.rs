// src/ingest/providers/mod.rs
//! Kind-specific feed parsers. Both work on the raw document text with fixed
//! structural patterns and never fail: malformed input yields fewer items.

pub mod short_posts;
pub mod videos;

pub use short_posts::{parse_short_post_feed, parse_short_post_feed_at, short_post_feed_url};
pub use videos::{parse_video_feed, parse_video_feed_at, video_feed_url};

use once_cell::sync::OnceCell;
use regex::Regex;

/// First capture of `re` in `entry`, if any.
pub(crate) fn capture<'a>(re: &Regex, entry: &'a str) -> Option<&'a str> {
    re.captures(entry)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub(crate) fn re_title() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"<title>(.*?)</title>").unwrap())
}

pub(crate) fn re_published() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"<published>(.*?)</published>").unwrap())
}
