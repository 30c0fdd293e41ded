// src/ingest/providers/videos.rs
//! Video channel feed parser with a recency window.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use metrics::{counter, histogram};
use once_cell::sync::OnceCell;
use regex::Regex;

use super::{capture, re_published, re_title};
use crate::ingest::types::VideoItem;
use crate::ingest::{clean_text, decode_field, split_entries};

pub const MAX_VIDEOS_PER_CHANNEL: usize = 3;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const RECENCY_WINDOW_DAYS: i64 = 7;
pub const NO_DESCRIPTION: &str = "No description available.";

/// Uploads feed of one channel id.
pub fn video_feed_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/feeds/videos.xml?channel_id={channel_id}")
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://youtube.com/watch?v={video_id}")
}

fn re_video_id() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"<yt:videoId>(.*?)</yt:videoId>").unwrap())
}

fn re_description() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?s)<media:description>(.*?)</media:description>").unwrap())
}

/// Parse relative to the current time.
pub fn parse_video_feed(document: &str, channel_label: &str) -> Vec<VideoItem> {
    parse_video_feed_at(document, channel_label, Utc::now())
}

fn within_window(published_at: &str, now: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(published_at) {
        Ok(ts) => now.signed_duration_since(ts.with_timezone(&Utc)) <= Duration::days(RECENCY_WINDOW_DAYS),
        Err(_) => false,
    }
}

/// Parse a channel feed. Entries older than the recency window (or with an
/// unreadable timestamp) are skipped before the cap is applied.
pub fn parse_video_feed_at(
    document: &str,
    channel_label: &str,
    now: DateTime<Utc>,
) -> Vec<VideoItem> {
    let t0 = std::time::Instant::now();
    let mut out = Vec::with_capacity(MAX_VIDEOS_PER_CHANNEL);

    for entry in split_entries(document) {
        if out.len() >= MAX_VIDEOS_PER_CHANNEL {
            break;
        }

        let video_id = capture(re_video_id(), entry).map(|v| v.trim().to_string());
        let title = capture(re_title(), entry).map(decode_field);
        let (Some(video_id), Some(title)) = (video_id, title) else {
            continue;
        };
        if video_id.is_empty() || title.is_empty() {
            continue;
        }

        let published_at = capture(re_published(), entry)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));
        if !within_window(&published_at, now) {
            continue;
        }

        let description = capture(re_description(), entry)
            .map(|d| clean_text(d, MAX_DESCRIPTION_CHARS))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        out.push(VideoItem {
            channel: channel_label.to_string(),
            title,
            url: watch_url(&video_id),
            video_id,
            published_at,
            description,
        });
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    counter!("ingest_entries_total").increment(out.len() as u64);
    tracing::debug!(channel = channel_label, items = out.len(), "video feed parsed");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
    }

    fn entry(id: &str, title: &str, published: DateTime<Utc>, desc: Option<&str>) -> String {
        let desc = desc
            .map(|d| format!("<media:group><media:description>{d}</media:description></media:group>"))
            .unwrap_or_default();
        format!(
            "<entry><id>yt:video:{id}</id><yt:videoId>{id}</yt:videoId><title>{title}</title>\
             <published>{}</published>{desc}</entry>",
            published.to_rfc3339()
        )
    }

    #[test]
    fn builds_watch_url_and_cleans_description() {
        let doc = format!(
            "<feed><title>Channel</title>{}</feed>",
            entry("abc123", "Launch recap", now() - Duration::days(1), Some("Line one\n\nLine   two"))
        );
        let vids = parse_video_feed_at(&doc, "@SpaceX", now());
        assert_eq!(vids.len(), 1);
        assert_eq!(vids[0].url, "https://youtube.com/watch?v=abc123");
        assert_eq!(vids[0].video_id, "abc123");
        assert_eq!(vids[0].channel, "@SpaceX");
        assert_eq!(vids[0].description, "Line one Line two");
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let doc = format!("<feed>{}</feed>", entry("v1", "T", now() - Duration::hours(3), None));
        let vids = parse_video_feed_at(&doc, "@Tesla", now());
        assert_eq!(vids[0].description, NO_DESCRIPTION);
    }

    #[test]
    fn old_entries_are_excluded() {
        let doc = format!(
            "<feed>{}{}</feed>",
            entry("old", "Old", now() - Duration::days(10), None),
            entry("new", "New", now() - Duration::days(2), None)
        );
        let vids = parse_video_feed_at(&doc, "@Tesla", now());
        assert_eq!(vids.len(), 1);
        assert_eq!(vids[0].video_id, "new");
    }

    #[test]
    fn cap_counts_only_recent_entries() {
        let mut doc = String::from("<feed>");
        doc.push_str(&entry("o1", "Old 1", now() - Duration::days(30), None));
        doc.push_str(&entry("o2", "Old 2", now() - Duration::days(8), None));
        for i in 0..5 {
            doc.push_str(&entry(&format!("n{i}"), "Recent", now() - Duration::hours(i + 1), None));
        }
        doc.push_str("</feed>");
        let ids: Vec<String> = parse_video_feed_at(&doc, "@x", now())
            .into_iter()
            .map(|v| v.video_id)
            .collect();
        assert_eq!(ids, vec!["n0", "n1", "n2"]);
    }

    #[test]
    fn entries_missing_id_or_title_are_dropped() {
        let doc = "<feed><entry><title>No id</title></entry>\
                   <entry><yt:videoId>noTitle</yt:videoId></entry></feed>";
        assert!(parse_video_feed_at(doc, "@x", now()).is_empty());
    }

    #[test]
    fn unreadable_timestamp_is_excluded() {
        let doc = "<feed><entry><yt:videoId>v</yt:videoId><title>T</title>\
                   <published>last tuesday</published></entry></feed>";
        assert!(parse_video_feed_at(doc, "@x", now()).is_empty());
    }
}
