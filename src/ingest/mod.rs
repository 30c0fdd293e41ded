// src/ingest/mod.rs
pub mod fetch;
pub mod providers;
pub mod types;

use metrics::{describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;
use regex::Regex;

/// Fixed boundary between feed entries. Everything before the first marker
/// is feed preamble.
pub const ENTRY_MARKER: &str = "<entry>";

/// One-time metrics registration (so series show up in any installed recorder).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_entries_total", "Entries parsed from feeds.");
        describe_counter!(
            "ingest_fetch_failures_total",
            "Fetches that returned nothing usable."
        );
        describe_counter!(
            "ingest_items_kept_total",
            "Short-post items retained after global ranking."
        );
        describe_counter!(
            "ingest_unknown_channels_total",
            "Video channels skipped for lack of a channel id."
        );
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!("digest_last_run_ts", "Unix ts when a digest run last finished.");
    });
}

/// True when a fetched body is worth handing to a parser.
pub fn has_entries(body: &str) -> bool {
    !body.is_empty() && body.contains(ENTRY_MARKER)
}

/// Split a feed document into entry fragments, dropping the preamble.
pub fn split_entries(document: &str) -> impl Iterator<Item = &str> {
    document.split(ENTRY_MARKER).skip(1)
}

/// Clean a markup fragment into display text capped at `max_chars`.
pub fn clean_text(s: &str, max_chars: usize) -> String {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());

    // 1) Strip tags
    let out = re_tags.replace_all(s, " ");

    // 2) Entity decode
    let out = html_escape::decode_html_entities(&out).to_string();

    // 3) Feeds carry escaped HTML bodies: their tags and inner entities only
    //    surface after the first decode
    let out = re_tags.replace_all(&out, " ");
    let out = html_escape::decode_html_entities(&out).to_string();

    // 4) Collapse whitespace
    let out = re_ws.replace_all(&out, " ");
    let out = out.trim();

    // 5) Length cap (chars, not bytes)
    if out.chars().count() > max_chars {
        out.chars().take(max_chars).collect::<String>().trim_end().to_string()
    } else {
        out.to_string()
    }
}

/// Decode entities in a single-line field (titles, author names).
pub fn decode_field(s: &str) -> String {
    html_escape::decode_html_entities(s).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_decodes_and_collapses() {
        let s = "  <p>Hello&amp;&nbsp; <b>world</b></p>\n\n &quot;ok&quot; &#39;x&#39; ";
        assert_eq!(clean_text(s, 300), r#"Hello& world "ok" 'x'"#);
    }

    #[test]
    fn clean_text_handles_escaped_markup() {
        let s = "&lt;div class=&quot;md&quot;&gt;&lt;p&gt;Body text&lt;/p&gt;&lt;/div&gt;";
        assert_eq!(clean_text(s, 300), "Body text");
    }

    #[test]
    fn clean_text_decodes_entities_inside_escaped_markup() {
        let s = "&lt;p&gt;Fish &amp;amp; chips&lt;/p&gt;";
        assert_eq!(clean_text(s, 300), "Fish & chips");
    }

    #[test]
    fn clean_text_truncates_on_char_boundary() {
        let s = "é".repeat(400);
        let out = clean_text(&s, 300);
        assert_eq!(out.chars().count(), 300);
    }

    #[test]
    fn split_entries_drops_preamble() {
        let doc = "<feed><title>x</title><entry>a</entry><entry>b</entry></feed>";
        let parts: Vec<&str> = split_entries(doc).collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with('a'));
    }

    #[test]
    fn has_entries_requires_marker() {
        assert!(!has_entries(""));
        assert!(!has_entries("<html>blocked</html>"));
        assert!(has_entries("<feed><entry></entry></feed>"));
    }
}
