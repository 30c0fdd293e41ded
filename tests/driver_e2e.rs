// tests/driver_e2e.rs
use feed_pulse::config::DigestConfig;
use feed_pulse::driver::run_once;
use feed_pulse::ingest::fetch::FixtureFetcher;
use feed_pulse::ingest::providers::short_post_feed_url;
use feed_pulse::snapshot::JsonFileSink;
use std::sync::Arc;

fn config(sources: &[&str]) -> DigestConfig {
    let mut cfg = DigestConfig::default();
    cfg.short_posts.sources = sources.iter().map(|s| s.to_string()).collect();
    cfg.run.short_post_delay_ms = 0;
    cfg.run.video_delay_ms = 0;
    cfg
}

#[tokio::test]
async fn writes_snapshot_json_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs").join("data.json");
    let sink = JsonFileSink::new(&path);

    let xml = include_str!("fixtures/short_posts_hot.xml");
    let f = FixtureFetcher::new().with(short_post_feed_url("singularity"), xml);
    let snap = run_once(&config(&["singularity", "offline"]), Arc::new(f), &sink)
        .await
        .unwrap();
    assert_eq!(snap.item_count(), 5);

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    let obj = json.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["date", "shortPosts", "socialPosts", "videos"]);
    assert!(json["socialPosts"].is_null());
    assert_eq!(json["videos"], serde_json::json!([]));

    let bucket = &json["shortPosts"][0];
    assert_eq!(bucket["source"], "singularity");
    let item = &bucket["items"][0];
    for key in ["title", "url", "summary", "rationale", "author", "publishedAt"] {
        assert!(item.get(key).is_some(), "missing {key}");
    }
    assert!(item.get("importance").is_none());
    assert_eq!(item["rationale"], "📢 Official announcement");
}

#[tokio::test]
async fn rerun_replaces_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "stale").unwrap();

    let sink = JsonFileSink::new(&path);
    run_once(&config(&[]), Arc::new(FixtureFetcher::new()), &sink)
        .await
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["shortPosts"], serde_json::json!([]));
}
