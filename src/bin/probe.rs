//! Checks which alternate forum and microblog front-ends currently answer.

use feed_pulse::probe::{probe_forum_mirrors, probe_microblog_mirrors};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    feed_pulse::logging::init_tracing();

    println!("--- Testing forum mirrors ---");
    for outcome in probe_forum_mirrors().await {
        println!("{outcome}");
    }

    println!("\n--- Testing microblog mirrors ---");
    for outcome in probe_microblog_mirrors().await {
        println!("{outcome}");
    }
}
