//! Importance scoring: base value plus the sum of every matching rule's delta,
//! clamped into `[0, 100]`.
//!
//! Rules are independent. All matching rules contribute, nothing short-circuits,
//! so the result does not depend on rule order.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

use super::rules::{load_json, When};

pub const BASE_SCORE: i32 = 50;
pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScoreRule {
    pub name: Option<String>,
    pub when: When,
    pub delta: i32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScoreTable {
    #[serde(default = "default_base")]
    pub base: i32,
    pub rules: Vec<ScoreRule>,
}

fn default_base() -> i32 {
    BASE_SCORE
}

fn rule(name: &str, when: When, delta: i32) -> ScoreRule {
    ScoreRule {
        name: Some(name.to_string()),
        when,
        delta,
    }
}

impl ScoreTable {
    pub fn new(base: i32, rules: Vec<ScoreRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| ScoreRule {
                when: r.when.normalized(),
                ..r
            })
            .collect();
        Self { base, rules }
    }

    /// Load a table from JSON; falls back to `default_seed()` on any error.
    pub fn load_from_file(path: &Path) -> Self {
        match load_json::<ScoreTable>(path) {
            Ok(t) => Self::new(t.base, t.rules),
            Err(e) => {
                tracing::warn!(error = ?e, "scoring rules unavailable, using built-in table");
                Self::default_seed()
            }
        }
    }

    /// Built-in weights.
    pub fn default_seed() -> Self {
        let rules = vec![
            // High-importance keywords
            rule("breakthrough", When::any(&["breakthrough"]), 40),
            rule("announcement", When::any(&["announced", "announcement"]), 35),
            rule("release", When::any(&["release", "launched"]), 30),
            rule("first", When::any(&["first", "world first"]), 35),
            rule("agi", When::any(&["agi", "asi", "gpt-5"]), 45),
            rule("new model", When::any(&["new model", "open source"]), 25),
            rule("benchmark", When::any(&["benchmark", "comparison"]), 20),
            rule("update available", When::all(&["update", "available"]), 15),
            rule("price move", When::all(&["price"]).and_any(&["drop", "surge"]), 25),
            rule("musk companies", When::any(&["tesla", "spacex", "elon"]), 20),
            // Topic-specific boosts
            rule(
                "ai models",
                When::any(&["model", "llama", "claude"]).in_category(&["ai", "llm", "gpt"]),
                20,
            ),
            rule(
                "markets",
                When::any(&["bitcoin", "btc", "market"]).in_category(&["crypto", "stock"]),
                15,
            ),
            rule(
                "gaming hardware",
                When::any(&["steam deck", "game pass"]).in_category(&["steam", "gaming"]),
                15,
            ),
            // Low-value content
            rule("meme", When::any(&["meme", "shitpost"]), -30),
            rule("help question", When::all(&["help", "?"]), -10),
            rule("personal", When::any(&["my ", "i made", "look at"]), -5),
        ];
        Self::new(BASE_SCORE, rules)
    }

    /// Raw sum before clamping.
    pub fn raw_score(&self, title: &str, source_category: &str) -> i32 {
        let t = title.to_lowercase();
        let s = source_category.to_lowercase();
        self.rules
            .iter()
            .filter(|r| r.when.matches(&t, &s))
            .fold(self.base, |acc, r| acc.saturating_add(r.delta))
    }

    pub fn score(&self, title: &str, source_category: &str) -> u8 {
        self.raw_score(title, source_category).clamp(MIN_SCORE, MAX_SCORE) as u8
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::default_seed()
    }
}

static DEFAULT_TABLE: Lazy<ScoreTable> = Lazy::new(ScoreTable::default_seed);

/// Score with the built-in table.
pub fn score(title: &str, source_category: &str) -> u8 {
    DEFAULT_TABLE.score(title, source_category)
}
