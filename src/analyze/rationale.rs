//! "Why it matters" labels. Classification, not accumulation: the first rule
//! whose condition matches supplies the label.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

use super::rules::{load_json, When};

pub const DEFAULT_LABEL: &str = "📌 Trending";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LabelRule {
    pub when: When,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LabelTable {
    pub rules: Vec<LabelRule>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    DEFAULT_LABEL.to_string()
}

fn label(when: When, label: &str) -> LabelRule {
    LabelRule {
        when,
        label: label.to_string(),
    }
}

impl LabelTable {
    pub fn new(rules: Vec<LabelRule>, fallback: impl Into<String>) -> Self {
        let mut fallback = fallback.into();
        if fallback.trim().is_empty() {
            fallback = default_fallback();
        }
        let rules = rules
            .into_iter()
            .filter(|r| !r.label.trim().is_empty())
            .map(|r| LabelRule {
                when: r.when.normalized(),
                label: r.label,
            })
            .collect();
        Self { rules, fallback }
    }

    /// Load a table from JSON; falls back to `default_seed()` on any error.
    pub fn load_from_file(path: &Path) -> Self {
        match load_json::<LabelTable>(path) {
            Ok(t) => Self::new(t.rules, t.fallback),
            Err(e) => {
                tracing::warn!(error = ?e, "rationale rules unavailable, using built-in table");
                Self::default_seed()
            }
        }
    }

    /// Built-in labels, highest priority first.
    pub fn default_seed() -> Self {
        let llm_subs: &[&str] = &["local_llama", "llm", "gpt"];
        let rules = vec![
            // Headline patterns
            label(When::any(&["breakthrough", "world first", "historic"]), "🚀 Major breakthrough"),
            label(When::any(&["agi", "asi", "superintelligence"]), "🤖 AGI/ASI development"),
            label(
                When::any(&["gpt-5", "claude 4", "gemini 2", "llama 4"]),
                "🧠 Next-gen model news",
            ),
            label(
                When::any(&["announced", "announcement", "official"]),
                "📢 Official announcement",
            ),
            label(When::all(&["launch"]).and_any(&["product", "feature"]), "🎯 New product launch"),
            label(When::any(&["benchmark", "beats", "outperforms"]), "📊 Performance benchmark"),
            label(When::any(&["price drop", "discount", "sale"]), "💰 Price alert"),
            label(When::any(&["tesla", "spacex", "neuralink"]), "⚡ Musk company update"),
            label(When::any(&["openai", "anthropic", "deepmind"]), "🏢 AI lab news"),
            label(When::all(&["battery"]).and_any(&["energy", "density"]), "🔋 Battery tech advance"),
            label(When::any(&["solar", "renewable", "fusion"]), "☀️ Energy innovation"),
            // Community context
            label(
                When::any(&["quantize", "fine-tune", "lora"]).in_category(llm_subs),
                "🔧 LLM technique",
            ),
            label(When::category(llm_subs), "📱 Local AI news"),
            label(When::category(&["invest", "stock", "crypto"]), "📈 Market insight"),
            label(When::category(&["steam", "gaming", "deck"]), "🎮 Gaming update"),
            label(When::category(&["hardware", "framework", "raspberry"]), "🖥️ Hardware news"),
            label(When::category(&["programming", "coding", "dev"]), "💻 Dev resource"),
            // Content type
            label(When::any(&["how to", "guide", "tutorial"]), "📖 How-to guide"),
            label(When::any(&["review", "comparison", "vs "]), "🔍 Review/comparison"),
            label(When::any(&["leak", "rumor", "report"]), "🤫 Leak/rumor"),
            label(When::any(&["discussion", "thoughts", "opinion"]), "💭 Community discussion"),
        ];
        Self::new(rules, DEFAULT_LABEL)
    }

    /// Index of the winning rule, `None` when the fallback applies.
    pub fn winning_rule(&self, title: &str, source_category: &str) -> Option<usize> {
        let t = title.to_lowercase();
        let s = source_category.to_lowercase();
        self.rules.iter().position(|r| r.when.matches(&t, &s))
    }

    pub fn annotate(&self, title: &str, source_category: &str) -> String {
        match self.winning_rule(title, source_category) {
            Some(i) => self.rules[i].label.clone(),
            None => self.fallback.clone(),
        }
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::default_seed()
    }
}

static DEFAULT_TABLE: Lazy<LabelTable> = Lazy::new(LabelTable::default_seed);

/// Annotate with the built-in table.
pub fn annotate(title: &str, source_category: &str) -> String {
    DEFAULT_TABLE.annotate(title, source_category)
}
