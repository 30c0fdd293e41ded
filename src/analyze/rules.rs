//! Keyword trigger matching shared by the scoring and rationale tables.
//!
//! Minimal JSON DSL for conditions (case-insensitive substring checks):
//! - `any_contains`:      match if ANY phrase appears in the title
//! - `all_contains`:      match if ALL phrases appear in the title
//! - `category_contains`: match if ANY phrase appears in the source category
//!
//! Empty lists impose no constraint; a rule matches when every non-empty
//! list is satisfied. Phrases are matched verbatim after lowercasing, so
//! `"my "` keeps its trailing space.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct When {
    #[serde(default)]
    pub any_contains: Vec<String>,
    #[serde(default)]
    pub all_contains: Vec<String>,
    #[serde(default)]
    pub category_contains: Vec<String>,
}

impl When {
    pub fn any(phrases: &[&str]) -> Self {
        Self {
            any_contains: owned(phrases),
            ..Default::default()
        }
    }

    pub fn all(phrases: &[&str]) -> Self {
        Self {
            all_contains: owned(phrases),
            ..Default::default()
        }
    }

    /// Add an any-of title group on top of the current condition.
    pub fn and_any(mut self, phrases: &[&str]) -> Self {
        self.any_contains = owned(phrases);
        self
    }

    /// Restrict the rule to categories containing one of `phrases`.
    pub fn in_category(mut self, phrases: &[&str]) -> Self {
        self.category_contains = owned(phrases);
        self
    }

    /// Category-only condition (no title trigger).
    pub fn category(phrases: &[&str]) -> Self {
        Self::default().in_category(phrases)
    }

    /// Lowercase every phrase so matching can compare against lowercased input.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.any_contains,
            &mut self.all_contains,
            &mut self.category_contains,
        ] {
            for p in list.iter_mut() {
                *p = p.to_lowercase();
            }
        }
        self
    }

    /// `title` and `category` must already be lowercased.
    pub fn matches(&self, title: &str, category: &str) -> bool {
        if !self.any_contains.is_empty() && !self.any_contains.iter().any(|p| title.contains(p.as_str())) {
            return false;
        }
        if !self.all_contains.iter().all(|p| title.contains(p.as_str())) {
            return false;
        }
        if !self.category_contains.is_empty()
            && !self.category_contains.iter().any(|p| category.contains(p.as_str()))
        {
            return false;
        }
        true
    }
}

fn owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

/// Read a JSON rule table from disk.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading rules from {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing rules in {}", path.display()))
}
