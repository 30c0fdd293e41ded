// src/analyze/mod.rs
//! Item analysis: importance scoring (sum of matching rules) and rationale
//! labelling (first matching rule).

pub mod rationale;
pub mod rules;
pub mod scoring;

use std::path::Path;

use crate::ingest::types::{RawItem, ScoredItem};

// Re-export convenient types.
pub use crate::analyze::rationale::{annotate, LabelRule, LabelTable, DEFAULT_LABEL};
pub use crate::analyze::rules::When;
pub use crate::analyze::scoring::{score, ScoreRule, ScoreTable};

/// Both rule tables, applied together to every parsed item.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pub scoring: ScoreTable,
    pub rationale: LabelTable,
}

impl Analyzer {
    pub fn new(scoring: ScoreTable, rationale: LabelTable) -> Self {
        Self { scoring, rationale }
    }

    /// Built-in tables unless a JSON override path is given.
    pub fn from_paths(scoring: Option<&Path>, rationale: Option<&Path>) -> Self {
        Self {
            scoring: scoring.map(ScoreTable::load_from_file).unwrap_or_default(),
            rationale: rationale.map(LabelTable::load_from_file).unwrap_or_default(),
        }
    }

    pub fn analyze(&self, item: RawItem, source_category: &str, seq: usize) -> ScoredItem {
        let importance = self.scoring.score(&item.title, source_category);
        let rationale = self.rationale.annotate(&item.title, source_category);
        tracing::debug!(source = source_category, importance, %rationale, title = %item.title, "scored");
        ScoredItem {
            item,
            source_category: source_category.to_string(),
            importance,
            rationale,
            seq,
        }
    }
}
