//! Vocabulary statistics
//!
//! Aggregate view over a snapshot for reporting.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduler::{Stage, classify_stage, should_promote_to_known};
use crate::vocab::{Familiarity, VocabularyItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyStats {
    pub total_items: usize,
    pub by_familiarity: BTreeMap<Familiarity, usize>,
    pub by_stage: BTreeMap<Stage, usize>,
    /// Non-suspended items due right now
    pub due_now: usize,
    /// Averages over non-suspended items with at least one review
    pub average_ease_factor: f64,
    pub average_difficulty: f64,
    /// Items that meet the promotion policy but are not yet `Known`
    pub promotable: usize,
    pub total_reviews: u64,
}

impl Default for VocabularyStats {
    fn default() -> Self {
        Self {
            total_items: 0,
            by_familiarity: Familiarity::ALL.iter().map(|f| (*f, 0)).collect(),
            by_stage: Stage::ACTIVE
                .iter()
                .chain(std::iter::once(&Stage::Suspended))
                .map(|s| (*s, 0))
                .collect(),
            due_now: 0,
            average_ease_factor: 0.0,
            average_difficulty: 0.0,
            promotable: 0,
            total_reviews: 0,
        }
    }
}

impl VocabularyStats {
    pub fn collect(items: &[VocabularyItem]) -> Self {
        Self::collect_at(items, Utc::now())
    }

    pub fn collect_at(items: &[VocabularyItem], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total_items: items.len(),
            ..Default::default()
        };

        let mut reviewed = 0usize;
        let mut ease_sum = 0.0;
        let mut difficulty_sum = 0.0;

        for item in items {
            *stats.by_familiarity.entry(item.familiarity).or_insert(0) += 1;
            let stage = classify_stage(item);
            *stats.by_stage.entry(stage).or_insert(0) += 1;
            stats.total_reviews += item.review_count as u64;

            if stage == Stage::Suspended {
                continue;
            }
            if item.is_due_at(now) {
                stats.due_now += 1;
            }
            if item.familiarity != Familiarity::Known && should_promote_to_known(item) {
                stats.promotable += 1;
            }
            if item.review_count > 0 {
                reviewed += 1;
                ease_sum += item.ease_factor;
                difficulty_sum += item.difficulty_score;
            }
        }

        if reviewed > 0 {
            stats.average_ease_factor = ease_sum / reviewed as f64;
            stats.average_difficulty = difficulty_sum / reviewed as f64;
        }

        stats
    }

    /// Share of non-suspended items that are `Known`
    pub fn known_ratio(&self) -> f64 {
        let active = self.total_items - self.by_stage.get(&Stage::Suspended).copied().unwrap_or(0);
        if active == 0 {
            return 0.0;
        }
        self.by_familiarity.get(&Familiarity::Known).copied().unwrap_or(0) as f64 / active as f64
    }
}
