//! Partial item updates
//!
//! The write half of the store boundary. Every field is optional; only the
//! fields that are present get written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::item::{Familiarity, VocabularyItem};

/// A partial update keyed by `item_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItemUpdate {
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_days: Option<u32>,
    /// `Some(None)` clears the due date, `None` leaves it alone
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_review_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutive_correct: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub familiarity: Option<Familiarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

/// A present JSON `null` means "clear", an absent key means "unchanged"
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ItemUpdate {
    /// Empty update for the given item
    pub fn for_item(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            ..Default::default()
        }
    }

    /// Familiarity override ("I know this", "ignore")
    pub fn familiarity(item_id: impl Into<String>, familiarity: Familiarity) -> Self {
        Self {
            familiarity: Some(familiarity),
            ..Self::for_item(item_id)
        }
    }

    /// True when applying this update would change nothing
    pub fn is_empty(&self) -> bool {
        self.ease_factor.is_none()
            && self.interval_days.is_none()
            && self.next_review_date.is_none()
            && self.consecutive_correct.is_none()
            && self.familiarity.is_none()
            && self.difficulty_score.is_none()
            && self.review_count.is_none()
            && self.last_reviewed.is_none()
    }

    /// Write the present fields onto `item`
    pub fn apply(&self, item: &mut VocabularyItem) {
        if let Some(ease) = self.ease_factor {
            item.ease_factor = ease;
        }
        if let Some(interval) = self.interval_days {
            item.interval_days = interval;
        }
        if let Some(next) = self.next_review_date {
            item.next_review_date = next;
        }
        if let Some(streak) = self.consecutive_correct {
            item.consecutive_correct = streak;
        }
        if let Some(familiarity) = self.familiarity {
            item.familiarity = familiarity;
        }
        if let Some(difficulty) = self.difficulty_score {
            item.difficulty_score = difficulty;
        }
        if let Some(count) = self.review_count {
            item.review_count = count;
        }
        if let Some(at) = self.last_reviewed {
            item.last_reviewed = Some(at);
        }
    }
}
