//! Stage Classifier
//!
//! Read-only view over the scheduling fields. First match wins:
//!
//! 1. `Ignored` familiarity → `Suspended`
//! 2. never reviewed → `New`
//! 3. interval under a day → `Learning`
//! 4. interval ≥ 21 days with a streak of 5+ → `Mature`
//! 5. everything else → `Young`

use serde::{Deserialize, Serialize};

use crate::vocab::{Familiarity, VocabularyItem};

/// Minimum interval for a mature item
pub const MATURE_MIN_INTERVAL_DAYS: u32 = 21;

/// Minimum streak for a mature item
pub const MATURE_MIN_STREAK: u32 = 5;

/// Coarse learning stage, used for reporting and forecasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    New,
    Learning,
    Young,
    Mature,
    Suspended,
}

impl Stage {
    /// Stages that take part in scheduling
    pub const ACTIVE: [Stage; 4] = [Stage::New, Stage::Learning, Stage::Young, Stage::Mature];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::New => "new",
            Stage::Learning => "learning",
            Stage::Young => "young",
            Stage::Mature => "mature",
            Stage::Suspended => "suspended",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derive the learning stage of an item
pub fn classify_stage(item: &VocabularyItem) -> Stage {
    if item.familiarity == Familiarity::Ignored {
        Stage::Suspended
    } else if item.review_count == 0 {
        Stage::New
    } else if item.interval_days < 1 {
        Stage::Learning
    } else if item.interval_days >= MATURE_MIN_INTERVAL_DAYS
        && item.consecutive_correct >= MATURE_MIN_STREAK
    {
        Stage::Mature
    } else {
        Stage::Young
    }
}
