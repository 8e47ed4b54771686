//! Difficulty Scorer & Promotion Policy
//!
//! Difficulty is a weighted blend of three normalized signals:
//!
//! | component | value                              | weight |
//! |-----------|------------------------------------|--------|
//! | ease      | 1 - (ease - 1.3) / (2.5 - 1.3)     | 0.4    |
//! | streak    | max(0, 1 - consecutive_correct/5)  | 0.4    |
//! | volume    | min(1, review_count/20) * 0.3      | 0.2    |
//!
//! The volume term is pre-scaled by 0.3 before its 0.2 weight, so review
//! volume only moves the score by up to 0.06. Rebalancing it changes queue
//! ordering for every learner.

use crate::vocab::{MAX_EASE_FACTOR, MIN_EASE_FACTOR, VocabularyItem};

/// Weight of the ease component
pub const EASE_WEIGHT: f64 = 0.4;

/// Weight of the streak component
pub const STREAK_WEIGHT: f64 = 0.4;

/// Weight of the volume component
pub const VOLUME_WEIGHT: f64 = 0.2;

/// Inner scale applied to the volume component before its weight
pub const VOLUME_SCALE: f64 = 0.3;

/// Streak length at which the streak component bottoms out
pub const STREAK_SATURATION: u32 = 5;

/// Review count at which the volume component saturates
pub const VOLUME_SATURATION: u32 = 20;

/// Promotion threshold: consecutive correct answers
pub const PROMOTION_MIN_STREAK: u32 = 5;

/// Promotion threshold: ease factor
pub const PROMOTION_MIN_EASE: f64 = 2.0;

/// Promotion threshold: interval in days
pub const PROMOTION_MIN_INTERVAL_DAYS: u32 = 21;

/// Estimate how hard an item is for this learner, in [0, 1]
pub fn compute_difficulty(item: &VocabularyItem) -> f64 {
    let ease =
        1.0 - (item.ease_factor - MIN_EASE_FACTOR) / (MAX_EASE_FACTOR - MIN_EASE_FACTOR);
    let streak = (1.0 - item.consecutive_correct as f64 / STREAK_SATURATION as f64).max(0.0);
    let volume = (item.review_count as f64 / VOLUME_SATURATION as f64).min(1.0) * VOLUME_SCALE;

    (ease * EASE_WEIGHT + streak * STREAK_WEIGHT + volume * VOLUME_WEIGHT).clamp(0.0, 1.0)
}

/// Whether an item is ready to retire from active review
///
/// The review loop checks this right after applying a scheduling result and
/// marks the item `Known` when it holds.
pub fn should_promote_to_known(item: &VocabularyItem) -> bool {
    item.consecutive_correct >= PROMOTION_MIN_STREAK
        && item.ease_factor >= PROMOTION_MIN_EASE
        && item.interval_days >= PROMOTION_MIN_INTERVAL_DAYS
}
