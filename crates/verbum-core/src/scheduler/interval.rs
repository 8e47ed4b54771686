//! Interval Calculator
//!
//! SM-2 derivative. Given an item's scheduling state and a 0-5 quality
//! rating, produces the next ease factor, interval, due date and streak.
//!
//! Differences from textbook SM-2:
//! - Failures cost an extra 0.2 of ease on top of the SM-2 ease delta
//! - Words sharing a root with known words grow faster (root family bonus)
//! - Very frequent words are over-reinforced by reading alone, so their
//!   intervals stretch; rare words are shown more often
//! - A perfect answer stretches the interval by 10%, a hesitant one trims it

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VerbumError};
use crate::vocab::{Familiarity, ItemUpdate, MAX_EASE_FACTOR, MIN_EASE_FACTOR, VocabularyItem};

use super::difficulty::compute_difficulty;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Shortest interval once an item has been reviewed
pub const MIN_INTERVAL_DAYS: u32 = 1;

/// Longest interval the scheduler will ever hand out
pub const MAX_INTERVAL_DAYS: u32 = 365;

/// Interval after the second consecutive success
pub const SECOND_INTERVAL_DAYS: u32 = 6;

/// Extra ease removed on a failed answer
pub const FAILURE_EASE_PENALTY: f64 = 0.2;

/// Upper bound of the root family bonus
pub const MAX_FAMILY_BONUS: f64 = 0.5;

// ============================================================================
// QUALITY
// ============================================================================

/// A validated answer quality in `0..=5`
///
/// - 0-2: failure (blackout, wrong, wrong but familiar)
/// - 3: correct with serious difficulty
/// - 4: correct after hesitation
/// - 5: perfect recall
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    /// Lowest quality that counts as a successful recall
    pub const PASSING: u8 = 3;

    /// Validate a raw rating
    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(VerbumError::InvalidQuality(value))
        }
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Quality 3 and above
    #[inline]
    pub fn is_success(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl TryFrom<i64> for Quality {
    type Error = VerbumError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<u8> for Quality {
    type Error = VerbumError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value as i64)
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> Self {
        q.0
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// FAMILY BONUS
// ============================================================================

/// A validated root family bonus in `[0, 0.5]`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FamilyBonus(f64);

impl FamilyBonus {
    pub const ZERO: FamilyBonus = FamilyBonus(0.0);

    /// Validate a raw bonus
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (0.0..=MAX_FAMILY_BONUS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(VerbumError::InvalidArgument(format!(
                "root family bonus must be within [0, {MAX_FAMILY_BONUS}], got {value}"
            )))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for FamilyBonus {
    type Error = VerbumError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FamilyBonus> for f64 {
    fn from(bonus: FamilyBonus) -> Self {
        bonus.0
    }
}

// ============================================================================
// REVIEW OUTCOME
// ============================================================================

/// Result of scheduling one answer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub new_ease_factor: f64,
    pub new_interval_days: u32,
    pub next_review_date: DateTime<Utc>,
    pub new_consecutive_correct: u32,
}

impl ReviewOutcome {
    /// Build the write-back for this outcome
    ///
    /// Carries the outcome fields plus the bookkeeping the caller owns:
    /// review count, last-reviewed timestamp and a refreshed difficulty.
    /// Familiarity is left to the caller's promotion decision.
    pub fn to_update(&self, item: &VocabularyItem, reviewed_at: DateTime<Utc>) -> ItemUpdate {
        let mut after = item.clone();
        after.ease_factor = self.new_ease_factor;
        after.interval_days = self.new_interval_days;
        after.consecutive_correct = self.new_consecutive_correct;
        after.review_count = item.review_count.saturating_add(1);

        ItemUpdate {
            ease_factor: Some(self.new_ease_factor),
            interval_days: Some(self.new_interval_days),
            next_review_date: Some(Some(self.next_review_date)),
            consecutive_correct: Some(self.new_consecutive_correct),
            difficulty_score: Some(compute_difficulty(&after)),
            review_count: Some(after.review_count),
            last_reviewed: Some(reviewed_at),
            ..ItemUpdate::for_item(item.item_id.clone())
        }
    }
}

// ============================================================================
// CORE FUNCTIONS
// ============================================================================

/// Clamp an ease factor into [1.3, 2.5]
#[inline]
pub fn clamp_ease(ease: f64) -> f64 {
    ease.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR)
}

/// SM-2 ease update, with the extra failure penalty
pub fn next_ease_factor(ease: f64, quality: Quality) -> f64 {
    let miss = (5 - quality.value()) as f64;
    let updated = clamp_ease(ease + (0.1 - miss * (0.08 + miss * 0.02)));

    if quality.is_success() {
        updated
    } else {
        clamp_ease(updated - FAILURE_EASE_PENALTY)
    }
}

/// Interval multiplier from corpus frequency rank
///
/// | rank      | multiplier |
/// |-----------|------------|
/// | 0         | 1.0 (unranked) |
/// | 1-100     | 1.3        |
/// | 101-500   | 1.15       |
/// | 501-1000  | 1.0        |
/// | > 1000    | 0.9        |
pub fn frequency_multiplier(frequency_rank: u32) -> f64 {
    match frequency_rank {
        0 => 1.0,
        1..=100 => 1.3,
        101..=500 => 1.15,
        501..=1000 => 1.0,
        _ => 0.9,
    }
}

/// Fine adjustment on successful answers: 5 stretches, 3 trims
pub fn quality_adjustment(quality: Quality) -> f64 {
    match quality.value() {
        5 => 1.1,
        3 => 0.9,
        _ => 1.0,
    }
}

/// Bonus for words whose root family is already partly known
///
/// `(known / total) * 0.5` for families of two or more, otherwise 0.
pub fn root_family_bonus(known_in_family: usize, total_in_family: usize) -> f64 {
    if total_in_family <= 1 {
        return 0.0;
    }
    let known = known_in_family.min(total_in_family) as f64;
    (known / total_in_family as f64) * MAX_FAMILY_BONUS
}

/// Root family bonus for `item`, counted over a snapshot
///
/// The family is every item in `items` with the same root, the item itself
/// included. Suspended items do not count toward the family.
pub fn family_bonus_for(item: &VocabularyItem, items: &[VocabularyItem]) -> FamilyBonus {
    let Some(root) = item.root.as_deref() else {
        return FamilyBonus::ZERO;
    };

    let mut total = 0usize;
    let mut known = 0usize;
    let mut saw_self = false;

    for other in items {
        if other.is_suspended() || other.root.as_deref() != Some(root) {
            continue;
        }
        if other.item_id == item.item_id {
            saw_self = true;
        }
        total += 1;
        if other.familiarity == Familiarity::Known {
            known += 1;
        }
    }

    // Snapshot may not contain the item being answered
    if !saw_self {
        total += 1;
        if item.familiarity == Familiarity::Known {
            known += 1;
        }
    }

    // Always within [0, MAX_FAMILY_BONUS]
    FamilyBonus(root_family_bonus(known, total))
}

/// Schedule the next review of `item`, relative to now
pub fn compute_next_review(
    item: &VocabularyItem,
    quality: Quality,
    root_family_bonus: FamilyBonus,
) -> ReviewOutcome {
    compute_next_review_at(item, quality, root_family_bonus, Utc::now())
}

/// Schedule the next review of `item`, relative to `now`
pub fn compute_next_review_at(
    item: &VocabularyItem,
    quality: Quality,
    root_family_bonus: FamilyBonus,
    now: DateTime<Utc>,
) -> ReviewOutcome {
    let bonus = root_family_bonus.value();
    let new_ease = next_ease_factor(item.ease_factor, quality);

    let (raw_interval, new_streak) = if quality.is_success() {
        let streak = item.consecutive_correct.saturating_add(1);
        let base = match streak {
            1 => MIN_INTERVAL_DAYS as f64,
            2 => SECOND_INTERVAL_DAYS as f64,
            _ => (item.interval_days as f64 * (new_ease + bonus)).round(),
        };
        let adjusted =
            base * frequency_multiplier(item.frequency_rank) * quality_adjustment(quality);
        (adjusted.round(), streak)
    } else {
        (MIN_INTERVAL_DAYS as f64, 0)
    };

    let new_interval =
        raw_interval.clamp(MIN_INTERVAL_DAYS as f64, MAX_INTERVAL_DAYS as f64) as u32;

    tracing::debug!(
        item_id = %item.item_id,
        quality = quality.value(),
        ease = new_ease,
        interval = new_interval,
        streak = new_streak,
        "Scheduled review"
    );

    ReviewOutcome {
        new_ease_factor: new_ease,
        new_interval_days: new_interval,
        next_review_date: now + Duration::days(new_interval as i64),
        new_consecutive_correct: new_streak,
    }
}

// ============================================================================
// TESTS
// ============================================================================
