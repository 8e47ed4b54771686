//! Review Scheduler Module
//!
//! Pure per-item scheduling functions:
//! - Interval calculation (SM-2 derivative with root family bonus and
//!   frequency multipliers)
//! - Stage classification (new / learning / young / mature / suspended)
//! - Difficulty scoring and the promotion-to-known policy
//!
//! ## Core Formulas:
//! - Ease: EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)), clamped to [1.3, 2.5]
//! - Interval (streak ≥ 3): I' = round(I * (EF' + bonus)) * freq(rank) * adj(q), clamped to [1, 365]

mod difficulty;
mod interval;
mod stage;

pub use interval::{
    FAILURE_EASE_PENALTY, FamilyBonus, MAX_FAMILY_BONUS, MAX_INTERVAL_DAYS, MIN_INTERVAL_DAYS,
    Quality, ReviewOutcome, SECOND_INTERVAL_DAYS, clamp_ease, compute_next_review,
    compute_next_review_at, family_bonus_for, frequency_multiplier, next_ease_factor,
    quality_adjustment, root_family_bonus,
};

pub use stage::{MATURE_MIN_INTERVAL_DAYS, MATURE_MIN_STREAK, Stage, classify_stage};

pub use difficulty::{
    EASE_WEIGHT, PROMOTION_MIN_EASE, PROMOTION_MIN_INTERVAL_DAYS, PROMOTION_MIN_STREAK,
    STREAK_WEIGHT, VOLUME_SCALE, VOLUME_WEIGHT, compute_difficulty, should_promote_to_known,
};
