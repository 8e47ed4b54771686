//! Review Queue Builder
//!
//! Selects, filters, prioritizes and truncates a snapshot of items into the
//! ordered list a review session walks through.
//!
//! ## Selection
//! - `Learning` items always; `Seen` items when new words are included;
//!   `Known` items only in practice mode; never `New` or `Ignored`
//! - optional container filter over first-seen and encounter locations
//! - normal mode keeps due items; practice mode keeps anything reviewed
//!   before the cooldown window, due or not
//!
//! ## Priority (highest first, stable)
//! - normal: overdue milliseconds + difficulty × (500k quick / 1M otherwise)
//! - practice: difficulty × 0.5 + days since last review × 0.5

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::vocab::{Familiarity, VocabularyItem};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Difficulty weight in quick sessions
pub const QUICK_DIFFICULTY_WEIGHT: f64 = 500_000.0;

/// Difficulty weight in standard sessions
pub const STANDARD_DIFFICULTY_WEIGHT: f64 = 1_000_000.0;

/// Default session size
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// Default practice-mode cooldown (minutes since last review)
pub const DEFAULT_PRACTICE_COOLDOWN_MINUTES: i64 = 60;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// ============================================================================
// OPTIONS
// ============================================================================

/// Session flavour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Short session, leans on overdueness over difficulty
    Quick,
    #[default]
    Standard,
}

impl SessionMode {
    /// Multiplier applied to difficulty in the normal-mode priority key
    pub fn difficulty_weight(&self) -> f64 {
        match self {
            SessionMode::Quick => QUICK_DIFFICULTY_WEIGHT,
            SessionMode::Standard => STANDARD_DIFFICULTY_WEIGHT,
        }
    }
}

/// Parameters for one queue build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueOptions {
    pub mode: SessionMode,
    /// Hard cap on the queue length
    pub max_items: usize,
    /// Only items met in this container
    pub container_filter: Option<String>,
    /// Also offer `Seen` items
    pub include_new_words: bool,
    /// Review not-yet-due items, `Known` ones included
    pub practice_mode: bool,
    /// Practice mode skips items answered within this many minutes
    pub practice_cooldown_minutes: i64,
}

impl Default for QueueOptions {
    fn default() -> Self {
        Self {
            mode: SessionMode::Standard,
            max_items: DEFAULT_MAX_ITEMS,
            container_filter: None,
            include_new_words: false,
            practice_mode: false,
            practice_cooldown_minutes: DEFAULT_PRACTICE_COOLDOWN_MINUTES,
        }
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Whether the item's familiarity admits it to the candidate pool
fn is_candidate(item: &VocabularyItem, options: &QueueOptions) -> bool {
    match item.familiarity {
        Familiarity::Learning => true,
        Familiarity::Seen => options.include_new_words,
        Familiarity::Known => options.practice_mode,
        Familiarity::New | Familiarity::Ignored => false,
    }
}

fn matches_container(item: &VocabularyItem, options: &QueueOptions) -> bool {
    options
        .container_filter
        .as_deref()
        .map(|container| item.appears_in(container))
        .unwrap_or(true)
}

/// Whether the item should be shown in this session
fn is_eligible(item: &VocabularyItem, options: &QueueOptions, now: DateTime<Utc>) -> bool {
    if options.practice_mode {
        // A cooldown reaching past the earliest representable instant means
        // nothing counts as recent
        let cutoff = Duration::try_minutes(options.practice_cooldown_minutes.max(0))
            .and_then(|cooldown| now.checked_sub_signed(cooldown));
        let outside_cooldown = match (item.last_reviewed, cutoff) {
            (Some(reviewed), Some(cutoff)) => reviewed < cutoff,
            _ => true,
        };
        item.review_count > 0 && outside_cooldown
    } else {
        item.is_due_at(now)
    }
}

/// Sort key for an eligible item, higher is shown first
pub fn review_priority(item: &VocabularyItem, options: &QueueOptions, now: DateTime<Utc>) -> f64 {
    if options.practice_mode {
        let days_since = item
            .last_reviewed
            .map(|t| (now - t).num_milliseconds().max(0) as f64 / MILLIS_PER_DAY)
            .unwrap_or(0.0);
        item.difficulty_score * 0.5 + days_since * 0.5
    } else {
        let overdue_ms = item
            .next_review_date
            .map(|t| (now - t).num_milliseconds().max(0) as f64)
            .unwrap_or(0.0);
        overdue_ms + item.difficulty_score * options.mode.difficulty_weight()
    }
}

// ============================================================================
// BUILD
// ============================================================================

/// Build an ordered review queue, relative to now
pub fn build_review_queue(items: &[VocabularyItem], options: &QueueOptions) -> Vec<VocabularyItem> {
    build_review_queue_at(items, options, Utc::now())
}

/// Build an ordered review queue, relative to `now`
///
/// Never longer than `options.max_items`. Ties keep input order.
pub fn build_review_queue_at(
    items: &[VocabularyItem],
    options: &QueueOptions,
    now: DateTime<Utc>,
) -> Vec<VocabularyItem> {
    let mut scored: Vec<(f64, &VocabularyItem)> = items
        .iter()
        .filter(|item| is_candidate(item, options))
        .filter(|item| matches_container(item, options))
        .filter(|item| is_eligible(item, options, now))
        .map(|item| (review_priority(item, options, now), item))
        .collect();

    let eligible = scored.len();

    // sort_by is stable, so equal keys keep their input order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let queue: Vec<VocabularyItem> = scored
        .into_iter()
        .take(options.max_items)
        .map(|(_, item)| item.clone())
        .collect();

    tracing::debug!(
        total = items.len(),
        eligible,
        queued = queue.len(),
        practice = options.practice_mode,
        "Built review queue"
    );

    queue
}

// ============================================================================
// TESTS
// ============================================================================
