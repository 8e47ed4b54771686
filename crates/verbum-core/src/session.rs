//! Review Session
//!
//! Drives the review loop on top of an [`ItemStore`]:
//!
//! 1. fetch a snapshot and build the queue
//! 2. present items one at a time
//! 3. on each answer, schedule the item, apply the promotion policy and
//!    write the result back
//!
//! The scheduler keeps no state between calls, so a session is just the
//! queue plus a cursor. Dropping it mid-way is cancellation: answered items
//! are already written, the rest are untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::error::{Result, VerbumError};
use crate::queue::build_review_queue_at;
use crate::scheduler::{
    Quality, ReviewOutcome, Stage, classify_stage, compute_next_review_at, family_bonus_for,
    should_promote_to_known,
};
use crate::store::ItemStore;
use crate::vocab::{Familiarity, ItemUpdate, VocabularyItem};

// ============================================================================
// RECORDS
// ============================================================================

/// What happened when one item was answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub item_id: String,
    pub quality: Quality,
    pub outcome: ReviewOutcome,
    pub root_family_bonus: f64,
    pub stage_before: Stage,
    pub stage_after: Stage,
    /// The item was moved to `Known` by this answer
    pub promoted: bool,
    /// The item as stored after the write-back
    pub item: VocabularyItem,
}

/// Running totals for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub reviewed: u32,
    pub correct: u32,
    pub failed: u32,
    pub promoted: u32,
    pub skipped: u32,
}

impl SessionSummary {
    /// Share of answers that were successful, 0 when nothing was answered
    pub fn accuracy(&self) -> f64 {
        if self.reviewed == 0 {
            0.0
        } else {
            self.correct as f64 / self.reviewed as f64
        }
    }

    fn record(&mut self, answer: &AnswerRecord) {
        self.reviewed += 1;
        if answer.quality.is_success() {
            self.correct += 1;
        } else {
            self.failed += 1;
        }
        if answer.promoted {
            self.promoted += 1;
        }
    }
}

// ============================================================================
// SINGLE ANSWER
// ============================================================================

/// Schedule one answer against a snapshot and write it back
fn apply_answer<S: ItemStore + ?Sized>(
    store: &S,
    snapshot: &[VocabularyItem],
    item: &VocabularyItem,
    quality: Quality,
    auto_promote: bool,
    now: DateTime<Utc>,
) -> Result<AnswerRecord> {
    if item.is_suspended() {
        tracing::warn!(item_id = %item.item_id, "Refusing to schedule an ignored item");
        return Err(VerbumError::InvalidArgument(format!(
            "item {} is ignored and cannot be reviewed",
            item.item_id
        )));
    }

    let bonus = family_bonus_for(item, snapshot);
    let outcome = compute_next_review_at(item, quality, bonus, now);
    let mut update: ItemUpdate = outcome.to_update(item, now);

    let mut after = item.clone();
    update.apply(&mut after);

    let promoted = auto_promote
        && after.familiarity != Familiarity::Known
        && should_promote_to_known(&after);

    if promoted {
        update.familiarity = Some(Familiarity::Known);
        tracing::info!(
            item_id = %item.item_id,
            interval = outcome.new_interval_days,
            "Promoted item to known"
        );
    } else if matches!(item.familiarity, Familiarity::New | Familiarity::Seen) {
        update.familiarity = Some(Familiarity::Learning);
    }

    let stored = store.apply_update(&update)?;

    Ok(AnswerRecord {
        item_id: item.item_id.clone(),
        quality,
        outcome,
        root_family_bonus: bonus.value(),
        stage_before: classify_stage(item),
        stage_after: classify_stage(&stored),
        promoted,
        item: stored,
    })
}

/// Answer a single item outside of a session, relative to now
pub fn review_item<S: ItemStore + ?Sized>(
    store: &S,
    item_id: &str,
    quality: Quality,
    config: &SchedulerConfig,
) -> Result<AnswerRecord> {
    review_item_at(store, item_id, quality, config, Utc::now())
}

/// Answer a single item outside of a session, relative to `now`
pub fn review_item_at<S: ItemStore + ?Sized>(
    store: &S,
    item_id: &str,
    quality: Quality,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> Result<AnswerRecord> {
    let snapshot = store.snapshot()?;
    let item = snapshot
        .iter()
        .find(|item| item.item_id == item_id)
        .ok_or_else(|| VerbumError::NotFound(item_id.to_string()))?;
    apply_answer(store, &snapshot, item, quality, config.auto_promote, now)
}

// ============================================================================
// FAMILIARITY OVERRIDES
// ============================================================================

/// Explicitly set an item's familiarity
pub fn set_familiarity<S: ItemStore + ?Sized>(
    store: &S,
    item_id: &str,
    familiarity: Familiarity,
) -> Result<VocabularyItem> {
    let item = store.apply_update(&ItemUpdate::familiarity(item_id, familiarity))?;
    tracing::info!(item_id, familiarity = %familiarity, "Familiarity override");
    Ok(item)
}

/// "I know this"
pub fn mark_known<S: ItemStore + ?Sized>(store: &S, item_id: &str) -> Result<VocabularyItem> {
    set_familiarity(store, item_id, Familiarity::Known)
}

/// Remove an item from scheduling
pub fn mark_ignored<S: ItemStore + ?Sized>(store: &S, item_id: &str) -> Result<VocabularyItem> {
    set_familiarity(store, item_id, Familiarity::Ignored)
}

/// Bring an ignored item back into active study
///
/// Items that are not ignored are returned unchanged.
pub fn reactivate<S: ItemStore + ?Sized>(store: &S, item_id: &str) -> Result<VocabularyItem> {
    let item = store
        .get_item(item_id)?
        .ok_or_else(|| VerbumError::NotFound(item_id.to_string()))?;
    if item.is_suspended() {
        set_familiarity(store, item_id, Familiarity::Learning)
    } else {
        Ok(item)
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// One pass over a review queue
pub struct ReviewSession<'s, S: ItemStore + ?Sized> {
    store: &'s S,
    config: SchedulerConfig,
    snapshot: Vec<VocabularyItem>,
    queue: Vec<VocabularyItem>,
    position: usize,
    summary: SessionSummary,
}

impl<'s, S: ItemStore + ?Sized> ReviewSession<'s, S> {
    /// Fetch a snapshot and build the queue, relative to now
    pub fn start(store: &'s S, config: SchedulerConfig) -> Result<Self> {
        Self::start_at(store, config, Utc::now())
    }

    /// Fetch a snapshot and build the queue, relative to `now`
    pub fn start_at(store: &'s S, config: SchedulerConfig, now: DateTime<Utc>) -> Result<Self> {
        config.validate()?;
        let snapshot = store.snapshot()?;
        let queue = build_review_queue_at(&snapshot, &config.queue, now);

        tracing::info!(
            queued = queue.len(),
            practice = config.queue.practice_mode,
            "Review session started"
        );

        Ok(Self {
            store,
            config,
            snapshot,
            queue,
            position: 0,
            summary: SessionSummary::default(),
        })
    }

    /// The item waiting for an answer
    pub fn current(&self) -> Option<&VocabularyItem> {
        self.queue.get(self.position)
    }

    /// Items not yet answered or skipped, the current one included
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.position)
    }

    /// Full queue as built at session start
    pub fn queue(&self) -> &[VocabularyItem] {
        &self.queue
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.queue.len()
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Answer the current item, relative to now. See [`Self::answer_at`].
    pub fn answer(&mut self, quality: Quality) -> Result<AnswerRecord> {
        self.answer_at(quality, Utc::now())
    }

    /// Answer the current item, relative to `now`
    ///
    /// On error nothing is recorded and the cursor stays on the item, so
    /// `current()` returns it again. Retry the answer or `skip()` past it.
    pub fn answer_at(&mut self, quality: Quality, now: DateTime<Utc>) -> Result<AnswerRecord> {
        let item = self
            .current()
            .cloned()
            .ok_or_else(|| VerbumError::InvalidArgument("review session is finished".into()))?;

        let record = apply_answer(
            self.store,
            &self.snapshot,
            &item,
            quality,
            self.config.auto_promote,
            now,
        )?;

        // Later family bonuses see this answer's promotion
        if let Some(entry) = self.snapshot.iter_mut().find(|i| i.item_id == record.item_id) {
            *entry = record.item.clone();
        }

        self.summary.record(&record);
        self.position += 1;
        Ok(record)
    }

    /// Move past the current item without writing anything
    pub fn skip(&mut self) -> Option<VocabularyItem> {
        let item = self.current().cloned()?;
        self.summary.skipped += 1;
        self.position += 1;
        Some(item)
    }

    /// End the session and return its totals
    pub fn finish(self) -> SessionSummary {
        tracing::info!(
            reviewed = self.summary.reviewed,
            correct = self.summary.correct,
            promoted = self.summary.promoted,
            skipped = self.summary.skipped,
            unanswered = self.remaining(),
            "Review session finished"
        );
        self.summary
    }
}

// ============================================================================
// TESTS
// ============================================================================
