//! # Verbum Core
//!
//! Vocabulary review scheduling engine. Decides, for every word a learner has
//! met, whether it is due, when it becomes due next, and in what order a
//! bounded session should present it:
//!
//! - **Interval Calculator**: SM-2 derivative with a failure penalty, a root
//!   family bonus for words whose relatives are already known, and frequency
//!   multipliers for words the learner keeps reading anyway
//! - **Stage Classifier**: new / learning / young / mature / suspended
//! - **Difficulty Scorer & Promotion Policy**: continuous difficulty estimate
//!   and the "ready to retire" decision
//! - **Queue & Forecast Builder**: ordered, capped review queues and per-day
//!   due forecasts
//!
//! Every scheduling function is pure: plain data in, plain data out, no
//! locking, no I/O. Persistence belongs to an [`ItemStore`]; the
//! [`ReviewSession`] ties the two together.
//!
//! ## Quick Start
//!
//! ```rust
//! use verbum_core::{
//!     InMemoryStore, Location, Quality, QueueOptions, ReviewSession, SchedulerConfig,
//!     VocabularyItem, Familiarity,
//! };
//!
//! let store = InMemoryStore::from_items([
//!     VocabularyItem::new("w-1", "λόγος", "λόγος", Location::new("john", "1:1", 3))
//!         .with_familiarity(Familiarity::Learning),
//! ]);
//!
//! let mut session = ReviewSession::start(&store, SchedulerConfig::default())?;
//! while session.current().is_some() {
//!     let record = session.answer(Quality::new(4)?)?;
//!     assert_eq!(record.outcome.new_interval_days, 1);
//! }
//! let summary = session.finish();
//! assert_eq!(summary.reviewed, 1);
//! # let _ = QueueOptions::default();
//! # Ok::<(), verbum_core::VerbumError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod error;
pub mod queue;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;
pub mod vocab;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Data model
pub use vocab::{
    DEFAULT_EASE_FACTOR, Familiarity, INITIAL_DIFFICULTY, ItemUpdate, Location, MAX_EASE_FACTOR,
    MIN_EASE_FACTOR, VocabularyItem,
};

// Per-item scheduling
pub use scheduler::{
    FamilyBonus, MAX_INTERVAL_DAYS, MIN_INTERVAL_DAYS, Quality, ReviewOutcome, Stage,
    classify_stage, compute_difficulty, compute_next_review, compute_next_review_at,
    family_bonus_for, frequency_multiplier, root_family_bonus, should_promote_to_known,
};

// Queue & forecast
pub use queue::{
    QueueOptions, ReviewForecastDay, SessionMode, build_review_queue, build_review_queue_at,
    generate_forecast, generate_forecast_at,
};

// Store boundary
pub use store::{InMemoryStore, ItemFilter, ItemStore};

// Review loop
pub use session::{
    AnswerRecord, ReviewSession, SessionSummary, mark_ignored, mark_known, reactivate,
    review_item, review_item_at, set_familiarity,
};

// Reporting & configuration
pub use config::{MAX_FORECAST_DAYS, SchedulerConfig};
pub use error::{Result, VerbumError};
pub use stats::VocabularyStats;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Familiarity, FamilyBonus, InMemoryStore, ItemFilter, ItemStore, ItemUpdate, Location,
        Quality, QueueOptions, Result, ReviewForecastDay, ReviewOutcome, ReviewSession,
        SchedulerConfig, SessionMode, Stage, VerbumError, VocabularyItem,
    };

    pub use crate::{
        build_review_queue, classify_stage, compute_difficulty, compute_next_review,
        generate_forecast, should_promote_to_known,
    };
}
