//! Vocabulary Module
//!
//! The data model shared by every scheduling component:
//! - `VocabularyItem`: one word tracked for one learner
//! - `Familiarity`: the user-facing bucket, with `Ignored` as a hard opt-out
//! - `Location`: where in the source text a word was met
//! - `ItemUpdate`: partial write-back keyed by item id

mod item;
mod update;

pub use item::{
    DEFAULT_EASE_FACTOR, Familiarity, INITIAL_DIFFICULTY, Location, MAX_EASE_FACTOR,
    MIN_EASE_FACTOR, VocabularyItem,
};
pub use update::ItemUpdate;
