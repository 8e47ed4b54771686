//! Vocabulary Item - The unit of scheduling
//!
//! Each item tracks one word (by lemma) for one learner:
//! - Display and grouping data (surface form, lemma, root, frequency rank)
//! - A coarse user-facing familiarity bucket
//! - SM-2 style scheduling state (ease factor, interval, streak)
//! - Where in the source text the word was encountered

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Lower bound for the ease factor
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Upper bound for the ease factor, also the starting value
pub const MAX_EASE_FACTOR: f64 = 2.5;

/// Ease factor assigned to freshly created items
pub const DEFAULT_EASE_FACTOR: f64 = MAX_EASE_FACTOR;

/// Difficulty of an item that has never been reviewed
///
/// Full ease contributes nothing, an empty streak contributes its whole 0.4
/// weight, and zero reviews contribute no volume.
pub const INITIAL_DIFFICULTY: f64 = 0.4;

// ============================================================================
// FAMILIARITY
// ============================================================================

/// User-facing familiarity bucket
///
/// `Ignored` removes an item from every scheduling computation until the
/// store explicitly reactivates it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Familiarity {
    /// Created but never shown to the learner
    #[default]
    New,
    /// Shown in context at least once, not yet studied
    Seen,
    /// Actively being studied
    Learning,
    /// Mastered, retired from normal review
    Known,
    /// Permanently excluded from scheduling
    Ignored,
}

impl Familiarity {
    /// All variants, in lifecycle order
    pub const ALL: [Familiarity; 5] = [
        Familiarity::New,
        Familiarity::Seen,
        Familiarity::Learning,
        Familiarity::Known,
        Familiarity::Ignored,
    ];

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Familiarity::New => "new",
            Familiarity::Seen => "seen",
            Familiarity::Learning => "learning",
            Familiarity::Known => "known",
            Familiarity::Ignored => "ignored",
        }
    }

    /// Parse from string name, `None` for anything unrecognized
    pub fn parse_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(Familiarity::New),
            "seen" => Some(Familiarity::Seen),
            "learning" => Some(Familiarity::Learning),
            "known" => Some(Familiarity::Known),
            "ignored" => Some(Familiarity::Ignored),
            _ => None,
        }
    }
}

impl std::fmt::Display for Familiarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// LOCATION
// ============================================================================

/// A position in the source material, e.g. chapter / verse / word index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Top-level container (book, chapter collection, document)
    pub container_id: String,
    /// Section inside the container (chapter, verse)
    pub section_id: String,
    /// Word index inside the section
    pub position_index: u32,
}

impl Location {
    pub fn new(
        container_id: impl Into<String>,
        section_id: impl Into<String>,
        position_index: u32,
    ) -> Self {
        Self {
            container_id: container_id.into(),
            section_id: section_id.into(),
            position_index,
        }
    }
}

// ============================================================================
// VOCABULARY ITEM
// ============================================================================

/// One tracked vocabulary item for one learner
///
/// Mutated only by applying an [`ItemUpdate`](crate::ItemUpdate), either one
/// produced by the interval calculator after a review or an explicit
/// familiarity override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    /// Stable identity, independent of the surface text
    pub item_id: String,
    /// The word as it appeared in the text
    pub surface_form: String,
    /// Dictionary form
    pub lemma: String,
    /// Lexical root, used to group word families
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Corpus frequency rank (1 = most frequent, 0 = unranked)
    #[serde(default)]
    pub frequency_rank: u32,

    // ========== Learner-facing state ==========
    #[serde(default)]
    pub familiarity: Familiarity,

    // ========== Scheduling state ==========
    /// Multiplicative interval growth rate, kept within [1.3, 2.5]
    pub ease_factor: f64,
    /// Days between the last review and the next (0 before the first review)
    pub interval_days: u32,
    /// Absent means never scheduled, available immediately
    pub next_review_date: Option<DateTime<Utc>>,
    /// Successful answers since the last failure
    pub consecutive_correct: u32,
    /// Cached difficulty estimate in [0, 1]
    pub difficulty_score: f64,
    pub review_count: u32,
    pub last_reviewed: Option<DateTime<Utc>>,

    // ========== Provenance ==========
    pub first_seen: Location,
    #[serde(default)]
    pub encounter_locations: Vec<Location>,
}

impl VocabularyItem {
    /// Create an item the first time a learner meets a previously unseen word
    pub fn new(
        item_id: impl Into<String>,
        surface_form: impl Into<String>,
        lemma: impl Into<String>,
        first_seen: Location,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            surface_form: surface_form.into(),
            lemma: lemma.into(),
            root: None,
            frequency_rank: 0,
            familiarity: Familiarity::New,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            next_review_date: None,
            consecutive_correct: 0,
            difficulty_score: INITIAL_DIFFICULTY,
            review_count: 0,
            last_reviewed: None,
            encounter_locations: vec![first_seen.clone()],
            first_seen,
        }
    }

    /// Set the lexical root
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Set the corpus frequency rank
    pub fn with_frequency_rank(mut self, rank: u32) -> Self {
        self.frequency_rank = rank;
        self
    }

    /// Set the familiarity bucket
    pub fn with_familiarity(mut self, familiarity: Familiarity) -> Self {
        self.familiarity = familiarity;
        self
    }

    /// Check if this item is due at the given time
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date.map(|t| t <= now).unwrap_or(true)
    }

    /// Check if this item is due now
    pub fn is_due(&self) -> bool {
        self.is_due_at(Utc::now())
    }

    /// Ignored items never take part in scheduling
    pub fn is_suspended(&self) -> bool {
        self.familiarity == Familiarity::Ignored
    }

    /// Whether the item was met anywhere in the given container
    pub fn appears_in(&self, container_id: &str) -> bool {
        self.first_seen.container_id == container_id
            || self
                .encounter_locations
                .iter()
                .any(|loc| loc.container_id == container_id)
    }

    /// Remember another place the word was encountered
    ///
    /// Duplicate locations are ignored.
    pub fn record_encounter(&mut self, location: Location) {
        if !self.encounter_locations.contains(&location) {
            self.encounter_locations.push(location);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
