//! Test Data Factory
//!
//! Provides utilities for generating realistic vocabulary:
//! - Single items in each familiarity state
//! - Whole decks with roots, frequency ranks and due dates
//! - Pre-built scenarios for common test cases

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use verbum_core::{Familiarity, Location, VocabularyItem};

/// Factory for creating test data
///
/// # Example
///
/// ```rust,ignore
/// let item = TestDataFactory::learning_item("λόγος", now);
/// let deck = TestDataFactory::create_deck(&DeckConfig { count: 50, ..Default::default() }, now);
/// let scenario = TestDataFactory::create_family_scenario(now);
/// ```
pub struct TestDataFactory;

/// Configuration for deck generation
#[derive(Debug, Clone)]
pub struct DeckConfig {
    /// Number of items to create
    pub count: usize,
    /// Containers the items are spread across
    pub containers: Vec<String>,
    /// Distinct roots (0 = no roots)
    pub root_families: usize,
    /// Familiarity cycle applied by index
    pub familiarities: Vec<Familiarity>,
    /// Due dates are spread over this many days, starting overdue
    pub due_spread_days: i64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            count: 20,
            containers: vec!["john".to_string(), "mark".to_string()],
            root_families: 4,
            familiarities: vec![Familiarity::Learning],
            due_spread_days: 10,
        }
    }
}

/// Scenario containing related test data
#[derive(Debug)]
pub struct TestScenario {
    pub items: Vec<VocabularyItem>,
    pub description: String,
    /// Named item ids for assertions
    pub ids: HashMap<String, String>,
}

impl TestScenario {
    pub fn id(&self, name: &str) -> &str {
        self.ids
            .get(name)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("no item named {name} in scenario"))
    }
}

impl TestDataFactory {
    // ========================================================================
    // SINGLE ITEMS
    // ========================================================================

    /// Unique id in the format the application store uses
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// A word just met in a text
    pub fn seen_item(lemma: &str) -> VocabularyItem {
        VocabularyItem::new(
            Self::new_id(),
            lemma,
            lemma,
            Location::new("john", "1:1", 0),
        )
        .with_familiarity(Familiarity::Seen)
    }

    /// A learning item that has been answered once and is due at `due`
    pub fn learning_item(lemma: &str, due: DateTime<Utc>) -> VocabularyItem {
        let mut item = Self::seen_item(lemma).with_familiarity(Familiarity::Learning);
        item.review_count = 1;
        item.consecutive_correct = 1;
        item.interval_days = 1;
        item.last_reviewed = Some(due - Duration::days(1));
        item.next_review_date = Some(due);
        item
    }

    /// A retired item far from its next review
    pub fn known_item(lemma: &str, now: DateTime<Utc>) -> VocabularyItem {
        let mut item = Self::seen_item(lemma).with_familiarity(Familiarity::Known);
        item.review_count = 8;
        item.consecutive_correct = 7;
        item.interval_days = 90;
        item.difficulty_score = 0.05;
        item.last_reviewed = Some(now - Duration::days(10));
        item.next_review_date = Some(now + Duration::days(80));
        item
    }

    // ========================================================================
    // DECKS
    // ========================================================================

    /// Generate a deck according to `config`, relative to `now`
    pub fn create_deck(config: &DeckConfig, now: DateTime<Utc>) -> Vec<VocabularyItem> {
        let spread_hours = (config.due_spread_days.max(1)) * 24;

        (0..config.count)
            .map(|i| {
                let container = &config.containers[i % config.containers.len().max(1)];
                let mut item = VocabularyItem::new(
                    Self::new_id(),
                    format!("form-{i}"),
                    format!("lemma-{i}"),
                    Location::new(container.clone(), format!("{}:{}", 1 + i / 30, 1 + i % 30), 0),
                )
                .with_frequency_rank((i as u32 * 37) % 1500)
                .with_familiarity(config.familiarities[i % config.familiarities.len().max(1)]);

                if config.root_families > 0 {
                    item = item.with_root(format!("root-{}", i % config.root_families));
                }

                if item.familiarity != Familiarity::Seen && item.familiarity != Familiarity::New {
                    item.review_count = 1 + (i % 5) as u32;
                    item.consecutive_correct = (i % 3) as u32;
                    item.interval_days = 1 + (i % 7) as u32;
                    item.difficulty_score = (i % 10) as f64 / 10.0;
                    item.last_reviewed = Some(now - Duration::days(item.interval_days as i64));
                    // Skew a few hours so no item lands exactly on a day boundary
                    let offset = (i as i64 * 13) % spread_hours - 24;
                    item.next_review_date = Some(now + Duration::hours(offset) + Duration::minutes(7));
                }
                item
            })
            .collect()
    }

    // ========================================================================
    // SCENARIOS
    // ========================================================================

    /// A root family where most relatives are already known
    pub fn create_family_scenario(now: DateTime<Utc>) -> TestScenario {
        let mut ids = HashMap::new();
        let mut items = Vec::new();

        for (name, lemma) in [("logos", "λόγος"), ("lego", "λέγω"), ("legomenon", "λεγόμενον")] {
            let item = Self::known_item(lemma, now).with_root("λεγ");
            ids.insert(name.to_string(), item.item_id.clone());
            items.push(item);
        }

        let target = Self::learning_item("διάλογος", now - Duration::hours(2)).with_root("λεγ");
        ids.insert("target".to_string(), target.item_id.clone());
        items.push(target);

        let loner = Self::learning_item("σκηνή", now - Duration::hours(2));
        ids.insert("loner".to_string(), loner.item_id.clone());
        items.push(loner);

        TestScenario {
            items,
            description: "Three known relatives of one learning word, plus an unrelated word"
                .to_string(),
            ids,
        }
    }

    /// One item in every familiarity state, all overdue where scheduled
    pub fn create_mixed_scenario(now: DateTime<Utc>) -> TestScenario {
        let mut ids = HashMap::new();
        let mut items = Vec::new();

        let mut new = Self::seen_item("νέος").with_familiarity(Familiarity::New);
        new.next_review_date = None;
        let seen = Self::seen_item("ὁράω");
        let learning = Self::learning_item("μανθάνω", now - Duration::hours(3));
        let mut known = Self::known_item("γινώσκω", now);
        known.last_reviewed = Some(now - Duration::days(3));
        let mut ignored = Self::learning_item("καί", now - Duration::days(2));
        ignored.familiarity = Familiarity::Ignored;

        for (name, item) in [
            ("new", new),
            ("seen", seen),
            ("learning", learning),
            ("known", known),
            ("ignored", ignored),
        ] {
            ids.insert(name.to_string(), item.item_id.clone());
            items.push(item);
        }

        TestScenario {
            items,
            description: "One item per familiarity state".to_string(),
            ids,
        }
    }
}
