//! Journey: a learner studying over days and weeks
//!
//! Drives `ReviewSession` and the single-answer entry points against a real
//! store, checking the state each answer leaves behind.

use chrono::Duration;
use verbum_core::{
    Familiarity, ItemStore, Quality, QueueOptions, ReviewSession, SchedulerConfig, Stage,
    VerbumError, classify_stage, mark_ignored, reactivate, review_item_at,
};
use verbum_e2e_tests::{TestClock, TestDataFactory, TestStoreManager};

fn q(value: i64) -> Quality {
    Quality::new(value).unwrap()
}

fn config_with(queue: QueueOptions) -> SchedulerConfig {
    SchedulerConfig {
        queue,
        ..Default::default()
    }
}

#[test]
fn test_first_session_graduates_seen_words() {
    let clock = TestClock::new();
    let scenario = TestDataFactory::create_mixed_scenario(clock.now());
    let manager = TestStoreManager::with_items(scenario.items.clone());

    let config = config_with(QueueOptions {
        include_new_words: true,
        ..Default::default()
    });
    let mut session = ReviewSession::start_at(&manager.store, config, clock.now()).unwrap();

    // Overdue learning item outranks the never-scheduled seen word
    let queued: Vec<&str> = session.queue().iter().map(|i| i.item_id.as_str()).collect();
    assert_eq!(queued, vec![scenario.id("learning"), scenario.id("seen")]);

    while !session.is_finished() {
        session.answer_at(q(4), clock.now()).unwrap();
    }
    let summary = session.finish();
    assert_eq!(summary.reviewed, 2);
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.accuracy(), 1.0);

    let seen = manager.item(scenario.id("seen"));
    assert_eq!(seen.familiarity, Familiarity::Learning);
    assert_eq!(seen.review_count, 1);
    assert_eq!(seen.interval_days, 1);
    assert_eq!(seen.next_review_date, Some(clock.now() + Duration::days(1)));
    assert_eq!(classify_stage(&seen), Stage::Young);

    let learning = manager.item(scenario.id("learning"));
    assert_eq!(learning.consecutive_correct, 2);
    assert_eq!(learning.interval_days, 6);
    assert_eq!(learning.last_reviewed, Some(clock.now()));

    // Untouched states stay untouched
    assert_eq!(manager.item(scenario.id("new")).review_count, 0);
    assert_eq!(manager.item(scenario.id("known")).familiarity, Familiarity::Known);
    assert_eq!(manager.item(scenario.id("ignored")).familiarity, Familiarity::Ignored);
}

#[test]
fn test_daily_reviews_until_retirement() {
    let mut clock = TestClock::new();
    let words = ["ἀρχή", "φῶς", "σκοτία", "κόσμος", "χάρις"];
    let manager = TestStoreManager::with_items(
        words
            .iter()
            .map(|w| TestDataFactory::learning_item(w, clock.now() - Duration::hours(1))),
    );

    let mut promoted = 0;
    let mut study_days = 0;
    for _ in 0..400 {
        let mut session =
            ReviewSession::start_at(&manager.store, SchedulerConfig::default(), clock.now())
                .unwrap();
        if !session.is_finished() {
            study_days += 1;
        }
        while !session.is_finished() {
            let record = session.answer_at(q(5), clock.now()).unwrap();
            assert!(record.stage_after >= Stage::Young);
            if record.promoted {
                assert_eq!(record.stage_after, Stage::Mature);
                assert_eq!(record.item.familiarity, Familiarity::Known);
            }
        }
        promoted += session.finish().promoted;

        if manager
            .items()
            .iter()
            .all(|i| i.familiarity == Familiarity::Known)
        {
            break;
        }
        clock.advance_days(1);
    }

    assert_eq!(promoted as usize, words.len());
    // Perfect answers retire a word after four more reviews
    assert_eq!(study_days, 4);
    for item in manager.items() {
        assert_eq!(item.review_count, 5);
        assert!(item.interval_days >= 21);
        assert_eq!(item.ease_factor, 2.5);
    }
}

#[test]
fn test_failure_resets_progress_but_not_familiarity() {
    let clock = TestClock::new();
    let mut struggling = TestDataFactory::learning_item("ὑπομονή", clock.now() - Duration::hours(1));
    struggling.consecutive_correct = 4;
    struggling.interval_days = 15;
    let known = TestDataFactory::known_item("θεός", clock.now());
    let manager = TestStoreManager::with_items([struggling.clone(), known.clone()]);
    let config = SchedulerConfig::default();

    let record = review_item_at(&manager.store, &struggling.item_id, q(1), &config, clock.now()).unwrap();
    assert_eq!(record.outcome.new_interval_days, 1);
    assert_eq!(record.outcome.new_consecutive_correct, 0);
    assert!(record.outcome.new_ease_factor < struggling.ease_factor);
    assert!(record.outcome.new_ease_factor >= 1.3);
    assert_eq!(record.item.familiarity, Familiarity::Learning);
    assert_eq!(record.item.review_count, struggling.review_count + 1);

    // A lapse on a retired word reschedules it without demoting it
    let record = review_item_at(&manager.store, &known.item_id, q(0), &config, clock.now()).unwrap();
    assert_eq!(record.item.familiarity, Familiarity::Known);
    assert_eq!(record.item.interval_days, 1);
    assert!(!record.promoted);
}

#[test]
fn test_known_relatives_lengthen_interval() {
    let clock = TestClock::new();
    let mut scenario = TestDataFactory::create_family_scenario(clock.now());
    let target_id = scenario.id("target").to_string();
    let loner_id = scenario.id("loner").to_string();
    for item in scenario.items.iter_mut() {
        if item.item_id == target_id || item.item_id == loner_id {
            item.consecutive_correct = 2;
            item.interval_days = 6;
        }
    }
    let manager = TestStoreManager::with_items(scenario.items);
    let config = SchedulerConfig::default();

    let target = review_item_at(&manager.store, &target_id, q(4), &config, clock.now()).unwrap();
    let loner = review_item_at(&manager.store, &loner_id, q(4), &config, clock.now()).unwrap();

    // Three of four family members known: 0.75 * 0.5
    assert!((target.root_family_bonus - 0.375).abs() < 1e-9);
    assert_eq!(loner.root_family_bonus, 0.0);
    assert_eq!(target.outcome.new_interval_days, 17);
    assert_eq!(loner.outcome.new_interval_days, 15);
}

#[test]
fn test_ignored_words_leave_and_rejoin_the_rotation() {
    let clock = TestClock::new();
    let item = TestDataFactory::learning_item("δέ", clock.now() - Duration::hours(5));
    let id = item.item_id.clone();
    let manager = TestStoreManager::with_items([item]);
    let config = SchedulerConfig::default();

    mark_ignored(&manager.store, &id).unwrap();
    let session = ReviewSession::start_at(&manager.store, config.clone(), clock.now()).unwrap();
    assert!(session.is_finished());

    let err = review_item_at(&manager.store, &id, q(4), &config, clock.now()).unwrap_err();
    assert!(matches!(err, VerbumError::InvalidArgument(_)));
    assert_eq!(manager.item(&id).review_count, 1);

    let restored = reactivate(&manager.store, &id).unwrap();
    assert_eq!(restored.familiarity, Familiarity::Learning);
    let session = ReviewSession::start_at(&manager.store, config, clock.now()).unwrap();
    assert_eq!(session.remaining(), 1);
}

#[test]
fn test_container_session_with_skips() {
    let clock = TestClock::new();
    let mut gospel = TestDataFactory::learning_item("ποιμήν", clock.now() - Duration::hours(4));
    gospel.first_seen.container_id = "john".into();
    gospel.encounter_locations = vec![gospel.first_seen.clone()];
    let mut letter = TestDataFactory::learning_item("πίστις", clock.now() - Duration::hours(8));
    letter.first_seen.container_id = "romans".into();
    letter.encounter_locations = vec![letter.first_seen.clone()];
    let manager = TestStoreManager::with_items([gospel.clone(), letter.clone()]);

    let config = config_with(QueueOptions {
        container_filter: Some("john".into()),
        ..Default::default()
    });
    let mut session = ReviewSession::start_at(&manager.store, config, clock.now()).unwrap();
    assert_eq!(session.remaining(), 1);
    assert_eq!(session.current().unwrap().item_id, gospel.item_id);

    let skipped = session.skip().unwrap();
    assert_eq!(skipped.item_id, gospel.item_id);
    assert!(session.skip().is_none());
    assert!(session.answer_at(q(4), clock.now()).is_err());

    let summary = session.finish();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.reviewed, 0);
    assert_eq!(manager.store.get_item(&gospel.item_id).unwrap(), Some(gospel));
}
