//! Journey: watching the workload forecast as a deck grows

use chrono::Duration;
use verbum_core::{
    Familiarity, Quality, QueueOptions, ReviewSession, SchedulerConfig, Stage, VocabularyStats,
    build_review_queue_at, generate_forecast_at,
};
use verbum_e2e_tests::{DeckConfig, TestClock, TestDataFactory, TestStoreManager};

/// Wide enough that every scheduled item lands in a bucket
const FULL_HORIZON_DAYS: u32 = 400;

fn study_config() -> SchedulerConfig {
    SchedulerConfig {
        queue: QueueOptions {
            include_new_words: true,
            max_items: 500,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_today_matches_the_queue() {
    let clock = TestClock::new();
    let deck = TestDataFactory::create_deck(&DeckConfig::default(), clock.now());

    let forecast = generate_forecast_at(&deck, 7, clock.now());
    let queue = build_review_queue_at(&deck, &study_config().queue, clock.now());

    assert_eq!(forecast.len(), 7);
    assert!(!queue.is_empty());
    assert_eq!(forecast[0].due_count as usize, queue.len());
    for (offset, day) in forecast.iter().enumerate() {
        let expected = (clock.now() + Duration::days(offset as i64)).date_naive();
        assert_eq!(day.date, expected);
        assert_eq!(day.per_stage_breakdown.len(), Stage::ACTIVE.len());
        assert_eq!(day.per_stage_breakdown.values().sum::<u32>(), day.due_count);
    }
}

#[test]
fn test_answering_moves_load_forward() {
    let clock = TestClock::new();
    let deck = TestDataFactory::create_deck(&DeckConfig::default(), clock.now());
    let manager = TestStoreManager::with_items(deck);

    let before = generate_forecast_at(&manager.items(), FULL_HORIZON_DAYS, clock.now());
    let due_today = before[0].due_count;
    assert!(due_today > 0);

    let mut session = ReviewSession::start_at(&manager.store, study_config(), clock.now()).unwrap();
    while !session.is_finished() {
        session
            .answer_at(Quality::new(4).unwrap(), clock.now())
            .unwrap();
    }
    assert_eq!(session.finish().reviewed, due_today);

    let after = generate_forecast_at(&manager.items(), FULL_HORIZON_DAYS, clock.now());
    assert_eq!(after[0].due_count, 0);

    let total = |f: &[verbum_core::ReviewForecastDay]| f.iter().map(|d| d.due_count).sum::<u32>();
    assert_eq!(total(&before), total(&after));
}

#[test]
fn test_growing_deck_over_three_weeks() {
    let mut clock = TestClock::new();
    let manager = TestStoreManager::new_temp();
    let config = study_config();

    for day in 0..21 {
        manager.seed((0..3).map(|n| TestDataFactory::seen_item(&format!("day{day}-word{n}"))));
        if day % 5 == 4 {
            let mut ignored = TestDataFactory::seen_item(&format!("day{day}-particle"));
            ignored.familiarity = Familiarity::Ignored;
            manager.seed([ignored]);
        }

        let mut session = ReviewSession::start_at(&manager.store, config.clone(), clock.now()).unwrap();
        // New words every day, so there is always something to do
        assert!(session.remaining() >= 3);
        let mut answered = 0;
        while !session.is_finished() {
            // Every seventh answer is a miss
            let quality = if answered % 7 == 6 { 2 } else { 4 };
            session
                .answer_at(Quality::new(quality).unwrap(), clock.now())
                .unwrap();
            answered += 1;
        }
        session.finish();

        let items = manager.items();
        let forecast = generate_forecast_at(&items, FULL_HORIZON_DAYS, clock.now());
        let active = items
            .iter()
            .filter(|i| i.familiarity != Familiarity::Ignored)
            .count();

        assert_eq!(forecast[0].due_count, 0, "day {day} left work behind");
        assert_eq!(
            forecast.iter().map(|d| d.due_count as usize).sum::<usize>(),
            active
        );

        clock.advance_days(1);
    }

    let stats = VocabularyStats::collect_at(&manager.items(), clock.now());
    assert_eq!(stats.total_items, 67);
    assert_eq!(stats.by_stage[&Stage::Suspended], 4);
    assert_eq!(stats.by_stage[&Stage::New], 0);
    assert_eq!(stats.by_familiarity[&Familiarity::Seen], 0);
    assert!(stats.by_stage[&Stage::Young] > 0);
    assert!(stats.total_reviews >= 63);
}
