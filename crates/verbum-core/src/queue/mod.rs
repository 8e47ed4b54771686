//! Queue & Forecast Module
//!
//! Collection-level views over a snapshot of items:
//! - Review queue: which due items to show, in which order, how many
//! - Forecast: how many items fall due on each of the coming days
//!
//! Both are pure and never fail; an empty pool yields an empty queue or a
//! zeroed forecast.

mod builder;
mod forecast;

pub use builder::{
    DEFAULT_MAX_ITEMS, DEFAULT_PRACTICE_COOLDOWN_MINUTES, QUICK_DIFFICULTY_WEIGHT, QueueOptions,
    STANDARD_DIFFICULTY_WEIGHT, SessionMode, build_review_queue, build_review_queue_at,
    review_priority,
};
pub use forecast::{ReviewForecastDay, due_day, generate_forecast, generate_forecast_at};
