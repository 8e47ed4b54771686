//! Review Forecast
//!
//! Buckets every non-suspended item into the day it next becomes due, for a
//! window of `days` starting today. Items due beyond the window are left out
//! rather than piled into the last bucket.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduler::{Stage, classify_stage};
use crate::vocab::VocabularyItem;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Due counts for one day of the forecast window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForecastDay {
    pub date: NaiveDate,
    pub due_count: u32,
    /// Due count per stage; every non-suspended stage is present
    pub per_stage_breakdown: BTreeMap<Stage, u32>,
}

impl ReviewForecastDay {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            due_count: 0,
            per_stage_breakdown: Stage::ACTIVE.iter().map(|stage| (*stage, 0)).collect(),
        }
    }
}

/// Days from `now` until `item` is due, 0 for overdue or unscheduled items
///
/// Partial days round up, so anything due later than now lands on day 1 or
/// beyond.
pub fn due_day(item: &VocabularyItem, now: DateTime<Utc>) -> i64 {
    match item.next_review_date {
        None => 0,
        Some(at) => {
            let millis = (at - now).num_milliseconds();
            // ceiling division for positive spans, negative spans clamp to 0
            if millis <= 0 {
                0
            } else {
                (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
            }
        }
    }
}

/// Forecast the next `days` days, starting now
pub fn generate_forecast(items: &[VocabularyItem], days: u32) -> Vec<ReviewForecastDay> {
    generate_forecast_at(items, days, Utc::now())
}

/// Forecast the next `days` days, starting at `now`
///
/// Returns `days` entries; day 0 is today. A window running past the last
/// representable date stops at that date.
pub fn generate_forecast_at(
    items: &[VocabularyItem],
    days: u32,
    now: DateTime<Utc>,
) -> Vec<ReviewForecastDay> {
    let mut forecast: Vec<ReviewForecastDay> = (0..days as i64)
        .map_while(|offset| {
            Duration::try_days(offset)
                .and_then(|span| now.checked_add_signed(span))
                .map(|day| ReviewForecastDay::empty(day.date_naive()))
        })
        .collect();

    let mut placed = 0usize;
    for item in items {
        let stage = classify_stage(item);
        if stage == Stage::Suspended {
            continue;
        }

        let day = due_day(item, now);
        let Some(bucket) = usize::try_from(day).ok().and_then(|d| forecast.get_mut(d)) else {
            continue;
        };

        bucket.due_count += 1;
        *bucket.per_stage_breakdown.entry(stage).or_insert(0) += 1;
        placed += 1;
    }

    tracing::debug!(days, items = items.len(), placed, "Generated review forecast");

    forecast
}
