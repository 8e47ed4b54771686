//! Scheduler configuration
//!
//! Session-level knobs only. The scheduling constants themselves (ease
//! bounds, interval bounds, multipliers) are fixed.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. a JSON file (camelCase keys, every key optional)
//! 3. `VERBUM_MAX_ITEMS` / `VERBUM_FORECAST_DAYS` environment variables

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VerbumError};
use crate::queue::QueueOptions;

/// Default forecast window in days
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

/// Longest forecast window a configuration may ask for (ten years)
pub const MAX_FORECAST_DAYS: u32 = 3650;

/// Environment override for `queue.maxItems`
pub const ENV_MAX_ITEMS: &str = "VERBUM_MAX_ITEMS";

/// Environment override for `forecastDays`
pub const ENV_FORECAST_DAYS: &str = "VERBUM_FORECAST_DAYS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfig {
    /// Queue options used when a session does not override them
    pub queue: QueueOptions,
    pub forecast_days: u32,
    /// Mark items `Known` as soon as they satisfy the promotion policy
    pub auto_promote: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue: QueueOptions::default(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            auto_promote: true,
        }
    }
}

impl SchedulerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Apply `VERBUM_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_MAX_ITEMS) {
            self.queue.max_items = raw.trim().parse().map_err(|_| {
                VerbumError::InvalidArgument(format!("{ENV_MAX_ITEMS} must be a positive integer, got '{raw}'"))
            })?;
        }
        if let Some(raw) = lookup(ENV_FORECAST_DAYS) {
            self.forecast_days = raw.trim().parse().map_err(|_| {
                VerbumError::InvalidArgument(format!(
                    "{ENV_FORECAST_DAYS} must be a positive integer, got '{raw}'"
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue.max_items == 0 {
            return Err(VerbumError::InvalidArgument(
                "queue.maxItems must be at least 1".into(),
            ));
        }
        if self.forecast_days == 0 {
            return Err(VerbumError::InvalidArgument(
                "forecastDays must be at least 1".into(),
            ));
        }
        if self.forecast_days > MAX_FORECAST_DAYS {
            return Err(VerbumError::InvalidArgument(format!(
                "forecastDays cannot exceed {MAX_FORECAST_DAYS}"
            )));
        }
        if self.queue.practice_cooldown_minutes < 0 {
            return Err(VerbumError::InvalidArgument(
                "queue.practiceCooldownMinutes cannot be negative".into(),
            ));
        }
        Ok(())
    }
}
