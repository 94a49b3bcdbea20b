//! User preferences persisted alongside sessions in the state blob.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::session::{DEFAULT_SATISFACTION, MAX_SATISFACTION, MIN_SATISFACTION};
use crate::storage::keypath;
use crate::timer::{StreakMode, TimerMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub timer_mode: TimerMode,
    /// Finalize the session automatically when a countdown reaches its target.
    #[serde(default)]
    pub auto_stop: bool,
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    #[serde(default)]
    pub streak_mode: StreakMode,
    #[serde(default = "default_satisfaction")]
    pub default_satisfaction: u8,
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}
fn default_satisfaction() -> u8 {
    DEFAULT_SATISFACTION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timer_mode: TimerMode::default(),
            auto_stop: false,
            week_start: default_week_start(),
            streak_mode: StreakMode::default(),
            default_satisfaction: default_satisfaction(),
        }
    }
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<String> {
        keypath::get(self, key)
    }

    /// Return updated settings with `key` set to `value`, validated.
    pub fn with(&self, key: &str, value: &str) -> Result<Self> {
        let updated: Settings = keypath::set(self, key, value)?;
        updated.validate()?;
        Ok(updated)
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !(MIN_SATISFACTION..=MAX_SATISFACTION).contains(&self.default_satisfaction) {
            return Err(ValidationError::invalid(
                "defaultSatisfaction",
                format!(
                    "{} is not between {MIN_SATISFACTION} and {MAX_SATISFACTION}",
                    self.default_satisfaction
                ),
            ));
        }
        Ok(())
    }
}
