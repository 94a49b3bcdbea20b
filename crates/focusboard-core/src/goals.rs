//! Daily and weekly duration goals and progress toward them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::session::{local_day, Session};

pub const MAX_DAILY_GOAL_SECS: u64 = 24 * 60 * 60;
pub const MAX_WEEKLY_GOAL_SECS: u64 = 7 * MAX_DAILY_GOAL_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Daily,
    Weekly,
}

impl fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalPeriod::Daily => f.write_str("daily"),
            GoalPeriod::Weekly => f.write_str("weekly"),
        }
    }
}

impl FromStr for GoalPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(GoalPeriod::Daily),
            "weekly" | "week" => Ok(GoalPeriod::Weekly),
            _ => Err(ValidationError::UnknownVariant {
                kind: "goal period",
                value: s.to_string(),
            }),
        }
    }
}

/// Target seconds per period. Zero disables a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    #[serde(default = "default_daily")]
    pub daily_secs: u64,
    #[serde(default = "default_weekly")]
    pub weekly_secs: u64,
}

fn default_daily() -> u64 {
    4 * 60 * 60
}
fn default_weekly() -> u64 {
    20 * 60 * 60
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            daily_secs: default_daily(),
            weekly_secs: default_weekly(),
        }
    }
}

impl Goals {
    pub fn target(&self, period: GoalPeriod) -> u64 {
        match period {
            GoalPeriod::Daily => self.daily_secs,
            GoalPeriod::Weekly => self.weekly_secs,
        }
    }

    /// Set a target, rejecting values longer than the period itself.
    pub fn set(&mut self, period: GoalPeriod, secs: u64) -> Result<(), ValidationError> {
        let max = match period {
            GoalPeriod::Daily => MAX_DAILY_GOAL_SECS,
            GoalPeriod::Weekly => MAX_WEEKLY_GOAL_SECS,
        };
        if secs > max {
            return Err(ValidationError::invalid(
                &format!("{period} goal"),
                format!("{secs}s exceeds the {max}s in a {period} period"),
            ));
        }
        match period {
            GoalPeriod::Daily => self.daily_secs = secs,
            GoalPeriod::Weekly => self.weekly_secs = secs,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub period: GoalPeriod,
    pub target_secs: u64,
    pub accumulated_secs: u64,
    pub remaining_secs: u64,
    /// 0.0 ..= 1.0
    pub progress: f64,
}

/// `min(1, accumulated / target)`, or 0 when the target is 0.
pub fn progress(accumulated_secs: u64, target_secs: u64) -> f64 {
    if target_secs == 0 {
        return 0.0;
    }
    (accumulated_secs as f64 / target_secs as f64).min(1.0)
}

/// First day of the week containing `day`.
pub fn week_start_of(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = (7 + day.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    day.checked_sub_days(Days::new(back.into())).unwrap_or(day)
}

/// Half-open `[start, end)` day window of the period containing `today`.
pub fn period_window(
    period: GoalPeriod,
    today: NaiveDate,
    week_start: Weekday,
) -> (NaiveDate, NaiveDate) {
    let (start, len) = match period {
        GoalPeriod::Daily => (today, 1),
        GoalPeriod::Weekly => (week_start_of(today, week_start), 7),
    };
    let end = start.checked_add_days(Days::new(len)).unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Sessions whose start day falls in the period containing `now`.
pub fn sessions_in_period<'a>(
    sessions: &'a [Session],
    period: GoalPeriod,
    now: DateTime<Utc>,
    week_start: Weekday,
) -> impl Iterator<Item = &'a Session> + 'a {
    let (start, end) = period_window(period, local_day(now), week_start);
    sessions.iter().filter(move |s| {
        let day = s.day();
        day >= start && day < end
    })
}

pub fn goal_progress(
    goals: &Goals,
    sessions: &[Session],
    period: GoalPeriod,
    now: DateTime<Utc>,
    week_start: Weekday,
) -> GoalProgress {
    let accumulated_secs = sessions_in_period(sessions, period, now, week_start)
        .map(|s| s.duration)
        .sum();
    let target_secs = goals.target(period);
    GoalProgress {
        period,
        target_secs,
        accumulated_secs,
        remaining_secs: target_secs.saturating_sub(accumulated_secs),
        progress: progress(accumulated_secs, target_secs),
    }
}
