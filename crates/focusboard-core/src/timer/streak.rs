//! Consecutive-day completion streak.
//!
//! Days are local calendar days. Two ways of maintaining the streak are
//! supported, selected by [`StreakMode`]:
//!
//! - `Incremental`: each completed session is compared against the day of the
//!   previously recorded completion. A session dated before that day leaves the
//!   streak untouched.
//! - `Chronological`: the streak is rebuilt from the full session history as
//!   the run of consecutive days ending at the latest session day.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakMode {
    #[default]
    Incremental,
    Chronological,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub count: u32,
    /// Day of the completion the count was last updated from.
    pub last_day: Option<NaiveDate>,
}

impl Streak {
    /// Fold one completion day into the streak and return the new count.
    ///
    /// Same day: unchanged. Next day: +1. Longer gap or no prior day: 1.
    /// Earlier than the reference day: unchanged.
    pub fn record(&mut self, day: NaiveDate) -> u32 {
        match self.last_day {
            None => self.restart(day),
            Some(last) => match (day - last).num_days() {
                gap if gap < 0 => {}
                0 => {
                    if self.count == 0 {
                        self.count = 1;
                    }
                }
                1 => {
                    self.count += 1;
                    self.last_day = Some(day);
                }
                _ => self.restart(day),
            },
        }
        self.count
    }

    /// Rebuild from a set of completion days.
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let days: BTreeSet<NaiveDate> = days.into_iter().collect();
        let Some(&latest) = days.last() else {
            return Self::default();
        };

        let mut count = 0;
        let mut cursor = Some(latest);
        while let Some(day) = cursor {
            if !days.contains(&day) {
                break;
            }
            count += 1;
            cursor = day.checked_sub_days(Days::new(1));
        }
        Self {
            count,
            last_day: Some(latest),
        }
    }

    pub fn from_sessions(sessions: &[Session]) -> Self {
        Self::from_days(sessions.iter().map(Session::day))
    }

    /// The streak as seen on `today`: zero once a full day has been missed.
    pub fn current(&self, today: NaiveDate) -> u32 {
        match self.last_day {
            Some(last) if (today - last).num_days() <= 1 => self.count,
            _ => 0,
        }
    }

    fn restart(&mut self, day: NaiveDate) {
        self.count = 1;
        self.last_day = Some(day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn consecutive_days_accumulate() {
        let mut streak = Streak::default();
        assert_eq!(streak.record(day(2)), 1);
        assert_eq!(streak.record(day(3)), 2);
        assert_eq!(streak.record(day(4)), 3);
    }

    #[test]
    fn same_day_is_unchanged() {
        let mut streak = Streak::default();
        streak.record(day(2));
        streak.record(day(3));
        assert_eq!(streak.record(day(3)), 2);
        assert_eq!(streak.last_day, Some(day(3)));
    }

    #[test]
    fn gap_resets_to_one() {
        let mut streak = Streak::default();
        streak.record(day(2));
        streak.record(day(3));
        streak.record(day(4));
        assert_eq!(streak.record(day(6)), 1);
        assert_eq!(streak.last_day, Some(day(6)));
    }

    #[test]
    fn backdated_day_does_not_alter_streak() {
        let mut streak = Streak::default();
        streak.record(day(5));
        streak.record(day(6));
        assert_eq!(streak.record(day(1)), 2);
        assert_eq!(streak.last_day, Some(day(6)));
    }

    #[test]
    fn from_days_counts_run_ending_at_latest() {
        let streak = Streak::from_days([day(9), day(2), day(8), day(7), day(3), day(8)]);
        assert_eq!(streak.count, 3);
        assert_eq!(streak.last_day, Some(day(9)));
    }

    #[test]
    fn from_days_empty() {
        assert_eq!(Streak::from_days(Vec::new()), Streak::default());
    }

    #[test]
    fn current_expires_after_missed_day() {
        let mut streak = Streak::default();
        streak.record(day(2));
        streak.record(day(3));
        assert_eq!(streak.current(day(3)), 2);
        assert_eq!(streak.current(day(4)), 2);
        assert_eq!(streak.current(day(5)), 0);
    }
}
