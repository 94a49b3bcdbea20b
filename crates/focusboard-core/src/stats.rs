//! Session analytics: totals, per-category breakdown and daily history.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::goals::{sessions_in_period, GoalPeriod};
use crate::session::{local_day, Session};

/// Longest daily history a summary reports.
pub const MAX_HISTORY_DAYS: u32 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub sessions: u64,
    pub secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub day: NaiveDate,
    pub sessions: u64,
    pub secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_sessions: u64,
    pub total_secs: u64,
    pub today_secs: u64,
    pub week_secs: u64,
    /// Mean over rated sessions only.
    pub average_satisfaction: Option<f64>,
    pub by_category: BTreeMap<Category, CategoryTotals>,
    /// Oldest first, one entry per day ending today.
    pub daily: Vec<DailyTotal>,
}

impl Summary {
    pub fn compute(
        sessions: &[Session],
        now: DateTime<Utc>,
        week_start: Weekday,
        days: u32,
    ) -> Self {
        let mut by_category: BTreeMap<Category, CategoryTotals> = BTreeMap::new();
        let mut rated = (0u64, 0u64);
        for s in sessions {
            let totals = by_category.entry(s.category).or_default();
            totals.sessions += 1;
            totals.secs += s.duration;
            if let Some(v) = s.satisfaction {
                rated.0 += u64::from(v);
                rated.1 += 1;
            }
        }

        let sum = |period| -> u64 {
            sessions_in_period(sessions, period, now, week_start)
                .map(|s| s.duration)
                .sum()
        };

        Self {
            total_sessions: sessions.len() as u64,
            total_secs: sessions.iter().map(|s| s.duration).sum(),
            today_secs: sum(GoalPeriod::Daily),
            week_secs: sum(GoalPeriod::Weekly),
            average_satisfaction: (rated.1 > 0).then(|| rated.0 as f64 / rated.1 as f64),
            by_category,
            daily: daily_totals(sessions, local_day(now), days),
        }
    }
}

/// Per-day totals for the `days` days ending at `today`, zero-filled.
/// At most [`MAX_HISTORY_DAYS`] entries.
pub fn daily_totals(sessions: &[Session], today: NaiveDate, days: u32) -> Vec<DailyTotal> {
    let window: Vec<NaiveDate> = (0..days.min(MAX_HISTORY_DAYS))
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back.into())))
        .collect();
    let mut totals: BTreeMap<NaiveDate, DailyTotal> = window
        .iter()
        .map(|&day| {
            (
                day,
                DailyTotal {
                    day,
                    sessions: 0,
                    secs: 0,
                },
            )
        })
        .collect();

    for s in sessions {
        if let Some(total) = totals.get_mut(&s.day()) {
            total.sessions += 1;
            total.secs += s.duration;
        }
    }
    totals.into_values().collect()
}
