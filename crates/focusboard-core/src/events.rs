use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::timer::{TimerMode, TimerState};

/// Every lifecycle transition produces an Event.
/// The CLI prints them; the store logs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        category: Category,
        target_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown hit its target; the timer paused itself.
    TargetReached {
        category: Category,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        session_id: String,
        category: Category,
        duration_secs: u64,
        streak: u32,
        at: DateTime<Utc>,
    },
    /// Category switched; any uncommitted time was dropped.
    CategoryChanged {
        from: Category,
        to: Category,
        discarded_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        discarded_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        mode: TimerMode,
        category: Category,
        elapsed_secs: u64,
        target_secs: u64,
        remaining_secs: u64,
        started_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerResumed { .. } => "timer_resumed",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TargetReached { .. } => "target_reached",
            Event::SessionCompleted { .. } => "session_completed",
            Event::CategoryChanged { .. } => "category_changed",
            Event::TimerReset { .. } => "timer_reset",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_matches_name() {
        let event = Event::TimerPaused {
            elapsed_secs: 12,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
        assert_eq!(json["elapsed_secs"], 12);
    }
}
