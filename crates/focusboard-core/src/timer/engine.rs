//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine for the single in-progress
//! session. It does not use internal threads - the caller is responsible for
//! calling `tick()` once per second, or `catch_up()` with the current time.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            \          /
//!             stop/reset -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Category::Focus, 1500);
//! engine.start(Utc::now());
//! // Once per second:
//! engine.tick(); // Returns Some(Event) once, when a countdown reaches its target
//! let run = engine.stop(Utc::now());
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Counts toward the category preset and pauses itself on reaching it.
    #[default]
    Countdown,
    /// Counts up without a target.
    Stopwatch,
}

/// A run taken out of the engine by `stop()`, ready to become a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedRun {
    pub category: Category,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub elapsed_secs: u64,
}

/// Core timer engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerEngine {
    category: Category,
    state: TimerState,
    #[serde(default)]
    mode: TimerMode,
    elapsed_secs: u64,
    target_secs: u64,
    /// Set on the first `start()` of a session; presence means "in progress".
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    /// Instant covered by the last applied tick while running.
    #[serde(default)]
    last_tick_at: Option<DateTime<Utc>>,
    #[serde(default)]
    target_reached: bool,
}

impl TimerEngine {
    /// Create an idle engine for `category` with the given countdown target.
    pub fn new(category: Category, target_secs: u64) -> Self {
        Self {
            category,
            state: TimerState::Idle,
            mode: TimerMode::default(),
            elapsed_secs: 0,
            target_secs,
            started_at: None,
            last_tick_at: None,
            target_reached: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// True between the first `start()` and the matching `stop()`/`reset()`.
    pub fn in_progress(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn target_secs(&self) -> u64 {
        self.target_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        match self.mode {
            TimerMode::Countdown => self.target_secs.saturating_sub(self.elapsed_secs),
            TimerMode::Stopwatch => 0,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// 0.0 .. 1.0 progress toward the target (always 0 in stopwatch mode).
    pub fn progress(&self) -> f64 {
        if self.mode == TimerMode::Stopwatch || self.target_secs == 0 {
            return 0.0;
        }
        (self.elapsed_secs as f64 / self.target_secs as f64).min(1.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            state: self.state,
            mode: self.mode,
            category: self.category,
            elapsed_secs: self.elapsed_secs,
            target_secs: self.target_secs,
            remaining_secs: self.remaining_secs(),
            started_at: self.started_at,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a fresh session, or resume a paused one.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.state {
            TimerState::Running => None, // Already running.
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_at = Some(now);
                Some(Event::TimerResumed {
                    elapsed_secs: self.elapsed_secs,
                    at: now,
                })
            }
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.elapsed_secs = 0;
                self.target_reached = false;
                self.started_at = Some(now);
                self.last_tick_at = Some(now);
                Some(Event::TimerStarted {
                    category: self.category,
                    target_secs: self.target_secs,
                    at: now,
                })
            }
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        self.last_tick_at = None;
        Some(Event::TimerPaused {
            elapsed_secs: self.elapsed_secs,
            at: now,
        })
    }

    /// Advance by one second. A no-op unless running.
    ///
    /// Returns `Some(Event::TargetReached)` the first time a countdown
    /// reaches its target. The engine keeps running into overtime.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let at = self.advance_anchor();
        self.elapsed_secs += 1;

        if self.mode == TimerMode::Countdown
            && !self.target_reached
            && self.elapsed_secs >= self.target_secs
        {
            self.target_reached = true;
            return Some(Event::TargetReached {
                category: self.category,
                elapsed_secs: self.elapsed_secs,
                at,
            });
        }
        None
    }

    /// Apply one tick per whole second elapsed since the last applied tick.
    ///
    /// Used when nothing was ticking the engine, e.g. between CLI invocations.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        while self.tick_due(now) {
            if let Some(event) = self.tick() {
                events.push(event);
            }
        }
        events
    }

    /// True when running and at least one whole second has passed since the
    /// last applied tick.
    pub fn tick_due(&self, now: DateTime<Utc>) -> bool {
        self.state == TimerState::Running
            && self
                .anchor()
                .is_some_and(|last| last + Duration::seconds(1) <= now)
    }

    /// Take the in-progress run out of the engine and return to idle.
    /// Returns `None` if no session is in progress.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<FinishedRun> {
        let started_at = self.started_at.take()?;
        let run = FinishedRun {
            category: self.category,
            started_at,
            ended_at: now.max(started_at),
            elapsed_secs: self.elapsed_secs,
        };
        self.clear();
        Some(run)
    }

    /// Switch category, dropping any uncommitted time.
    /// Returns the number of seconds discarded.
    pub fn set_category(&mut self, category: Category, target_secs: u64) -> u64 {
        let discarded = self.elapsed_secs;
        self.category = category;
        self.target_secs = target_secs;
        self.clear();
        discarded
    }

    /// Update the countdown target. Only applies while idle.
    pub fn set_target(&mut self, target_secs: u64) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.target_secs = target_secs;
        true
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
    }

    /// Abandon the in-progress session. Returns the seconds discarded.
    pub fn reset(&mut self) -> u64 {
        let discarded = self.elapsed_secs;
        self.clear();
        discarded
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Instant covered by the last applied tick. A running engine restored
    /// without one is anchored at `started_at + elapsed`.
    fn anchor(&self) -> Option<DateTime<Utc>> {
        self.last_tick_at.or_else(|| {
            let started_at = self.started_at?;
            let elapsed = Duration::try_seconds(i64::try_from(self.elapsed_secs).ok()?)?;
            started_at.checked_add_signed(elapsed)
        })
    }

    /// Move the tick anchor forward one second and return it.
    fn advance_anchor(&mut self) -> DateTime<Utc> {
        let next = match self.anchor() {
            Some(last) => last + Duration::seconds(1),
            None => DateTime::<Utc>::UNIX_EPOCH,
        };
        self.last_tick_at = Some(next);
        next
    }

    fn clear(&mut self) {
        self.state = TimerState::Idle;
        self.elapsed_secs = 0;
        self.started_at = None;
        self.last_tick_at = None;
        self.target_reached = false;
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        let category = Category::default();
        Self::new(category, category.default_preset_secs())
    }
}
