//! The session lifecycle manager.
//!
//! [`FocusStore`] owns the single timer, the session history and everything
//! derived from it. It is a plain value: callers own it, pass it by reference
//! and decide when to persist it (see [`crate::storage::Persister`]).
//! Transitions never perform I/O; they mark the store dirty instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::category::{Category, Presets};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::export::{export_sessions, ExportFormat};
use crate::goals::{goal_progress, sessions_in_period, GoalPeriod, GoalProgress, Goals};
use crate::session::{local_day, Session, SessionMetadata, SessionPatch};
use crate::settings::Settings;
use crate::stats::Summary;
use crate::timer::{FinishedRun, Streak, StreakMode, TimerEngine, TimerMode};

/// Everything the store persists, as one serializable document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub streak: Streak,
    #[serde(default)]
    pub presets: Presets,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub timer: Option<TimerEngine>,
}

#[derive(Debug, Clone)]
pub struct FocusStore {
    /// Most recent first.
    sessions: Vec<Session>,
    timer: TimerEngine,
    streak: Streak,
    presets: Presets,
    goals: Goals,
    settings: Settings,
    dirty: bool,
}

impl Default for FocusStore {
    fn default() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }
}

impl FocusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let StoreSnapshot {
            mut sessions,
            goals,
            streak,
            presets,
            settings,
            timer,
        } = snapshot;

        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        let mut timer = timer.unwrap_or_else(|| {
            let category = Category::default();
            TimerEngine::new(category, presets.get(category))
        });
        timer.set_mode(settings.timer_mode);

        Self {
            sessions,
            timer,
            streak,
            presets,
            goals,
            settings,
            dirty: false,
        }
    }

    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            sessions: self.sessions.clone(),
            goals: self.goals,
            streak: self.streak,
            presets: self.presets.clone(),
            settings: self.settings.clone(),
            timer: Some(self.timer.clone()),
        }
    }

    // ── Save boundary ────────────────────────────────────────────────

    /// True when state changed since the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn touch(&mut self) {
        self.dirty = true;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn streak(&self) -> &Streak {
        &self.streak
    }

    /// Streak as of `now`: zero once a whole day has been missed.
    pub fn current_streak(&self, now: DateTime<Utc>) -> u32 {
        self.streak.current(local_day(now))
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn today_sessions(&self, now: DateTime<Utc>) -> Vec<&Session> {
        sessions_in_period(&self.sessions, GoalPeriod::Daily, now, self.settings.week_start)
            .collect()
    }

    pub fn week_sessions(&self, now: DateTime<Utc>) -> Vec<&Session> {
        sessions_in_period(&self.sessions, GoalPeriod::Weekly, now, self.settings.week_start)
            .collect()
    }

    pub fn goal_progress(&self, period: GoalPeriod, now: DateTime<Utc>) -> GoalProgress {
        goal_progress(
            &self.goals,
            &self.sessions,
            period,
            now,
            self.settings.week_start,
        )
    }

    pub fn summary(&self, now: DateTime<Utc>, days: u32) -> Summary {
        Summary::compute(&self.sessions, now, self.settings.week_start, days)
    }

    pub fn export(&self, format: ExportFormat) -> Result<String> {
        export_sessions(&self.sessions, format)
    }

    pub fn snapshot_event(&self, now: DateTime<Utc>) -> Event {
        self.timer.snapshot(now)
    }

    // ── Timer commands ───────────────────────────────────────────────

    /// Start a new session, or resume the paused one.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if !self.timer.in_progress() {
            self.timer.set_target(self.presets.get(self.timer.category()));
        }
        let event = self.timer.start(now)?;
        debug!(event = event.name(), category = %self.timer.category(), "timer started");
        self.touch();
        Some(event)
    }

    /// One-second tick. No-op unless the timer is running.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.timer.is_running() {
            return Vec::new();
        }
        self.touch();
        match self.timer.tick() {
            Some(event) => self.after_tick(event),
            None => Vec::new(),
        }
    }

    /// Apply the ticks missed since the timer last advanced.
    ///
    /// Ticks are applied one at a time so an auto-stop at the target ends
    /// the session there rather than after the whole gap.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        while self.timer.tick_due(now) {
            events.extend(self.tick());
        }
        events
    }

    fn after_tick(&mut self, event: Event) -> Vec<Event> {
        let reached_at = match &event {
            Event::TargetReached { at, .. } => Some(*at),
            _ => None,
        };
        let mut out = vec![event];
        let Some(at) = reached_at else {
            return out;
        };

        info!(category = %self.timer.category(), "target reached");
        if self.settings.auto_stop && self.timer.mode() == TimerMode::Countdown {
            if let Some(run) = self.timer.stop(at) {
                let (_, completed) = self.finish(run, SessionMetadata::default());
                out.push(completed);
            }
        }
        out
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let event = self.timer.pause(now)?;
        debug!(elapsed = self.timer.elapsed_secs(), "timer paused");
        self.touch();
        Some(event)
    }

    /// Finalize the in-progress session. `None` when nothing is in progress.
    pub fn stop(&mut self, metadata: SessionMetadata, now: DateTime<Utc>) -> Option<Session> {
        let Some(run) = self.timer.stop(now) else {
            debug!("stop requested with no session in progress");
            return None;
        };
        let (session, _) = self.finish(run, metadata);
        Some(session)
    }

    fn finish(&mut self, run: FinishedRun, metadata: SessionMetadata) -> (Session, Event) {
        let session = Session::from_timer(
            run.category,
            run.started_at,
            run.ended_at,
            run.elapsed_secs,
            metadata,
            self.settings.default_satisfaction,
        );
        self.insert_ordered(session.clone());
        match self.settings.streak_mode {
            StreakMode::Incremental => {
                self.streak.record(session.day());
            }
            StreakMode::Chronological => self.recompute_streak(),
        }
        self.timer.set_target(self.presets.get(self.timer.category()));
        self.touch();

        info!(
            session_id = %session.id,
            category = %session.category,
            duration = session.duration,
            streak = self.streak.count,
            "session completed"
        );
        let event = Event::SessionCompleted {
            session_id: session.id.clone(),
            category: session.category,
            duration_secs: session.duration,
            streak: self.streak.count,
            at: session.end_time,
        };
        (session, event)
    }

    /// Switch category. Uncommitted elapsed time is discarded.
    pub fn set_category(&mut self, category: Category, now: DateTime<Utc>) -> Event {
        let from = self.timer.category();
        let discarded = self.timer.set_category(category, self.presets.get(category));
        if discarded > 0 {
            warn!(%from, to = %category, discarded_secs = discarded, "discarded uncommitted time");
        }
        self.touch();
        Event::CategoryChanged {
            from,
            to: category,
            discarded_secs: discarded,
            at: now,
        }
    }

    /// Abandon the in-progress session.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Event {
        let discarded = self.timer.reset();
        self.timer.set_target(self.presets.get(self.timer.category()));
        if discarded > 0 {
            warn!(discarded_secs = discarded, "timer reset with uncommitted time");
        }
        self.touch();
        Event::TimerReset {
            discarded_secs: discarded,
            at: now,
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Set a category preset, clamped to the allowed range. Returns the stored value.
    pub fn set_preset(&mut self, category: Category, secs: u64) -> u64 {
        let stored = self.presets.set(category, secs);
        if stored != secs {
            debug!(%category, requested = secs, stored, "preset clamped");
        }
        if self.timer.category() == category {
            self.timer.set_target(stored);
        }
        self.touch();
        stored
    }

    pub fn set_goal(&mut self, period: GoalPeriod, secs: u64) -> Result<()> {
        self.goals.set(period, secs)?;
        self.touch();
        Ok(())
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        let recompute = settings.streak_mode == StreakMode::Chronological
            && self.settings.streak_mode != StreakMode::Chronological;
        self.timer.set_mode(settings.timer_mode);
        self.settings = settings;
        if recompute {
            self.recompute_streak();
        }
        self.touch();
        Ok(())
    }

    // ── History edits ────────────────────────────────────────────────

    pub fn update_session(&mut self, id: &str, patch: SessionPatch) -> Result<&Session> {
        let idx = self.position(id)?;
        self.sessions[idx].apply(patch)?;
        self.touch();
        Ok(&self.sessions[idx])
    }

    pub fn delete_session(&mut self, id: &str) -> Result<Session> {
        let idx = self.position(id)?;
        let removed = self.sessions.remove(idx);
        if self.settings.streak_mode == StreakMode::Chronological {
            self.recompute_streak();
        }
        self.touch();
        Ok(removed)
    }

    /// Insert a session recorded outside the timer, keeping the list ordered.
    pub fn add_session(&mut self, session: Session) -> &Session {
        let day = session.day();
        let idx = self.insert_ordered(session);
        match self.settings.streak_mode {
            StreakMode::Incremental => {
                self.streak.record(day);
            }
            StreakMode::Chronological => self.recompute_streak(),
        }
        self.touch();
        &self.sessions[idx]
    }

    /// Merge imported sessions, skipping ids already present.
    /// Returns how many were added.
    pub fn import_sessions(&mut self, mut sessions: Vec<Session>) -> usize {
        sessions.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        let mut added = 0;
        for session in sessions {
            if self.session(&session.id).is_some() {
                continue;
            }
            let day = session.day();
            self.insert_ordered(session);
            if self.settings.streak_mode == StreakMode::Incremental {
                self.streak.record(day);
            }
            added += 1;
        }
        if added > 0 {
            if self.settings.streak_mode == StreakMode::Chronological {
                self.recompute_streak();
            }
            self.touch();
        }
        info!(added, "sessions imported");
        added
    }

    /// Drop all history and the streak. Timer, presets, goals and settings stay.
    pub fn clear_history(&mut self) -> usize {
        let removed = self.sessions.len();
        self.sessions.clear();
        self.streak = Streak::default();
        self.touch();
        removed
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn position(&self, id: &str) -> Result<usize> {
        self.sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::SessionNotFound(id.to_string()))
    }

    fn insert_ordered(&mut self, session: Session) -> usize {
        let idx = self
            .sessions
            .iter()
            .position(|s| s.start_time <= session.start_time)
            .unwrap_or(self.sessions.len());
        self.sessions.insert(idx, session);
        idx
    }

    fn recompute_streak(&mut self) {
        self.streak = Streak::from_sessions(&self.sessions);
    }
}
