//! # Focusboard Core Library
//!
//! This library provides the core logic for the Focusboard focus timer.
//! All operations are available via the standalone `focusboard` CLI, which is
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine for the one in-progress
//!   session. The caller invokes `tick()` once per second or `catch_up()` with
//!   the current time.
//! - **Store**: the session lifecycle manager owning timer, history, streak,
//!   presets, goals and settings. Transitions are pure; persistence happens
//!   at an explicit save boundary.
//! - **Storage**: namespaced key-value persistence (SQLite or in-memory) and
//!   TOML configuration.
//!
//! ## Key Components
//!
//! - [`FocusStore`]: session lifecycle manager
//! - [`TimerEngine`]: core timer state machine
//! - [`Streak`]: consecutive-day streak
//! - [`Persister`]: load/save of the store through a [`KeyValueStore`]
//! - [`Config`]: application configuration management

pub mod category;
pub mod error;
pub mod events;
pub mod export;
pub mod format;
pub mod goals;
pub mod session;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod store;
pub mod timer;

pub use category::{Category, Presets};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use export::{export_sessions, import_sessions_json, ExportFormat};
pub use goals::{GoalPeriod, GoalProgress, Goals};
pub use session::{Session, SessionMetadata, SessionPatch};
pub use settings::Settings;
pub use stats::Summary;
pub use storage::{Config, Database, KeyValueStore, MemoryStore, Persister};
pub use store::{FocusStore, StoreSnapshot};
pub use timer::{Streak, StreakMode, TimerEngine, TimerMode, TimerState};
