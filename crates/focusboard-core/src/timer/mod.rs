mod engine;
mod streak;

pub use engine::{FinishedRun, TimerEngine, TimerMode, TimerState};
pub use streak::{Streak, StreakMode};
