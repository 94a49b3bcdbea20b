use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use focusboard_core::format::format_clock;
use focusboard_core::{Category, Event, SessionMetadata, TimerState};

use super::Workspace;
use crate::common::{parse_tags, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a session, or resume a paused one
    Start {
        /// Switch to this category first (discards uncommitted time)
        #[arg(long)]
        category: Option<Category>,
    },
    /// Pause the running session
    Pause,
    /// Finish the session and record it
    Stop {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Rating from 1 to 5
        #[arg(long)]
        satisfaction: Option<u8>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Print current timer state as JSON
    Status,
    /// Discard the in-progress session
    Reset,
    /// Switch category (discards uncommitted time)
    Category { category: Category },
    /// Run the timer in the foreground until it reaches its target or Ctrl-C
    Run {
        #[arg(long)]
        category: Option<Category>,
    },
}

pub fn run(action: TimerAction) -> CliResult {
    let mut ws = Workspace::open()?;
    for event in &ws.pending {
        print_json(event)?;
    }

    match action {
        TimerAction::Start { category } => {
            switch_category(&mut ws, category)?;
            match ws.store.start(Utc::now()) {
                Some(event) => print_json(&event)?,
                None => print_json(&ws.store.snapshot_event(Utc::now()))?,
            }
        }
        TimerAction::Pause => match ws.store.pause(Utc::now()) {
            Some(event) => print_json(&event)?,
            None => print_json(&ws.store.snapshot_event(Utc::now()))?,
        },
        TimerAction::Stop {
            name,
            description,
            satisfaction,
            tags,
        } => {
            let metadata = SessionMetadata {
                name,
                description,
                satisfaction,
                tags: tags.as_deref().map(parse_tags).unwrap_or_default(),
            };
            match ws.store.stop(metadata, Utc::now()) {
                Some(session) => print_json(&session)?,
                None => print_json(&serde_json::json!({ "type": "no_active_session" }))?,
            }
        }
        TimerAction::Status => {
            print_json(&ws.store.snapshot_event(Utc::now()))?;
        }
        TimerAction::Reset => {
            let event = ws.store.reset(Utc::now());
            print_json(&event)?;
        }
        TimerAction::Category { category } => {
            let event = ws.store.set_category(category, Utc::now());
            print_json(&event)?;
        }
        TimerAction::Run { category } => {
            switch_category(&mut ws, category)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_loop(&mut ws))?;
        }
    }

    ws.close();
    Ok(())
}

fn switch_category(ws: &mut Workspace, category: Option<Category>) -> CliResult {
    if let Some(category) = category {
        if category != ws.store.timer().category() {
            print_json(&ws.store.set_category(category, Utc::now()))?;
        }
    }
    Ok(())
}

/// Drive the store from a one-second interval until the countdown
/// reaches its target, the session is auto-stopped, or Ctrl-C pauses it.
/// A countdown left at its target keeps running into overtime until
/// `timer stop`.
async fn run_loop(ws: &mut Workspace) -> CliResult {
    if let Some(event) = ws.store.start(Utc::now()) {
        print_json(&event)?;
    }

    let period = Duration::from_millis(ws.config.timer.tick_interval_ms.max(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let events = ws.store.catch_up(Utc::now());
                render_status(ws);
                let mut finished = false;
                for event in &events {
                    eprintln!();
                    print_json(event)?;
                    finished |= matches!(event, Event::TargetReached { .. } | Event::SessionCompleted { .. });
                }
                ws.save();
                if finished || ws.store.timer().state() != TimerState::Running {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                if let Some(event) = ws.store.pause(Utc::now()) {
                    print_json(&event)?;
                }
                break;
            }
        }
    }
    Ok(())
}

fn render_status(ws: &Workspace) {
    let timer = ws.store.timer();
    let shown = match timer.mode() {
        focusboard_core::TimerMode::Countdown => timer.remaining_secs(),
        focusboard_core::TimerMode::Stopwatch => timer.elapsed_secs(),
    };
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "\r{} {:<6}", format_clock(shown), timer.category());
    let _ = stderr.flush();
}
