use chrono::Utc;
use clap::Subcommand;
use focusboard_core::format::format_human;
use focusboard_core::GoalPeriod;

use super::Workspace;
use crate::common::{parse_duration, print_json, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Progress toward the daily and weekly goals
    Show,
    /// Set a goal; `0` disables it
    Set {
        /// `daily` or `weekly`
        period: GoalPeriod,
        /// Duration such as `4h` or `14400`
        duration: String,
    },
}

pub fn run(action: GoalAction) -> CliResult {
    let mut ws = Workspace::open()?;

    match action {
        GoalAction::Show => {
            let now = Utc::now();
            let progress = [
                ws.store.goal_progress(GoalPeriod::Daily, now),
                ws.store.goal_progress(GoalPeriod::Weekly, now),
            ];
            print_json(&progress)?;
        }
        GoalAction::Set { period, duration } => {
            let secs = parse_duration(&duration)?;
            ws.store.set_goal(period, secs)?;
            if secs == 0 {
                eprintln!("{period} goal disabled");
            } else {
                eprintln!("{period} goal set to {}", format_human(secs));
            }
            print_json(ws.store.goals())?;
        }
    }

    ws.close();
    Ok(())
}
