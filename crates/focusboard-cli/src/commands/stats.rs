use chrono::Utc;
use serde::Serialize;

use super::Workspace;
use crate::common::{print_json, CliResult};

#[derive(Serialize)]
struct StreakReport {
    current: u32,
    count: u32,
    last_day: Option<chrono::NaiveDate>,
}

pub fn run_stats(days: u32) -> CliResult {
    let ws = Workspace::open()?;
    print_json(&ws.store.summary(Utc::now(), days))?;
    ws.close();
    Ok(())
}

pub fn run_streak() -> CliResult {
    let ws = Workspace::open()?;
    let streak = ws.store.streak();
    print_json(&StreakReport {
        current: ws.store.current_streak(Utc::now()),
        count: streak.count,
        last_day: streak.last_day,
    })?;
    ws.close();
    Ok(())
}
