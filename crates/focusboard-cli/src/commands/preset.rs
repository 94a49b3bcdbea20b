use clap::Subcommand;
use focusboard_core::format::format_human;
use focusboard_core::Category;

use super::Workspace;
use crate::common::{parse_duration, print_json, CliResult};

#[derive(Subcommand)]
pub enum PresetAction {
    /// Effective preset for every category, in seconds
    List,
    /// Set a category's default duration (clamped to 1m..2h)
    Set {
        category: Category,
        /// Duration such as `1500`, `25m` or `1h30m`
        duration: String,
    },
}

pub fn run(action: PresetAction) -> CliResult {
    let mut ws = Workspace::open()?;

    match action {
        PresetAction::List => print_json(&ws.store.presets().effective())?,
        PresetAction::Set { category, duration } => {
            let requested = parse_duration(&duration)?;
            let stored = ws.store.set_preset(category, requested);
            if stored != requested {
                eprintln!("note: {category} preset clamped to {}", format_human(stored));
            }
            print_json(&serde_json::json!({ category.as_str(): stored }))?;
        }
    }

    ws.close();
    Ok(())
}
