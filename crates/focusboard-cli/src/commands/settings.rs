use clap::Subcommand;

use super::Workspace;
use crate::common::{print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a setting (e.g. "timerMode", "weekStart")
    Get { key: String },
    /// Set a setting
    Set { key: String, value: String },
    /// List all settings
    List,
}

pub fn run(action: SettingsAction) -> CliResult {
    let mut ws = Workspace::open()?;

    match action {
        SettingsAction::Get { key } => match ws.store.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        SettingsAction::Set { key, value } => {
            let updated = ws.store.settings().with(&key, &value)?;
            ws.store.set_settings(updated)?;
            print_json(ws.store.settings())?;
        }
        SettingsAction::List => print_json(ws.store.settings())?,
    }

    ws.close();
    Ok(())
}
