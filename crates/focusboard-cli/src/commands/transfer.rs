use std::path::{Path, PathBuf};

use focusboard_core::{import_sessions_json, ExportFormat};

use super::Workspace;
use crate::common::{print_json, CliResult};

pub fn export(format: Option<String>, output: Option<PathBuf>) -> CliResult {
    let ws = Workspace::open()?;
    let format = match format {
        Some(f) => f.parse::<ExportFormat>()?,
        None => ws.config.export.default_format,
    };
    let text = ws.store.export(format)?;
    match output {
        Some(path) => {
            std::fs::write(&path, text)?;
            eprintln!(
                "exported {} sessions to {}",
                ws.store.sessions().len(),
                path.display()
            );
        }
        None => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    ws.close();
    Ok(())
}

pub fn import(path: &Path) -> CliResult {
    let mut ws = Workspace::open()?;
    let text = std::fs::read_to_string(path)?;
    let sessions = import_sessions_json(&text)?;
    let total = sessions.len();
    let added = ws.store.import_sessions(sessions);
    print_json(&serde_json::json!({ "imported": added, "skipped": total - added }))?;
    ws.close();
    Ok(())
}
