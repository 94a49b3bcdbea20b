use chrono::{DateTime, TimeDelta, Utc};
use clap::Subcommand;
use focusboard_core::{Category, Session, SessionMetadata, SessionPatch, ValidationError};

use super::Workspace;
use crate::common::{parse_duration, parse_tags, print_json, CliResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// List sessions, most recent first
    List {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Sessions started today
    Today,
    /// Sessions started this week
    Week,
    /// Record a session that was not timed
    Add {
        #[arg(long)]
        category: Category,
        /// Start time (RFC 3339); defaults to `--length` before now
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// End time (RFC 3339); defaults to now
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        /// Length such as `25m`, used when `--start` is omitted
        #[arg(long)]
        length: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        satisfaction: Option<u8>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit a session's metadata
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        satisfaction: Option<u8>,
        /// Comma-separated tags; an empty string clears them
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a session
    Delete { id: String },
    /// Delete every session and reset the streak
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: SessionAction) -> CliResult {
    let mut ws = Workspace::open()?;
    let now = Utc::now();

    match action {
        SessionAction::List { category, limit } => {
            let sessions: Vec<&Session> = ws
                .store
                .sessions()
                .iter()
                .filter(|s| category.map_or(true, |c| s.category == c))
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            print_json(&sessions)?;
        }
        SessionAction::Today => print_json(&ws.store.today_sessions(now))?,
        SessionAction::Week => print_json(&ws.store.week_sessions(now))?,
        SessionAction::Add {
            category,
            start,
            end,
            length,
            name,
            description,
            satisfaction,
            tags,
        } => {
            let end = end.unwrap_or(now);
            let start = match (start, length) {
                (Some(start), _) => start,
                (None, Some(length)) => {
                    let secs = parse_duration(&length)?;
                    i64::try_from(secs)
                        .ok()
                        .and_then(TimeDelta::try_seconds)
                        .and_then(|d| end.checked_sub_signed(d))
                        .ok_or_else(|| {
                            ValidationError::invalid("length", format!("'{length}' is out of range"))
                        })?
                }
                (None, None) => return Err("either --start or --length is required".into()),
            };
            let metadata = SessionMetadata {
                name,
                description,
                satisfaction,
                tags: tags.as_deref().map(parse_tags).unwrap_or_default(),
            };
            let session = Session::manual(category, start, end, metadata)?;
            print_json(ws.store.add_session(session))?;
        }
        SessionAction::Update {
            id,
            name,
            description,
            satisfaction,
            tags,
        } => {
            let patch = SessionPatch {
                name,
                description,
                satisfaction,
                tags: tags.as_deref().map(parse_tags),
            };
            print_json(ws.store.update_session(&id, patch)?)?;
        }
        SessionAction::Delete { id } => {
            let removed = ws.store.delete_session(&id)?;
            print_json(&serde_json::json!({ "deleted": removed.id }))?;
        }
        SessionAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear history without --yes".into());
            }
            let removed = ws.store.clear_history();
            print_json(&serde_json::json!({ "deleted": removed }))?;
        }
    }

    ws.close();
    Ok(())
}
