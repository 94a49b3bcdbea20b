//! Session export (JSON, CSV) and JSON import.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::session::Session;

const CSV_HEADER: [&str; 9] = [
    "ID",
    "Start Time",
    "End Time",
    "Duration(s)",
    "Type",
    "Name",
    "Description",
    "Satisfaction",
    "Tags",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(ValidationError::UnknownVariant {
                kind: "export format",
                value: s.to_string(),
            }),
        }
    }
}

/// Render sessions in the requested format, preserving list order.
pub fn export_sessions(sessions: &[Session], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(sessions)?),
        ExportFormat::Csv => Ok(to_csv(sessions)),
    }
}

/// Parse a JSON export back into sessions.
pub fn import_sessions_json(text: &str) -> Result<Vec<Session>> {
    Ok(serde_json::from_str(text)?)
}

fn to_csv(sessions: &[Session]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER.iter().map(|h| h.to_string()));
    for s in sessions {
        push_row(
            &mut out,
            [
                s.id.clone(),
                s.start_time.to_rfc3339(),
                s.end_time.to_rfc3339(),
                s.duration.to_string(),
                s.category.to_string(),
                s.name.clone().unwrap_or_default(),
                s.description.clone().unwrap_or_default(),
                s.satisfaction.map(|v| v.to_string()).unwrap_or_default(),
                s.tags.join(";"),
            ],
        );
    }
    out
}

fn push_row<I: IntoIterator<Item = String>>(out: &mut String, fields: I) {
    let row: Vec<String> = fields.into_iter().map(|f| quote(&f)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::session::SessionMetadata;
    use chrono::{DateTime, Duration, Utc};

    fn sample() -> Session {
        let start: DateTime<Utc> = "2026-03-02T09:00:00Z".parse().unwrap();
        Session::manual(
            Category::Work,
            start,
            start + Duration::minutes(50),
            SessionMetadata {
                name: Some("Write \"report\"".into()),
                description: Some("draft, then edit".into()),
                satisfaction: Some(4),
                tags: vec!["q1".into(), "docs".into()],
            },
        )
        .unwrap()
    }

    #[test]
    fn csv_quotes_every_value() {
        let s = sample();
        let csv = export_sessions(std::slice::from_ref(&s), ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"ID\",\"Start Time\",\"End Time\",\"Duration(s)\",\"Type\",\"Name\",\"Description\",\"Satisfaction\",\"Tags\""
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with(&format!("\"{}\",", s.id)));
        assert!(row.contains("\"3000\",\"work\""));
        assert!(row.contains("\"Write \"\"report\"\"\""));
        assert!(row.contains("\"draft, then edit\""));
        assert!(row.ends_with("\"4\",\"q1;docs\""));
        assert!(lines.next().is_none());
    }

    #[test]
    fn csv_of_empty_list_is_header_only() {
        let csv = export_sessions(&[], ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn json_export_parses_back() {
        let sessions = vec![sample(), {
            let now = Utc::now();
            Session::manual(Category::Break, now, now, SessionMetadata::default()).unwrap()
        }];
        let json = export_sessions(&sessions, ExportFormat::Json).unwrap();
        assert_eq!(import_sessions_json(&json).unwrap(), sessions);
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(import_sessions_json("{\"id\": 1}").is_err());
    }

    #[test]
    fn format_parses() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
