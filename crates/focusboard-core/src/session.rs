//! Completed session records and the metadata users attach to them.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::error::ValidationError;

pub const MIN_SATISFACTION: u8 = 1;
pub const MAX_SATISFACTION: u8 = 5;
pub const DEFAULT_SATISFACTION: u8 = 3;

/// A completed timer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Seconds of active time.
    pub duration: u64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Caller-supplied metadata merged into a session when it is finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub satisfaction: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A user edit to an existing session. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub satisfaction: Option<u8>,
    pub tags: Option<Vec<String>>,
}

impl Session {
    /// Finalize a timer run. `duration` is the number of ticks observed.
    /// Satisfaction is clamped into 1..=5, defaulting to `default_satisfaction`.
    pub fn from_timer(
        category: Category,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        duration: u64,
        metadata: SessionMetadata,
        default_satisfaction: u8,
    ) -> Self {
        let satisfaction = metadata
            .satisfaction
            .unwrap_or(default_satisfaction)
            .clamp(MIN_SATISFACTION, MAX_SATISFACTION);
        Self {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
            duration,
            category,
            satisfaction: Some(satisfaction),
            name: non_empty(metadata.name),
            description: non_empty(metadata.description),
            tags: clean_tags(metadata.tags),
        }
    }

    /// Record a session from a start/end pair, e.g. one the user forgot to time.
    /// An end before the start yields a zero-length session.
    pub fn manual(
        category: Category,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        metadata: SessionMetadata,
    ) -> Result<Self, ValidationError> {
        if let Some(s) = metadata.satisfaction {
            validate_satisfaction(s)?;
        }
        let duration = (end_time - start_time).num_seconds().max(0) as u64;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
            duration,
            category,
            satisfaction: metadata.satisfaction,
            name: non_empty(metadata.name),
            description: non_empty(metadata.description),
            tags: clean_tags(metadata.tags),
        })
    }

    /// Local calendar day the session started on.
    pub fn day(&self) -> NaiveDate {
        local_day(self.start_time)
    }

    pub fn apply(&mut self, patch: SessionPatch) -> Result<(), ValidationError> {
        if let Some(s) = patch.satisfaction {
            validate_satisfaction(s)?;
            self.satisfaction = Some(s);
        }
        if let Some(name) = patch.name {
            self.name = non_empty(Some(name));
        }
        if let Some(description) = patch.description {
            self.description = non_empty(Some(description));
        }
        if let Some(tags) = patch.tags {
            self.tags = clean_tags(tags);
        }
        Ok(())
    }
}

/// Calendar day of `at` in the local timezone.
pub fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

fn validate_satisfaction(value: u8) -> Result<(), ValidationError> {
    if (MIN_SATISFACTION..=MAX_SATISFACTION).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            "satisfaction",
            format!("{value} is not between {MIN_SATISFACTION} and {MAX_SATISFACTION}"),
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn from_timer_defaults_satisfaction() {
        let now = Utc::now();
        let s = Session::from_timer(
            Category::Focus,
            now,
            now,
            60,
            SessionMetadata::default(),
            DEFAULT_SATISFACTION,
        );
        assert_eq!(s.satisfaction, Some(3));
        assert!(s.name.is_none());
        assert!(!s.id.is_empty());
    }

    #[test]
    fn from_timer_clamps_satisfaction() {
        let now = Utc::now();
        let meta = SessionMetadata {
            satisfaction: Some(9),
            ..Default::default()
        };
        let s = Session::from_timer(Category::Work, now, now, 1, meta, DEFAULT_SATISFACTION);
        assert_eq!(s.satisfaction, Some(5));
    }

    #[test]
    fn manual_session_never_negative() {
        let end = Utc::now();
        let start = end + Duration::minutes(10);
        let s = Session::manual(Category::Study, start, end, SessionMetadata::default()).unwrap();
        assert_eq!(s.duration, 0);
    }

    #[test]
    fn manual_session_spans_start_to_end() {
        let start = Utc::now();
        let end = start + Duration::minutes(30);
        let s = Session::manual(Category::Study, start, end, SessionMetadata::default()).unwrap();
        assert_eq!(s.duration, 1800);
        assert!(s.satisfaction.is_none());
    }

    #[test]
    fn patch_rejects_bad_satisfaction() {
        let now = Utc::now();
        let mut s = Session::manual(Category::Focus, now, now, SessionMetadata::default()).unwrap();
        let err = s
            .apply(SessionPatch {
                satisfaction: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("satisfaction"));
        assert!(s.satisfaction.is_none());
    }

    #[test]
    fn patch_cleans_text_and_tags() {
        let now = Utc::now();
        let mut s = Session::manual(Category::Focus, now, now, SessionMetadata::default()).unwrap();
        s.apply(SessionPatch {
            name: Some("  Deep work ".into()),
            description: Some("   ".into()),
            satisfaction: Some(4),
            tags: Some(vec!["rust".into(), " ".into(), "rust".into(), "cli".into()]),
        })
        .unwrap();
        assert_eq!(s.name.as_deref(), Some("Deep work"));
        assert!(s.description.is_none());
        assert_eq!(s.tags, vec!["rust", "cli"]);
        assert_eq!(s.satisfaction, Some(4));
    }

    #[test]
    fn serializes_camel_case() {
        let now = Utc::now();
        let s = Session::manual(Category::Break, now, now, SessionMetadata::default()).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("startTime").is_some());
        assert!(json.get("endTime").is_some());
        assert_eq!(json["category"], "break");
    }
}
