//! Session categories and their configured default durations.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest preset a category may be configured with (1 minute).
pub const MIN_PRESET_SECS: u64 = 60;
/// Longest preset a category may be configured with (2 hours).
pub const MAX_PRESET_SECS: u64 = 2 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Study,
    Work,
    Focus,
    Break,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Study,
        Category::Work,
        Category::Focus,
        Category::Break,
    ];

    /// Built-in duration used until the user configures a preset.
    pub fn default_preset_secs(self) -> u64 {
        match self {
            Category::Study => 45 * 60,
            Category::Work => 50 * 60,
            Category::Focus => 25 * 60,
            Category::Break => 5 * 60,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Study => "study",
            Category::Work => "work",
            Category::Focus => "focus",
            Category::Break => "break",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Focus
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" => Ok(Category::Study),
            "work" => Ok(Category::Work),
            "focus" => Ok(Category::Focus),
            "break" => Ok(Category::Break),
            _ => Err(ValidationError::UnknownVariant {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

/// Configured default duration per category, in seconds.
///
/// Categories without an entry fall back to [`Category::default_preset_secs`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Presets(BTreeMap<Category, u64>);

impl Presets {
    pub fn get(&self, category: Category) -> u64 {
        self.0
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_preset_secs())
    }

    /// Store a preset, clamped into `[MIN_PRESET_SECS, MAX_PRESET_SECS]`.
    /// Returns the value actually stored.
    pub fn set(&mut self, category: Category, secs: u64) -> u64 {
        let clamped = secs.clamp(MIN_PRESET_SECS, MAX_PRESET_SECS);
        self.0.insert(category, clamped);
        clamped
    }

    /// Every category with its effective preset.
    pub fn effective(&self) -> BTreeMap<Category, u64> {
        Category::ALL.iter().map(|&c| (c, self.get(c))).collect()
    }
}
