//! Per-type block settings
//!
//! Each block type that carries configuration gets its own settings struct.
//! Field names follow the JSON shape the front-end stores (`minLength`,
//! `navigationUrl`, ...), and every field has a default so that partially
//! filled settings objects still deserialize.

use serde::{Deserialize, Serialize};

/// Default lower bound for free-text answers
pub const DEFAULT_MIN_LENGTH: u32 = 0;

/// Default upper bound for free-text answers
pub const DEFAULT_MAX_LENGTH: u32 = 1000;

/// Length limits for `short-text` and `long-text` blocks
///
/// `min_length <= max_length` is not enforced here; see
/// [`FlowValidator`](crate::runtime::validation::FlowValidator) for the
/// opt-in check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSettings {
    #[serde(default = "default_min_length")]
    pub min_length: u32,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
}

fn default_min_length() -> u32 {
    DEFAULT_MIN_LENGTH
}

fn default_max_length() -> u32 {
    DEFAULT_MAX_LENGTH
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Answer options for `single-choice` and `multiple-choice` blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSettings {
    #[serde(default)]
    pub options: Vec<String>,
}

impl ChoiceSettings {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Number of points on a Likert scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LikertScale {
    #[default]
    Five,
    Seven,
}

impl LikertScale {
    pub fn points(self) -> u8 {
        match self {
            LikertScale::Five => 5,
            LikertScale::Seven => 7,
        }
    }
}

impl TryFrom<u8> for LikertScale {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(LikertScale::Five),
            7 => Ok(LikertScale::Seven),
            other => Err(format!("Likert scale must be 5 or 7, got {}", other)),
        }
    }
}

impl From<LikertScale> for u8 {
    fn from(scale: LikertScale) -> Self {
        scale.points()
    }
}

/// Statements and scale for `likert` blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertSettings {
    #[serde(default)]
    pub statements: Vec<String>,
    #[serde(default)]
    pub scale: LikertScale,
}

/// Target page and task text for `navigation` blocks
///
/// The URL is free text; nothing checks its format on edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSettings {
    #[serde(default)]
    pub navigation_url: String,
    #[serde(default)]
    pub navigation_task: String,
}

/// Lowest and highest NPS score; the scale is fixed and not editable.
pub const NPS_RANGE: std::ops::RangeInclusive<u8> = 0..=10;

/// Which ordered string list of a block an entry edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryList {
    Options,
    Statements,
}

impl EntryList {
    pub fn field_name(self) -> &'static str {
        match self {
            EntryList::Options => "options",
            EntryList::Statements => "statements",
        }
    }
}

impl std::fmt::Display for EntryList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}
