//! Block entity and related types
//!
//! A [`Block`] is one step of a test flow. Its type-specific configuration
//! lives in [`BlockKind`], a tagged union with one case per block type, so
//! a choice block can only ever carry options and a text block only length
//! limits.
//!
//! On the wire a block keeps the flat shape the front-end uses:
//!
//! ```json
//! { "id": "usage", "type": "yes-no", "title": "...", "description": "...",
//!   "required": true, "settings": {} }
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::settings::{
    ChoiceSettings, EntryList, LikertSettings, NavigationSettings, TextSettings,
};
use super::BlockId;

/// The closed set of block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Welcome,
    YesNo,
    SingleChoice,
    MultipleChoice,
    ShortText,
    LongText,
    Navigation,
    Nps,
    Likert,
    Prototype,
    OpenQuestion,
    ThankYou,
}

impl BlockType {
    /// Every block type, in palette order
    pub const ALL: [BlockType; 12] = [
        BlockType::Welcome,
        BlockType::YesNo,
        BlockType::SingleChoice,
        BlockType::MultipleChoice,
        BlockType::ShortText,
        BlockType::LongText,
        BlockType::Navigation,
        BlockType::Nps,
        BlockType::Likert,
        BlockType::Prototype,
        BlockType::OpenQuestion,
        BlockType::ThankYou,
    ];

    /// Wire name, e.g. `"multiple-choice"`
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Welcome => "welcome",
            BlockType::YesNo => "yes-no",
            BlockType::SingleChoice => "single-choice",
            BlockType::MultipleChoice => "multiple-choice",
            BlockType::ShortText => "short-text",
            BlockType::LongText => "long-text",
            BlockType::Navigation => "navigation",
            BlockType::Nps => "nps",
            BlockType::Likert => "likert",
            BlockType::Prototype => "prototype",
            BlockType::OpenQuestion => "open-question",
            BlockType::ThankYou => "thank-you",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, BlockType::ShortText | BlockType::LongText)
    }

    pub fn is_choice(self) -> bool {
        matches!(self, BlockType::SingleChoice | BlockType::MultipleChoice)
    }

    /// Screens that frame the flow and never collect an answer
    pub fn is_screen(self) -> bool {
        matches!(self, BlockType::Welcome | BlockType::ThankYou)
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BlockError::UnknownType(s.to_string()))
    }
}

/// Type plus type-specific settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Welcome,
    YesNo,
    SingleChoice(ChoiceSettings),
    MultipleChoice(ChoiceSettings),
    ShortText(TextSettings),
    LongText(TextSettings),
    Navigation(NavigationSettings),
    Nps,
    Likert(LikertSettings),
    Prototype,
    OpenQuestion,
    ThankYou,
}

impl BlockKind {
    /// The kind of a fresh block of `block_type`, with default settings
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Welcome => BlockKind::Welcome,
            BlockType::YesNo => BlockKind::YesNo,
            BlockType::SingleChoice => BlockKind::SingleChoice(ChoiceSettings::default()),
            BlockType::MultipleChoice => BlockKind::MultipleChoice(ChoiceSettings::default()),
            BlockType::ShortText => BlockKind::ShortText(TextSettings::default()),
            BlockType::LongText => BlockKind::LongText(TextSettings::default()),
            BlockType::Navigation => BlockKind::Navigation(NavigationSettings::default()),
            BlockType::Nps => BlockKind::Nps,
            BlockType::Likert => BlockKind::Likert(LikertSettings::default()),
            BlockType::Prototype => BlockKind::Prototype,
            BlockType::OpenQuestion => BlockKind::OpenQuestion,
            BlockType::ThankYou => BlockKind::ThankYou,
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Welcome => BlockType::Welcome,
            BlockKind::YesNo => BlockType::YesNo,
            BlockKind::SingleChoice(_) => BlockType::SingleChoice,
            BlockKind::MultipleChoice(_) => BlockType::MultipleChoice,
            BlockKind::ShortText(_) => BlockType::ShortText,
            BlockKind::LongText(_) => BlockType::LongText,
            BlockKind::Navigation(_) => BlockType::Navigation,
            BlockKind::Nps => BlockType::Nps,
            BlockKind::Likert(_) => BlockType::Likert,
            BlockKind::Prototype => BlockType::Prototype,
            BlockKind::OpenQuestion => BlockType::OpenQuestion,
            BlockKind::ThankYou => BlockType::ThankYou,
        }
    }

    /// Build a kind from a type name and a settings object
    ///
    /// Missing settings fields take their defaults; `null` counts as an
    /// empty object.
    pub fn from_parts(block_type: BlockType, settings: serde_json::Value) -> Result<Self, BlockError> {
        let settings = if settings.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            settings
        };

        let invalid = |e: serde_json::Error| BlockError::InvalidSettings {
            block_type,
            reason: e.to_string(),
        };

        let kind = match block_type {
            BlockType::SingleChoice => {
                BlockKind::SingleChoice(serde_json::from_value(settings).map_err(invalid)?)
            }
            BlockType::MultipleChoice => {
                BlockKind::MultipleChoice(serde_json::from_value(settings).map_err(invalid)?)
            }
            BlockType::ShortText => {
                BlockKind::ShortText(serde_json::from_value(settings).map_err(invalid)?)
            }
            BlockType::LongText => {
                BlockKind::LongText(serde_json::from_value(settings).map_err(invalid)?)
            }
            BlockType::Navigation => {
                BlockKind::Navigation(serde_json::from_value(settings).map_err(invalid)?)
            }
            BlockType::Likert => {
                BlockKind::Likert(serde_json::from_value(settings).map_err(invalid)?)
            }
            other => BlockKind::default_for(other),
        };
        Ok(kind)
    }

    /// Settings as the JSON object stored next to `type`
    pub fn settings_json(&self) -> serde_json::Value {
        let value = match self {
            BlockKind::SingleChoice(s) | BlockKind::MultipleChoice(s) => serde_json::to_value(s),
            BlockKind::ShortText(s) | BlockKind::LongText(s) => serde_json::to_value(s),
            BlockKind::Navigation(s) => serde_json::to_value(s),
            BlockKind::Likert(s) => serde_json::to_value(s),
            _ => Ok(serde_json::Value::Object(Default::default())),
        };
        // Plain structs of strings and integers always serialize.
        value.unwrap_or_default()
    }

    pub fn text(&self) -> Option<&TextSettings> {
        match self {
            BlockKind::ShortText(s) | BlockKind::LongText(s) => Some(s),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextSettings> {
        match self {
            BlockKind::ShortText(s) | BlockKind::LongText(s) => Some(s),
            _ => None,
        }
    }

    pub fn choice(&self) -> Option<&ChoiceSettings> {
        match self {
            BlockKind::SingleChoice(s) | BlockKind::MultipleChoice(s) => Some(s),
            _ => None,
        }
    }

    pub fn likert(&self) -> Option<&LikertSettings> {
        match self {
            BlockKind::Likert(s) => Some(s),
            _ => None,
        }
    }

    pub fn likert_mut(&mut self) -> Option<&mut LikertSettings> {
        match self {
            BlockKind::Likert(s) => Some(s),
            _ => None,
        }
    }

    pub fn navigation(&self) -> Option<&NavigationSettings> {
        match self {
            BlockKind::Navigation(s) => Some(s),
            _ => None,
        }
    }

    pub fn navigation_mut(&mut self) -> Option<&mut NavigationSettings> {
        match self {
            BlockKind::Navigation(s) => Some(s),
            _ => None,
        }
    }

    /// Ordered string list (`options` or `statements`) if this kind has it
    pub fn entries(&self, list: EntryList) -> Option<&Vec<String>> {
        match (self, list) {
            (BlockKind::SingleChoice(s) | BlockKind::MultipleChoice(s), EntryList::Options) => {
                Some(&s.options)
            }
            (BlockKind::Likert(s), EntryList::Statements) => Some(&s.statements),
            _ => None,
        }
    }

    pub fn entries_mut(&mut self, list: EntryList) -> Option<&mut Vec<String>> {
        match (self, list) {
            (BlockKind::SingleChoice(s) | BlockKind::MultipleChoice(s), EntryList::Options) => {
                Some(&mut s.options)
            }
            (BlockKind::Likert(s), EntryList::Statements) => Some(&mut s.statements),
            _ => None,
        }
    }
}

/// One step of a test flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BlockRecord", into = "BlockRecord")]
pub struct Block {
    pub id: BlockId,
    /// Question or screen text shown to respondents
    pub title: String,
    /// Short label shown in the block list
    pub description: String,
    pub required: bool,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            required: false,
            kind,
        }
    }

    /// A fresh block of `block_type` with a generated id and default settings
    pub fn instantiate(block_type: BlockType) -> Self {
        Self::new(BlockId::new(), BlockKind::default_for(block_type))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }
}

/// Flat wire shape of a block
#[derive(Serialize, Deserialize)]
struct BlockRecord {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: BlockType,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    settings: serde_json::Value,
}

impl TryFrom<BlockRecord> for Block {
    type Error = BlockError;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        Ok(Block {
            id: record.id,
            title: record.title,
            description: record.description,
            required: record.required,
            kind: BlockKind::from_parts(record.block_type, record.settings)?,
        })
    }
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        BlockRecord {
            block_type: block.block_type(),
            settings: block.kind.settings_json(),
            id: block.id,
            title: block.title,
            description: block.description,
            required: block.required,
        }
    }
}

/// Partial update merged into a block by
/// [`BlockStore::update_block`](super::store::BlockStore::update_block)
///
/// `None` fields are left untouched. Replacing `kind` swaps type and settings
/// together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub kind: Option<BlockKind>,
}

impl BlockPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn kind(mut self, kind: BlockKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.required.is_none()
            && self.kind.is_none()
    }

    /// Merge this patch into `block`
    pub fn apply_to(&self, block: &mut Block) {
        if let Some(title) = &self.title {
            block.title = title.clone();
        }
        if let Some(description) = &self.description {
            block.description = description.clone();
        }
        if let Some(required) = self.required {
            block.required = required;
        }
        if let Some(kind) = &self.kind {
            block.kind = kind.clone();
        }
    }

    /// Parse a JSON patch (`{"title"?, "description"?, "required"?, "type"?,
    /// "settings"?}`) against the block it will be merged into.
    ///
    /// `settings` without `type` keeps the current type; `type` without
    /// `settings` starts from that type's defaults.
    pub fn from_json(value: serde_json::Value, current: &Block) -> Result<Self, BlockError> {
        let record: PatchRecord =
            serde_json::from_value(value).map_err(|e| BlockError::InvalidPatch(e.to_string()))?;

        let kind = match (record.block_type, record.settings) {
            (None, None) => None,
            (Some(block_type), None) => Some(BlockKind::default_for(block_type)),
            (block_type, Some(settings)) => Some(BlockKind::from_parts(
                block_type.unwrap_or_else(|| current.block_type()),
                settings,
            )?),
        };

        Ok(BlockPatch {
            title: record.title,
            description: record.description,
            required: record.required,
            kind,
        })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PatchRecord {
    title: Option<String>,
    description: Option<String>,
    required: Option<bool>,
    #[serde(rename = "type")]
    block_type: Option<BlockType>,
    settings: Option<serde_json::Value>,
}

/// Block errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    /// Type name outside the closed set
    #[error("Unknown block type: '{0}'")]
    UnknownType(String),

    /// Settings object does not fit the block type
    #[error("Invalid settings for {block_type} block: {reason}")]
    InvalidSettings { block_type: BlockType, reason: String },

    /// Patch object could not be parsed
    #[error("Invalid block patch: {0}")]
    InvalidPatch(String),
}
