//! Block categories and the block library
//!
//! This module groups block types for the builder's palette and provides
//! the display name and short description of every type.

use serde::{Deserialize, Serialize};

use crate::core::BlockType;

/// Block category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    /// Screens framing the flow (welcome, thank-you)
    Screen,
    /// Questions with a direct answer (yes/no, choice, text)
    Question,
    /// Rating scales (NPS, Likert)
    Rating,
    /// Tasks performed on a live site or prototype
    Task,
}

impl BlockCategory {
    /// Get a human-readable name for the category
    pub fn display_name(&self) -> &str {
        match self {
            BlockCategory::Screen => "Screens",
            BlockCategory::Question => "Questions",
            BlockCategory::Rating => "Rating Scales",
            BlockCategory::Task => "Tasks",
        }
    }

    pub fn of(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Welcome | BlockType::ThankYou => BlockCategory::Screen,
            BlockType::YesNo
            | BlockType::SingleChoice
            | BlockType::MultipleChoice
            | BlockType::ShortText
            | BlockType::LongText
            | BlockType::OpenQuestion => BlockCategory::Question,
            BlockType::Nps | BlockType::Likert => BlockCategory::Rating,
            BlockType::Navigation | BlockType::Prototype => BlockCategory::Task,
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Palette entry describing one block type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockTypeInfo {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub name: &'static str,
    pub category: BlockCategory,
    pub description: &'static str,
}

/// Display name shown in the block list and palette
pub fn display_name(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Welcome => "Welcome Screen",
        BlockType::YesNo => "Yes / No",
        BlockType::SingleChoice => "Single Choice",
        BlockType::MultipleChoice => "Multiple Choice",
        BlockType::ShortText => "Short Text",
        BlockType::LongText => "Long Text",
        BlockType::Navigation => "Navigation Test",
        BlockType::Nps => "Net Promoter Score",
        BlockType::Likert => "Likert Scale",
        BlockType::Prototype => "Prototype Test",
        BlockType::OpenQuestion => "Open Question",
        BlockType::ThankYou => "Thank You Screen",
    }
}

pub fn describe(block_type: BlockType) -> BlockTypeInfo {
    let description = match block_type {
        BlockType::Welcome => "Introduce the study to participants",
        BlockType::YesNo => "Simple binary question",
        BlockType::SingleChoice => "Pick exactly one option",
        BlockType::MultipleChoice => "Pick any number of options",
        BlockType::ShortText => "One-line free text answer",
        BlockType::LongText => "Multi-line free text answer",
        BlockType::Navigation => "Ask participants to complete a task on a website",
        BlockType::Nps => "How likely are you to recommend us, 0 to 10",
        BlockType::Likert => "Agreement with statements on a 5 or 7 point scale",
        BlockType::Prototype => "Test an interactive prototype",
        BlockType::OpenQuestion => "Open-ended question",
        BlockType::ThankYou => "Close the study",
    };

    BlockTypeInfo {
        block_type,
        name: display_name(block_type),
        category: BlockCategory::of(block_type),
        description,
    }
}

/// Every block type in palette order
pub fn library() -> Vec<BlockTypeInfo> {
    BlockType::ALL.into_iter().map(describe).collect()
}

/// Library entries of one category
pub fn library_by_category(category: BlockCategory) -> Vec<BlockTypeInfo> {
    library()
        .into_iter()
        .filter(|info| info.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_covers_every_type_once() {
        let library = library();
        assert_eq!(library.len(), BlockType::ALL.len());
        for (info, t) in library.iter().zip(BlockType::ALL) {
            assert_eq!(info.block_type, t);
            assert!(!info.name.is_empty());
        }
    }

    #[test]
    fn test_library_by_category() {
        let screens: Vec<_> = library_by_category(BlockCategory::Screen)
            .into_iter()
            .map(|i| i.block_type)
            .collect();
        assert_eq!(screens, [BlockType::Welcome, BlockType::ThankYou]);

        let ratings = library_by_category(BlockCategory::Rating);
        assert_eq!(ratings.len(), 2);
    }

    #[test]
    fn test_type_info_serialization() {
        let value = serde_json::to_value(describe(BlockType::Likert)).unwrap();
        assert_eq!(value["type"], "likert");
        assert_eq!(value["category"], "Rating");
        assert_eq!(value["name"], "Likert Scale");
    }
}
