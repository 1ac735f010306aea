//! Test templates and the starter blocks a new test is seeded with

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockKind};
use super::settings::ChoiceSettings;

/// Template the user picked when creating a test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTemplate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
}

impl TestTemplate {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    /// Blocks a new test built from this template starts with
    ///
    /// Every template currently shares the same starter flow.
    pub fn starter_blocks(&self) -> Vec<Block> {
        starter_blocks()
    }
}

/// State handed over by the navigation layer when the builder opens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    #[serde(default)]
    pub template: Option<TestTemplate>,
}

impl NavigationState {
    pub fn with_template(template: TestTemplate) -> Self {
        Self {
            template: Some(template),
        }
    }
}

/// Welcome screen, a yes/no usage question and a frequency question
pub fn starter_blocks() -> Vec<Block> {
    vec![
        Block::new("welcome", BlockKind::Welcome)
            .with_title("Welcome to our study")
            .with_description("Welcome screen"),
        Block::new("usage", BlockKind::YesNo)
            .with_title("Have you used our product before?")
            .with_description("Product usage")
            .with_required(true),
        Block::new(
            "frequency",
            BlockKind::MultipleChoice(ChoiceSettings::new([
                "Once a week",
                "Several times a week",
                "Once a month",
                "Several times a month",
                "Rarely",
            ])),
        )
        .with_title("How often do you use our product?")
        .with_description("Usage frequency")
        .with_required(true),
    ]
}
