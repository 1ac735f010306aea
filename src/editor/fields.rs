//! Editable field descriptions
//!
//! Describes, per block, which fields the settings panel shows, with what
//! widget, current value and bounds. The view layer renders these as-is.

use serde::Serialize;

use crate::core::settings::{LikertScale, NPS_RANGE};
use crate::core::{Block, BlockKind};

/// Widget types for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetType {
    /// Single-line text input
    Input,
    /// Integer input
    Number,
    /// Multi-line text area
    Textarea,
    /// Checkbox
    Checkbox,
    /// Select dropdown
    Select,
    /// URL input
    Url,
    /// Ordered list of text rows with add/remove buttons
    EntryList,
    /// Read-only row of scale points
    ScalePreview,
}

/// Current value of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<String>),
    Points(Vec<u8>),
}

/// Field constraints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConstraints {
    /// Minimum value (for numbers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Allowed values (for selects)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<i64>>,
}

impl FieldConstraints {
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_allowed_values(mut self, values: Vec<i64>) -> Self {
        self.allowed_values = Some(values);
        self
    }
}

/// One field of the settings panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field key, matching the JSON name (`title`, `minLength`, `options`, ...)
    pub id: &'static str,
    pub label: &'static str,
    pub widget: WidgetType,
    pub value: FieldValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Per-row placeholders for entry lists
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub item_placeholders: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<FieldConstraints>,
    pub read_only: bool,
}

impl FieldDescriptor {
    fn new(id: &'static str, label: &'static str, widget: WidgetType, value: FieldValue) -> Self {
        Self {
            id,
            label,
            widget,
            value,
            placeholder: None,
            item_placeholders: Vec::new(),
            constraints: None,
            read_only: false,
        }
    }

    fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    fn constraints(mut self, constraints: FieldConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }
}

/// Fields shown for `block`: title, description, type-specific fields, required
pub fn fields(block: &Block) -> Vec<FieldDescriptor> {
    let mut fields = vec![
        FieldDescriptor::new(
            "title",
            "Question Text",
            WidgetType::Input,
            FieldValue::Text(block.title.clone()),
        )
        .placeholder("Enter your question"),
        FieldDescriptor::new(
            "description",
            "Description (optional)",
            WidgetType::Textarea,
            FieldValue::Text(block.description.clone()),
        )
        .placeholder("Add a description..."),
    ];

    fields.extend(type_fields(&block.kind));

    fields.push(FieldDescriptor::new(
        "required",
        "Required",
        WidgetType::Checkbox,
        FieldValue::Boolean(block.required),
    ));
    fields
}

fn type_fields(kind: &BlockKind) -> Vec<FieldDescriptor> {
    match kind {
        BlockKind::ShortText(text) | BlockKind::LongText(text) => vec![
            FieldDescriptor::new(
                "minLength",
                "Minimum Length",
                WidgetType::Number,
                FieldValue::Integer(text.min_length.into()),
            )
            .constraints(FieldConstraints::default().with_min(0)),
            FieldDescriptor::new(
                "maxLength",
                "Maximum Length",
                WidgetType::Number,
                FieldValue::Integer(text.max_length.into()),
            )
            .constraints(FieldConstraints::default().with_min(1)),
        ],
        BlockKind::SingleChoice(choice) | BlockKind::MultipleChoice(choice) => {
            let mut field = FieldDescriptor::new(
                "options",
                "Options",
                WidgetType::EntryList,
                FieldValue::List(choice.options.clone()),
            );
            field.item_placeholders = (1..=choice.options.len())
                .map(|n| format!("Option {}", n))
                .collect();
            vec![field]
        }
        BlockKind::Likert(likert) => {
            let mut statements = FieldDescriptor::new(
                "statements",
                "Statements",
                WidgetType::EntryList,
                FieldValue::List(likert.statements.clone()),
            );
            statements.item_placeholders =
                vec!["Enter a statement...".to_string(); likert.statements.len()];

            let scale = FieldDescriptor::new(
                "scale",
                "Scale",
                WidgetType::Select,
                FieldValue::Integer(likert.scale.points().into()),
            )
            .constraints(FieldConstraints::default().with_allowed_values(vec![
                LikertScale::Five.points().into(),
                LikertScale::Seven.points().into(),
            ]));
            vec![statements, scale]
        }
        BlockKind::Navigation(nav) => vec![
            FieldDescriptor::new(
                "navigationUrl",
                "Navigation URL",
                WidgetType::Url,
                FieldValue::Text(nav.navigation_url.clone()),
            )
            .placeholder("https://example.com"),
            FieldDescriptor::new(
                "navigationTask",
                "Task Description",
                WidgetType::Textarea,
                FieldValue::Text(nav.navigation_task.clone()),
            )
            .placeholder("Describe the navigation task..."),
        ],
        BlockKind::Nps => {
            let mut scale = FieldDescriptor::new(
                "npsScale",
                "NPS Scale",
                WidgetType::ScalePreview,
                FieldValue::Points(NPS_RANGE.collect()),
            );
            scale.read_only = true;
            vec![scale]
        }
        BlockKind::Welcome
        | BlockKind::YesNo
        | BlockKind::Prototype
        | BlockKind::OpenQuestion
        | BlockKind::ThankYou => Vec::new(),
    }
}
