//! Per-type settings editor
//!
//! Pure functions from a block and one field-level edit to the patch that
//! [`BlockStore::update_block`](crate::core::BlockStore::update_block) merges.
//! Only the named field changes; everything else in the block is carried
//! over by value.

pub mod fields;

use serde::{Deserialize, Serialize};

use crate::core::settings::{EntryList, LikertScale};
use crate::core::{Block, BlockKind, BlockPatch, BlockType};

pub use fields::{fields, FieldDescriptor, FieldValue, WidgetType};

/// One field-level change from the settings panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum BlockEdit {
    Title(String),
    Description(String),
    Required(bool),
    MinLength(u32),
    MaxLength(u32),
    /// Append an empty option
    AddOption,
    EditOption { index: usize, text: String },
    RemoveOption { index: usize },
    /// Append an empty statement
    AddStatement,
    EditStatement { index: usize, text: String },
    RemoveStatement { index: usize },
    Scale(LikertScale),
    NavigationUrl(String),
    NavigationTask(String),
}

impl BlockEdit {
    /// JSON name of the field this edit touches
    pub fn field_name(&self) -> &'static str {
        match self {
            BlockEdit::Title(_) => "title",
            BlockEdit::Description(_) => "description",
            BlockEdit::Required(_) => "required",
            BlockEdit::MinLength(_) => "minLength",
            BlockEdit::MaxLength(_) => "maxLength",
            BlockEdit::AddOption | BlockEdit::EditOption { .. } | BlockEdit::RemoveOption { .. } => {
                "options"
            }
            BlockEdit::AddStatement
            | BlockEdit::EditStatement { .. }
            | BlockEdit::RemoveStatement { .. } => "statements",
            BlockEdit::Scale(_) => "scale",
            BlockEdit::NavigationUrl(_) => "navigationUrl",
            BlockEdit::NavigationTask(_) => "navigationTask",
        }
    }
}

/// Editor errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The block's type has no such field
    #[error("{block_type} blocks have no '{field}' field")]
    FieldNotSupported {
        field: &'static str,
        block_type: BlockType,
    },

    /// Entry index outside the list
    #[error("No entry {index} in {list} (length {len})")]
    EntryIndexOutOfRange {
        list: EntryList,
        index: usize,
        len: usize,
    },

    /// Numeric value below the field's lower bound
    #[error("'{field}' must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: u32,
        value: u32,
    },
}

/// Patch that applies `edit` to `block`
///
/// # Example
/// ```
/// use test_flow_builder::core::settings::ChoiceSettings;
/// use test_flow_builder::core::{Block, BlockKind};
/// use test_flow_builder::editor::{apply_edit, BlockEdit};
///
/// let block = Block::new("q", BlockKind::SingleChoice(ChoiceSettings::new(["A", "B", "C"])));
/// let patch = apply_edit(&block, BlockEdit::RemoveOption { index: 1 }).unwrap();
/// let kind = patch.kind.unwrap();
/// assert_eq!(kind.choice().unwrap().options, ["A", "C"]);
/// ```
pub fn apply_edit(block: &Block, edit: BlockEdit) -> Result<BlockPatch, EditError> {
    let patch = match edit {
        BlockEdit::Title(title) => BlockPatch::new().title(title),
        BlockEdit::Description(description) => BlockPatch::new().description(description),
        BlockEdit::Required(required) => BlockPatch::new().required(required),
        settings_edit => BlockPatch::new().kind(apply_settings_edit(&block.kind, settings_edit)?),
    };
    Ok(patch)
}

/// Settings of `kind` with `edit` applied
///
/// Common fields (`title`, `description`, `required`) are not settings and
/// are rejected here; route them through [`apply_edit`].
pub fn apply_settings_edit(kind: &BlockKind, edit: BlockEdit) -> Result<BlockKind, EditError> {
    let field = edit.field_name();
    let unsupported = || EditError::FieldNotSupported {
        field,
        block_type: kind.block_type(),
    };

    let mut next = kind.clone();
    match edit {
        BlockEdit::Title(_) | BlockEdit::Description(_) | BlockEdit::Required(_) => {
            return Err(unsupported());
        }
        BlockEdit::MinLength(value) => {
            next.text_mut().ok_or_else(unsupported)?.min_length = value;
        }
        BlockEdit::MaxLength(value) => {
            if value < 1 {
                return Err(EditError::BelowMinimum { field, min: 1, value });
            }
            next.text_mut().ok_or_else(unsupported)?.max_length = value;
        }
        BlockEdit::AddOption => push_entry(&mut next, EntryList::Options).ok_or_else(unsupported)?,
        BlockEdit::EditOption { index, text } => {
            edit_entry(&mut next, EntryList::Options, index, text).ok_or_else(unsupported)??
        }
        BlockEdit::RemoveOption { index } => {
            remove_entry(&mut next, EntryList::Options, index).ok_or_else(unsupported)??
        }
        BlockEdit::AddStatement => {
            push_entry(&mut next, EntryList::Statements).ok_or_else(unsupported)?
        }
        BlockEdit::EditStatement { index, text } => {
            edit_entry(&mut next, EntryList::Statements, index, text).ok_or_else(unsupported)??
        }
        BlockEdit::RemoveStatement { index } => {
            remove_entry(&mut next, EntryList::Statements, index).ok_or_else(unsupported)??
        }
        BlockEdit::Scale(scale) => {
            next.likert_mut().ok_or_else(unsupported)?.scale = scale;
        }
        BlockEdit::NavigationUrl(url) => {
            next.navigation_mut().ok_or_else(unsupported)?.navigation_url = url;
        }
        BlockEdit::NavigationTask(task) => {
            next.navigation_mut().ok_or_else(unsupported)?.navigation_task = task;
        }
    }
    Ok(next)
}

// The entry helpers return `None` when the kind has no such list.

fn push_entry(kind: &mut BlockKind, list: EntryList) -> Option<()> {
    kind.entries_mut(list)?.push(String::new());
    Some(())
}

fn edit_entry(
    kind: &mut BlockKind,
    list: EntryList,
    index: usize,
    text: String,
) -> Option<Result<(), EditError>> {
    let entries = kind.entries_mut(list)?;
    let len = entries.len();
    Some(match entries.get_mut(index) {
        Some(entry) => {
            *entry = text;
            Ok(())
        }
        None => Err(EditError::EntryIndexOutOfRange { list, index, len }),
    })
}

fn remove_entry(kind: &mut BlockKind, list: EntryList, index: usize) -> Option<Result<(), EditError>> {
    let entries = kind.entries_mut(list)?;
    let len = entries.len();
    Some(if index < len {
        entries.remove(index);
        Ok(())
    } else {
        Err(EditError::EntryIndexOutOfRange { list, index, len })
    })
}
