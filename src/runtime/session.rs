//! Builder session
//!
//! Composes the block store, the selected block, the drag machine and the
//! settings editor for one test being built. A session only exists when the
//! builder was opened with a template; otherwise [`BuilderSession::mount`]
//! answers with a redirect.

use serde::Serialize;
use uuid::Uuid;

use crate::categories;
use crate::config::BuilderConfig;
use crate::core::template::{NavigationState, TestTemplate};
use crate::core::test_settings::{TestSettings, TestSettingsChange, TestSettingsError};
use crate::core::{Block, BlockId, BlockPatch, BlockStore, BlockType, Snapshot, StoreError, Subscription};
use crate::editor::{self, BlockEdit, EditError, FieldDescriptor};

use super::drag::{DragEvent, DragMachine, DragOutcome, DragState};
use super::validation::{FlowValidationResult, FlowValidator};

/// Result of opening the builder
#[derive(Debug)]
pub enum Mount {
    Ready(BuilderSession),
    /// No template in the navigation state; send the user here instead
    Redirect { to: String },
}

impl Mount {
    pub fn into_session(self) -> Option<BuilderSession> {
        match self {
            Mount::Ready(session) => Some(session),
            Mount::Redirect { .. } => None,
        }
    }
}

/// Session errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Block not found: {0}")]
    UnknownBlock(String),

    #[error("No block is selected")]
    NoSelection,

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    TestSettings(#[from] TestSettingsError),

    /// Edit would leave the block failing validation
    #[error("Edit rejected for block '{block_id}': {}", .issues.join("; "))]
    Rejected { block_id: String, issues: Vec<String> },
}

#[derive(Debug)]
pub struct BuilderSession {
    id: Uuid,
    template: TestTemplate,
    config: BuilderConfig,
    store: BlockStore,
    selected: Option<BlockId>,
    drag: DragMachine,
    test_settings: TestSettings,
}

impl BuilderSession {
    /// Open the builder from the navigation state
    pub fn mount(navigation: &NavigationState, config: BuilderConfig) -> Mount {
        match &navigation.template {
            Some(template) => Mount::Ready(Self::new(template.clone(), config)),
            None => {
                tracing::warn!(to = %config.fallback_route, "No template in navigation state, redirecting");
                Mount::Redirect {
                    to: config.fallback_route,
                }
            }
        }
    }

    /// Start a session seeded with the template's starter blocks
    pub fn new(template: TestTemplate, config: BuilderConfig) -> Self {
        let mut store = BlockStore::with_policy(config.reorder_policy);
        store.set_blocks(template.starter_blocks());

        let session = Self {
            id: Uuid::new_v4(),
            template,
            config,
            store,
            selected: None,
            drag: DragMachine::new(),
            test_settings: TestSettings::default(),
        };
        tracing::info!(
            session = %session.id,
            template = %session.template.id,
            blocks = session.store.len(),
            "Builder session started"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn template(&self) -> &TestTemplate {
        &self.template
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn blocks(&self) -> &[Block] {
        self.store.blocks()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.store.subscribe(observer)
    }

    // ── Store mutators ──────────────────────────────────────────────────

    /// Replace the sequence; a selection whose block vanished is cleared
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.drag.reset();
        self.store.set_blocks(blocks);
        if let Some(id) = &self.selected {
            if self.store.get(id).is_none() {
                self.selected = None;
            }
        }
    }

    /// Move a block directly; a gesture in progress is abandoned since its
    /// source index may no longer name the dragged block
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        self.drag.reset();
        Ok(self.store.move_block(from, to)?)
    }

    pub fn update_block(&mut self, id: impl AsRef<str>, patch: &BlockPatch) -> bool {
        self.store.update_block(id, patch)
    }

    // ── Selection ───────────────────────────────────────────────────────

    pub fn select(&mut self, id: impl AsRef<str>) -> Result<(), SessionError> {
        let id = id.as_ref();
        let block = self
            .store
            .get(id)
            .ok_or_else(|| SessionError::UnknownBlock(id.to_string()))?;
        self.selected = Some(block.id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Selected block, looked up by id so reordering keeps the selection
    pub fn selected(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    // ── Drag and drop ───────────────────────────────────────────────────

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Feed a drag event; a drop commits the move through the store
    pub fn drag(&mut self, event: DragEvent) -> Result<DragOutcome, SessionError> {
        let outcome = self.drag.handle(event, self.store.len());
        if let DragOutcome::Commit { from, to } = outcome {
            self.store.move_block(from, to)?;
        }
        Ok(outcome)
    }

    // ── Settings editor ─────────────────────────────────────────────────

    /// Editor fields for the selected block
    pub fn selected_fields(&self) -> Option<Vec<FieldDescriptor>> {
        self.selected().map(editor::fields)
    }

    pub fn edit_selected(&mut self, edit: BlockEdit) -> Result<(), SessionError> {
        let id = self.selected.clone().ok_or(SessionError::NoSelection)?;
        self.edit_block(id, edit)
    }

    /// Apply one field edit to block `id` and merge it through the store
    ///
    /// With `validate_edits` set, the edit is refused only when it adds an
    /// error the block did not already have.
    pub fn edit_block(&mut self, id: impl AsRef<str>, edit: BlockEdit) -> Result<(), SessionError> {
        let id = id.as_ref();
        let block = self
            .store
            .get(id)
            .ok_or_else(|| SessionError::UnknownBlock(id.to_string()))?;

        let field = edit.field_name();
        let patch = editor::apply_edit(block, edit).map_err(|e| {
            tracing::warn!(block = id, field, error = %e, "Rejected block edit");
            e
        })?;

        if self.config.validate_edits {
            let mut candidate = block.clone();
            patch.apply_to(&mut candidate);
            let before = FlowValidator::validate_block(block);
            let after = FlowValidator::validate_block(&candidate);
            let issues: Vec<String> = after
                .errors_not_in(&before)
                .map(|e| e.message.clone())
                .collect();
            if !issues.is_empty() {
                tracing::warn!(block = id, field, ?issues, "Edit fails validation");
                return Err(SessionError::Rejected {
                    block_id: id.to_string(),
                    issues,
                });
            }
        }

        self.store.update_block(id, &patch);
        Ok(())
    }

    // ── Test settings ───────────────────────────────────────────────────

    pub fn test_settings(&self) -> &TestSettings {
        &self.test_settings
    }

    pub fn update_test_settings(&mut self, change: TestSettingsChange) -> Result<(), SessionError> {
        self.test_settings = self.test_settings.apply(change)?;
        Ok(())
    }

    // ── Read model ──────────────────────────────────────────────────────

    pub fn validate(&self) -> FlowValidationResult {
        FlowValidator::validate(self.store.blocks())
    }

    /// Everything the builder screen renders
    pub fn view(&self) -> BuilderView {
        let drag = self.drag.state();
        let selected_id = self.selected().map(|b| b.id.as_str());

        let rows = self
            .store
            .blocks()
            .iter()
            .enumerate()
            .map(|(index, block)| BlockRow {
                index,
                id: block.id.to_string(),
                block_type: block.block_type(),
                type_name: categories::display_name(block.block_type()),
                title: block.title.clone(),
                description: block.description.clone(),
                required: block.required,
                selected: selected_id == Some(block.id.as_str()),
                dragging: drag.source() == Some(index),
                drop_target: drag.target() == Some(index),
            })
            .collect();

        BuilderView {
            revision: self.store.revision(),
            template: self.template.clone(),
            rows,
            selected: self.selected().map(|block| SelectedBlock {
                fields: editor::fields(block),
                block: block.clone(),
            }),
            drag,
            test_settings: self.test_settings.clone(),
        }
    }
}

/// Read-only view model of the builder screen
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderView {
    pub revision: u64,
    pub template: TestTemplate,
    pub rows: Vec<BlockRow>,
    pub selected: Option<SelectedBlock>,
    pub drag: DragState,
    pub test_settings: TestSettings,
}

/// One row of the block list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRow {
    pub index: usize,
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub type_name: &'static str,
    pub title: String,
    pub description: String,
    pub required: bool,
    pub selected: bool,
    pub dragging: bool,
    pub drop_target: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedBlock {
    pub block: Block,
    pub fields: Vec<FieldDescriptor>,
}
