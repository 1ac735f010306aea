//! WASM API: `#[wasm_bindgen]` exports for the browser builder.
//!
//! This module is only compiled when targeting `wasm32`. Every function
//! takes and returns JSON strings. It provides:
//! - `init_session` / `destroy_session`: lifecycle
//! - `get_view`: list rows, selection, editor fields
//! - `select_block` / `clear_selection`: selection
//! - `drag_event` / `move_block`: reordering
//! - `edit_block` / `update_block` / `update_test_settings`: editing
//! - `validate_flow` / `get_block_types`: checks and discovery

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::categories;
use crate::config::BuilderConfig;
use crate::core::template::NavigationState;
use crate::core::test_settings::TestSettingsChange;
use crate::core::BlockPatch;
use crate::editor::BlockEdit;
use crate::runtime::drag::{DragEvent, DragOutcome};
use crate::runtime::session::{BuilderSession, Mount, SessionError};

// ── Global state ────────────────────────────────────────────────────────────

thread_local! {
    static SESSION: RefCell<Option<BuilderSession>> = RefCell::new(None);
}

fn with_session<R>(f: impl FnOnce(&mut BuilderSession) -> R) -> Result<R, String> {
    SESSION.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(session) => Ok(f(session)),
            None => Err("Session not initialized. Call init_session() first.".into()),
        }
    })
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct OkResponse {
    id: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum MountResponse {
    SessionId(String),
    Redirect(String),
}

#[derive(Serialize)]
struct UpdateResponse {
    updated: bool,
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
enum DragResponse {
    Ignored,
    Updated,
    Commit { from: usize, to: usize },
    Cancelled,
}

impl From<DragOutcome> for DragResponse {
    fn from(outcome: DragOutcome) -> Self {
        match outcome {
            DragOutcome::Ignored => DragResponse::Ignored,
            DragOutcome::Updated => DragResponse::Updated,
            DragOutcome::Commit { from, to } => DragResponse::Commit { from, to },
            DragOutcome::Cancelled => DragResponse::Cancelled,
        }
    }
}

fn json_ok(id: &str) -> String {
    serde_json::to_string(&OkResponse { id: id.into() }).unwrap_or_default()
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse {
        error: msg.into(),
    })
    .unwrap_or_default()
}

fn json_value<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_err(e.to_string()))
}

fn parse<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

// ── Exported functions ──────────────────────────────────────────────────────

/// Open the builder. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn init_session(navigation_json: &str, config_json: &str) -> String {
    console_error_panic_hook::set_once();

    let navigation: NavigationState = match parse(navigation_json, "navigation") {
        Ok(n) => n,
        Err(e) => return json_err(e),
    };
    let config: BuilderConfig = if config_json.trim().is_empty() {
        BuilderConfig::default()
    } else {
        match parse(config_json, "config") {
            Ok(c) => c,
            Err(e) => return json_err(e),
        }
    };

    match BuilderSession::mount(&navigation, config) {
        Mount::Ready(session) => {
            let id = session.id().to_string();
            SESSION.with(|cell| *cell.borrow_mut() = Some(session));
            json_value(&MountResponse::SessionId(id))
        }
        Mount::Redirect { to } => {
            destroy_session();
            json_value(&MountResponse::Redirect(to))
        }
    }
}

#[wasm_bindgen]
pub fn destroy_session() {
    SESSION.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn get_view() -> String {
    match with_session(|session| session.view()) {
        Ok(view) => json_value(&view),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn select_block(block_id: &str) -> String {
    match with_session(|session| session.select(block_id)) {
        Ok(Ok(())) => json_ok(block_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn clear_selection() -> String {
    match with_session(|session| session.clear_selection()) {
        Ok(()) => json_value(&UpdateResponse { updated: true }),
        Err(e) => json_err(e),
    }
}

/// `{"event": "begin" | "over" | "drop", "index": n}` or `{"event": "cancel"}`
#[wasm_bindgen]
pub fn drag_event(event_json: &str) -> String {
    let event: DragEvent = match parse(event_json, "drag event") {
        Ok(e) => e,
        Err(e) => return json_err(e),
    };

    match with_session(|session| session.drag(event)) {
        Ok(Ok(outcome)) => json_value(&DragResponse::from(outcome)),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn move_block(from: usize, to: usize) -> String {
    match with_session(|session| session.move_block(from, to)) {
        Ok(Ok(())) => json_value(&UpdateResponse { updated: true }),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

/// `{"field": "...", "value": ...}`, see [`BlockEdit`]
#[wasm_bindgen]
pub fn edit_block(block_id: &str, edit_json: &str) -> String {
    let edit: BlockEdit = match parse(edit_json, "edit") {
        Ok(e) => e,
        Err(e) => return json_err(e),
    };

    match with_session(|session| session.edit_block(block_id, edit)) {
        Ok(Ok(())) => json_ok(block_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

/// Merge a raw patch; an unknown id reports `updated: false`
#[wasm_bindgen]
pub fn update_block(block_id: &str, patch_json: &str) -> String {
    let value: serde_json::Value = match parse(patch_json, "patch") {
        Ok(v) => v,
        Err(e) => return json_err(e),
    };

    let result = with_session(|session| -> Result<bool, String> {
        let Some(current) = session.blocks().iter().find(|b| b.id == block_id) else {
            return Ok(false);
        };
        let patch = BlockPatch::from_json(value, current).map_err(|e| e.to_string())?;
        Ok(session.update_block(block_id, &patch))
    });

    match result {
        Ok(Ok(updated)) => json_value(&UpdateResponse { updated }),
        Ok(Err(e)) | Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn update_test_settings(change_json: &str) -> String {
    let change: TestSettingsChange = match parse(change_json, "test settings change") {
        Ok(c) => c,
        Err(e) => return json_err(e),
    };

    match with_session(|session| {
        session.update_test_settings(change)?;
        Ok::<_, SessionError>(session.test_settings().clone())
    }) {
        Ok(Ok(settings)) => json_value(&settings),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn validate_flow() -> String {
    match with_session(|session| session.validate()) {
        Ok(result) => json_value(&result),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn get_block_types() -> String {
    json_value(&categories::library())
}
