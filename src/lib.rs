//! Test Flow Builder - block model and ordering engine for the test builder
//!
//! This crate provides the ordered block collection a test is built from,
//! the per-type settings editor, the drag-reorder protocol and the builder
//! session that composes them.

pub mod categories;
pub mod config;
pub mod core;
pub mod editor;
pub mod runtime;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use crate::core::{Block, BlockId, BlockKind, BlockPatch, BlockStore, BlockType};
pub use categories::BlockCategory;
pub use config::BuilderConfig;
pub use runtime::{BuilderSession, DragEvent, Mount};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
