//! Builder runtime
//!
//! This module holds the interactive side of the builder: the drag-reorder
//! state machine, the session that ties store, selection and editor
//! together, and the opt-in flow validator.

pub mod drag;
pub mod session;
pub mod validation;

pub use drag::{DragEvent, DragMachine, DragOutcome, DragState};
pub use session::{BuilderSession, BuilderView, Mount, SessionError};
pub use validation::{FlowValidationResult, FlowValidator, IssueKind};
