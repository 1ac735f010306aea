//! Drag-reorder state machine
//!
//! Models the drag gesture over the block list as three states:
//!
//! ```text
//!            Begin(i)             Over(t)
//!   Idle ─────────────▶ Dragging ─────────▶ Over(t)  ◀─┐ Over(t')
//!    ▲                     │                  │  └─────┘
//!    │   Drop(t): commit   │                  │
//!    └─────────────────────┴──────────────────┘
//!        Cancel: no commit
//! ```
//!
//! The machine never touches the store; a drop yields a
//! [`DragOutcome::Commit`] the session turns into `move_block`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DragState {
    #[default]
    Idle,
    /// Row `source` is being dragged, not yet over any row
    Dragging { source: usize },
    /// Row `source` is being dragged and row `target` is highlighted
    Over { source: usize, target: usize },
}

impl DragState {
    pub fn source(&self) -> Option<usize> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { source } | DragState::Over { source, .. } => Some(source),
        }
    }

    /// Highlighted drop row; only the latest `Over` counts
    pub fn target(&self) -> Option<usize> {
        match *self {
            DragState::Over { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}

/// Synthetic pointer events fed to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "index", rename_all = "camelCase")]
pub enum DragEvent {
    Begin(usize),
    Over(usize),
    Drop(usize),
    Cancel,
}

/// What handling one event produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Event did not apply in the current state
    Ignored,
    /// State changed, no store mutation needed
    Updated,
    /// Gesture finished over a row; move `from` to `to`
    Commit { from: usize, to: usize },
    /// Gesture abandoned
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Feed one event; `len` is the current number of rows
    pub fn handle(&mut self, event: DragEvent, len: usize) -> DragOutcome {
        let outcome = match (self.state, event) {
            (DragState::Idle, DragEvent::Begin(source)) if source < len => {
                self.state = DragState::Dragging { source };
                DragOutcome::Updated
            }
            (DragState::Dragging { source } | DragState::Over { source, .. }, DragEvent::Over(target))
                if target < len =>
            {
                self.state = DragState::Over { source, target };
                DragOutcome::Updated
            }
            (DragState::Dragging { source } | DragState::Over { source, .. }, DragEvent::Drop(to)) => {
                self.state = DragState::Idle;
                DragOutcome::Commit { from: source, to }
            }
            (DragState::Dragging { .. } | DragState::Over { .. }, DragEvent::Cancel) => {
                self.state = DragState::Idle;
                DragOutcome::Cancelled
            }
            _ => DragOutcome::Ignored,
        };

        if outcome == DragOutcome::Ignored {
            tracing::debug!(?event, state = ?self.state, "Ignoring drag event");
        }
        outcome
    }

    /// Drop any gesture in progress without committing
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_over_drop_commits() {
        let mut drag = DragMachine::new();
        assert_eq!(drag.handle(DragEvent::Begin(0), 3), DragOutcome::Updated);
        assert_eq!(drag.state(), DragState::Dragging { source: 0 });

        assert_eq!(drag.handle(DragEvent::Over(1), 3), DragOutcome::Updated);
        assert_eq!(drag.handle(DragEvent::Over(2), 3), DragOutcome::Updated);
        assert_eq!(drag.state().target(), Some(2));

        assert_eq!(
            drag.handle(DragEvent::Drop(2), 3),
            DragOutcome::Commit { from: 0, to: 2 }
        );
        assert!(drag.state().is_idle());
    }

    #[test]
    fn test_drop_without_over_still_commits() {
        let mut drag = DragMachine::new();
        drag.handle(DragEvent::Begin(2), 3);
        assert_eq!(
            drag.handle(DragEvent::Drop(0), 3),
            DragOutcome::Commit { from: 2, to: 0 }
        );
    }

    #[test]
    fn test_cancel_clears_without_commit() {
        let mut drag = DragMachine::new();
        drag.handle(DragEvent::Begin(1), 3);
        drag.handle(DragEvent::Over(0), 3);
        assert_eq!(drag.handle(DragEvent::Cancel, 3), DragOutcome::Cancelled);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_cannot_begin_on_missing_row() {
        let mut drag = DragMachine::new();
        assert_eq!(drag.handle(DragEvent::Begin(0), 0), DragOutcome::Ignored);
        assert_eq!(drag.handle(DragEvent::Begin(3), 3), DragOutcome::Ignored);
        assert!(drag.state().is_idle());
    }

    #[test]
    fn test_single_dragged_element() {
        let mut drag = DragMachine::new();
        drag.handle(DragEvent::Begin(0), 3);
        assert_eq!(drag.handle(DragEvent::Begin(1), 3), DragOutcome::Ignored);
        assert_eq!(drag.state().source(), Some(0));
    }

    #[test]
    fn test_events_ignored_while_idle() {
        let mut drag = DragMachine::new();
        assert_eq!(drag.handle(DragEvent::Over(1), 3), DragOutcome::Ignored);
        assert_eq!(drag.handle(DragEvent::Drop(1), 3), DragOutcome::Ignored);
        assert_eq!(drag.handle(DragEvent::Cancel, 3), DragOutcome::Ignored);
    }

    #[test]
    fn test_over_outside_rows_keeps_last_target() {
        let mut drag = DragMachine::new();
        drag.handle(DragEvent::Begin(0), 3);
        drag.handle(DragEvent::Over(1), 3);
        assert_eq!(drag.handle(DragEvent::Over(7), 3), DragOutcome::Ignored);
        assert_eq!(drag.state(), DragState::Over { source: 0, target: 1 });
    }
}
