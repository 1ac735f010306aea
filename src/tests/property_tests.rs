//! Property-based tests using proptest.
//!
//! These tests verify invariants that must hold for *any* input, catching
//! edge cases that hand-written tests miss.

use proptest::prelude::*;

use crate::core::settings::ChoiceSettings;
use crate::core::store::ReorderPolicy;
use crate::core::{Block, BlockKind, BlockPatch, BlockStore};
use crate::editor::{apply_edit, BlockEdit};
use crate::runtime::drag::{DragEvent, DragMachine, DragOutcome};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn store_of(len: usize, policy: ReorderPolicy) -> BlockStore {
    let mut store = BlockStore::with_policy(policy);
    store.set_blocks(
        (0..len)
            .map(|i| Block::new(format!("b{}", i), BlockKind::YesNo))
            .collect(),
    );
    store
}

fn ids(store: &BlockStore) -> Vec<String> {
    store.blocks().iter().map(|b| b.id.to_string()).collect()
}

fn drag_event() -> impl Strategy<Value = DragEvent> {
    prop_oneof![
        (0..12usize).prop_map(DragEvent::Begin),
        (0..12usize).prop_map(DragEvent::Over),
        (0..12usize).prop_map(DragEvent::Drop),
        Just(DragEvent::Cancel),
    ]
}

// ---------------------------------------------------------------------------
// Reorder Properties
// ---------------------------------------------------------------------------

proptest! {
    /// An in-range move is a splice: the moved block lands at `to` and the
    /// rest keep their relative order.
    #[test]
    fn move_preserves_relative_order(len in 1..20usize, from_seed in 0..20usize, to_seed in 0..20usize) {
        let from = from_seed % len;
        let to = to_seed % len;
        let mut store = store_of(len, ReorderPolicy::Ignore);
        let before = ids(&store);

        store.move_block(from, to).unwrap();
        let after = ids(&store);

        prop_assert_eq!(after.len(), len);
        prop_assert_eq!(&after[to], &before[from]);

        let mut rest_before = before.clone();
        rest_before.remove(from);
        let mut rest_after = after.clone();
        rest_after.remove(to);
        prop_assert_eq!(rest_before, rest_after);
    }

    /// Out-of-range moves under the default policy change nothing.
    #[test]
    fn out_of_range_move_is_noop(len in 0..10usize, from in 0..20usize, extra in 0..10usize) {
        let mut store = store_of(len, ReorderPolicy::Ignore);
        let before = ids(&store);
        let revision = store.revision();

        let to = len + extra;
        prop_assert!(store.move_block(from, to).is_err());
        prop_assert_eq!(ids(&store), before);
        prop_assert_eq!(store.revision(), revision);
    }

    /// Clamped moves on a non-empty store always succeed and keep every block.
    #[test]
    fn clamped_move_keeps_all_blocks(len in 1..10usize, from in 0..30usize, to in 0..30usize) {
        let mut store = store_of(len, ReorderPolicy::Clamp);
        let mut before = ids(&store);

        prop_assert!(store.move_block(from, to).is_ok());
        let mut after = ids(&store);
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }
}

// ---------------------------------------------------------------------------
// Update Properties
// ---------------------------------------------------------------------------

proptest! {
    /// An empty patch leaves the block equal to what it was.
    #[test]
    fn empty_patch_is_identity(title in ".{0,20}", required in any::<bool>()) {
        let mut store = BlockStore::new();
        store.set_blocks(vec![Block::new("a", BlockKind::YesNo).with_title(title).with_required(required)]);
        let before = store.blocks().to_vec();

        prop_assert!(store.update_block("a", &BlockPatch::new()));
        prop_assert_eq!(store.blocks(), &before[..]);
    }

    /// Updating an id not in the store never changes the sequence.
    #[test]
    fn unknown_id_update_is_noop(len in 0..10usize, title in ".{0,20}") {
        let mut store = store_of(len, ReorderPolicy::Ignore);
        let before = store.snapshot();

        prop_assert!(!store.update_block("missing", &BlockPatch::new().title(title)));
        prop_assert_eq!(store.blocks(), before.blocks());
        prop_assert_eq!(store.revision(), before.revision());
    }

    /// Removing option `k` shifts the later options down by one.
    #[test]
    fn remove_option_shifts_tail(options in prop::collection::vec("[a-z]{1,8}", 1..10), seed in 0..10usize) {
        let index = seed % options.len();
        let block = Block::new("c", BlockKind::SingleChoice(ChoiceSettings::new(options.clone())));

        let patch = apply_edit(&block, BlockEdit::RemoveOption { index }).unwrap();
        let kind = patch.kind.unwrap();
        let after = &kind.choice().unwrap().options;

        let mut expected = options.clone();
        expected.remove(index);
        prop_assert_eq!(after, &expected);
    }
}

// ---------------------------------------------------------------------------
// Drag Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Commits only ever come out of an active gesture, and the machine is
    /// idle afterwards.
    #[test]
    fn drag_commits_leave_machine_idle(events in prop::collection::vec(drag_event(), 0..40), len in 0..8usize) {
        let mut drag = DragMachine::new();
        for event in events {
            let was_active = !drag.state().is_idle();
            let outcome = drag.handle(event, len);
            match outcome {
                DragOutcome::Commit { from, .. } => {
                    prop_assert!(was_active);
                    prop_assert!(from < len);
                    prop_assert!(drag.state().is_idle());
                }
                DragOutcome::Cancelled => prop_assert!(drag.state().is_idle()),
                DragOutcome::Updated | DragOutcome::Ignored => {}
            }
            if let Some(target) = drag.state().target() {
                prop_assert!(target < len);
            }
        }
    }
}
