//! Block Store - ordered block collection for one builder session
//!
//! The store owns the canonical sequence of blocks. Every committed mutation
//! replaces the sequence with a new immutable [`Snapshot`] and calls each
//! observer synchronously before the mutator returns. Operations that change
//! nothing (unknown id, rejected index) publish no snapshot.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};

use super::block::{Block, BlockPatch};

/// How [`BlockStore::move_block`] treats indices outside `[0, len)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReorderPolicy {
    /// Leave the sequence unchanged and report the bad index
    #[default]
    Ignore,
    /// Clamp both indices to the last position and apply the move
    Clamp,
}

/// Immutable view of the block sequence at one revision
#[derive(Debug, Clone)]
pub struct Snapshot {
    revision: u64,
    blocks: Arc<[Block]>,
}

impl Snapshot {
    fn new(revision: u64, blocks: Vec<Block>) -> Self {
        Self {
            revision,
            blocks: blocks.into(),
        }
    }

    /// Number of committed mutations that produced this snapshot
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: impl AsRef<str>) -> Option<&Block> {
        let id = id.as_ref();
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn position(&self, id: impl AsRef<str>) -> Option<usize> {
        let id = id.as_ref();
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

type Observer = dyn Fn(&Snapshot) + Send + Sync;

#[derive(Default)]
struct ObserverList {
    next_id: u64,
    entries: Vec<(u64, Arc<Observer>)>,
}

/// Keeps an observer registered; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes the observer immediately"]
pub struct Subscription {
    id: u64,
    observers: Weak<Mutex<ObserverList>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            observers.lock().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Ordered block collection with replace/move/update mutators
pub struct BlockStore {
    current: Snapshot,
    policy: ReorderPolicy,
    observers: Arc<Mutex<ObserverList>>,
}

impl BlockStore {
    /// Create an empty store that ignores out-of-range moves
    ///
    /// # Example
    /// ```
    /// use test_flow_builder::core::store::BlockStore;
    ///
    /// let store = BlockStore::new();
    /// assert!(store.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_policy(ReorderPolicy::default())
    }

    pub fn with_policy(policy: ReorderPolicy) -> Self {
        Self {
            current: Snapshot::new(0, Vec::new()),
            policy,
            observers: Arc::new(Mutex::new(ObserverList::default())),
        }
    }

    pub fn policy(&self) -> ReorderPolicy {
        self.policy
    }

    /// Current snapshot; cheap to clone and keep
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    pub fn blocks(&self) -> &[Block] {
        self.current.blocks()
    }

    pub fn revision(&self) -> u64 {
        self.current.revision()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn get(&self, id: impl AsRef<str>) -> Option<&Block> {
        self.current.get(id)
    }

    pub fn position(&self, id: impl AsRef<str>) -> Option<usize> {
        self.current.position(id)
    }

    /// Register an observer called with every new snapshot
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let mut observers = self.observers.lock();
        let id = observers.next_id;
        observers.next_id += 1;
        observers.entries.push((id, Arc::new(observer)));

        Subscription {
            id,
            observers: Arc::downgrade(&self.observers),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().entries.len()
    }

    /// Replace the entire sequence
    ///
    /// No validation is performed; the caller hands over well-formed blocks.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        tracing::debug!(count = blocks.len(), "Replacing block sequence");
        self.publish(blocks);
    }

    /// Remove the block at `from` and reinsert it at `to`
    ///
    /// `to` is a position in the sequence with the source already removed
    /// (splice-out / splice-in, not a swap). Out-of-range indices follow the
    /// store's [`ReorderPolicy`].
    ///
    /// # Example
    /// ```
    /// use test_flow_builder::core::{Block, BlockKind, BlockStore};
    ///
    /// let mut store = BlockStore::new();
    /// store.set_blocks(vec![
    ///     Block::new("a", BlockKind::Welcome),
    ///     Block::new("b", BlockKind::YesNo),
    ///     Block::new("c", BlockKind::ThankYou),
    /// ]);
    /// store.move_block(0, 2).unwrap();
    ///
    /// let order: Vec<_> = store.blocks().iter().map(|b| b.id.as_str()).collect();
    /// assert_eq!(order, ["b", "c", "a"]);
    /// ```
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let len = self.len();
        let (from, to) = match self.policy {
            ReorderPolicy::Ignore => {
                for index in [from, to] {
                    if index >= len {
                        tracing::warn!(from, to, len, "Ignoring out-of-range block move");
                        return Err(StoreError::IndexOutOfRange { index, len });
                    }
                }
                (from, to)
            }
            ReorderPolicy::Clamp => {
                if len == 0 {
                    return Err(StoreError::Empty);
                }
                (from.min(len - 1), to.min(len - 1))
            }
        };

        let mut blocks = self.current.blocks().to_vec();
        let moved = blocks.remove(from);
        tracing::debug!(block = %moved.id, from, to, "Moving block");
        blocks.insert(to, moved);
        self.publish(blocks);
        Ok(())
    }

    /// Merge `patch` into the block with `id`
    ///
    /// Returns `false` and leaves the sequence untouched when no block has
    /// that id.
    pub fn update_block(&mut self, id: impl AsRef<str>, patch: &BlockPatch) -> bool {
        let id = id.as_ref();
        let Some(index) = self.position(id) else {
            tracing::debug!(block = id, "Update for unknown block ignored");
            return false;
        };

        let mut blocks = self.current.blocks().to_vec();
        patch.apply_to(&mut blocks[index]);
        tracing::debug!(block = id, index, "Updated block");
        self.publish(blocks);
        true
    }

    fn publish(&mut self, blocks: Vec<Block>) {
        self.current = Snapshot::new(self.current.revision + 1, blocks);

        // Observers run outside the lock so they may subscribe or drop
        // subscriptions themselves.
        let observers: Vec<Arc<Observer>> = self
            .observers
            .lock()
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(&self.current);
        }
    }
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockStore")
            .field("revision", &self.current.revision)
            .field("len", &self.current.len())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Store error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Move index outside `[0, len)`
    #[error("Block index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Nothing to move
    #[error("Cannot move blocks in an empty sequence")]
    Empty,
}
