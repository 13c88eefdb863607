use std::collections::VecDeque;

use tracing::debug;

use crate::core::{ActionKind, ActionRecord, GameEngine};

/// LIFO stack that forgets its oldest entry once it grows past `capacity`.
#[derive(Clone, Debug)]
pub struct BoundedStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    pub fn new(capacity: usize) -> Self {
        BoundedStack {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes onto the top, returning the evicted bottom entry if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

/// Undo/redo memory for actions applied to a [`GameEngine`].
#[derive(Clone, Debug)]
pub struct HistoryManager {
    undo_memory: BoundedStack<ActionRecord>,
    redo_memory: BoundedStack<ActionRecord>,
    max_history_length: usize,
    evicted: usize,
}

impl HistoryManager {
    pub fn new(max_history_length: usize) -> Self {
        HistoryManager {
            undo_memory: BoundedStack::new(max_history_length),
            redo_memory: BoundedStack::new(max_history_length),
            max_history_length,
            evicted: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_history_length
    }

    pub fn undo_len(&self) -> usize {
        self.undo_memory.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_memory.len()
    }

    /// Actions pushed out of the undo memory since the last `clear_history`.
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Recorded actions still available to undo, oldest first.
    pub fn actions(&self) -> impl Iterator<Item = &ActionRecord> {
        self.undo_memory.iter()
    }

    /// The action the next `redo_action` would re-apply.
    pub fn next_redo(&self) -> Option<&ActionRecord> {
        self.redo_memory.peek()
    }

    /// Records a freshly applied action. Any redo history is discarded.
    pub fn store_action(&mut self, record: ActionRecord) {
        if let Some(evicted) = self.undo_memory.push(record) {
            debug!(?evicted, "undo history full, dropped oldest action");
            self.evicted += 1;
        }
        self.redo_memory.clear();
    }

    pub fn clear_history(&mut self) {
        self.undo_memory.clear();
        self.redo_memory.clear();
        self.evicted = 0;
    }

    /// Reverses the most recent action. Returns false when there is nothing
    /// to undo.
    pub fn undo_action(&mut self, engine: &mut GameEngine) -> bool {
        let Some(record) = self.undo_memory.pop() else {
            return false;
        };
        self.redo_memory.push(record);
        Self::apply_reverse_action(engine, record);
        true
    }

    /// Re-applies the most recently undone action. Returns false when there
    /// is nothing to redo.
    pub fn redo_action(&mut self, engine: &mut GameEngine) -> bool {
        let Some(record) = self.redo_memory.pop() else {
            return false;
        };
        self.undo_memory.push(record);
        Self::apply_action(engine, record);
        true
    }

    fn apply_reverse_action(engine: &mut GameEngine, record: ActionRecord) {
        let direction = record.direction.opposite();
        // the worker keeps facing the way the recorded action went
        engine.set_worker_facing(record.direction);
        let applied = match record.kind {
            ActionKind::Move => engine.walk(direction),
            ActionKind::Push => engine.pull(direction),
        };
        debug!(?record, applied, "undo");
    }

    fn apply_action(engine: &mut GameEngine, record: ActionRecord) {
        engine.set_worker_facing(record.direction);
        let applied = match record.kind {
            ActionKind::Move => engine.walk(record.direction),
            ActionKind::Push => engine.push(record.direction),
        };
        debug!(?record, applied, "redo");
    }
}
