//! Undo/Redo snapshot stacks.
//!
//! Every completed stroke (and every clear of inked content) pushes a full
//! raster snapshot. Undo moves the top snapshot to the redo stack and
//! restores whatever is now on top; redo moves it back.

use sigpad_core::Snapshot;

/// What the canvas should show after an undo or redo.
#[derive(Debug, Clone, PartialEq)]
pub enum Restore {
    /// Repaint from this snapshot.
    Snapshot(Snapshot),
    /// The undo stack is empty: show a blank canvas.
    Blank,
}

/// Manages undo/redo stacks with bounded depth.
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Maximum undo depth.
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Record a new state. Any divergent redo history is discarded.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }

        // Clear redo stack on new action
        self.redo_stack.clear();
        log::debug!(
            "history commit: {} undo / 0 redo",
            self.undo_stack.len()
        );
    }

    /// Step back. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Restore> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(snapshot);
        log::debug!(
            "history undo: {} undo / {} redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Some(match self.undo_stack.last() {
            Some(top) => Restore::Snapshot(top.clone()),
            None => Restore::Blank,
        })
    }

    /// Step forward. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Restore> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(snapshot.clone());
        log::debug!(
            "history redo: {} undo / {} redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Some(Restore::Snapshot(snapshot))
    }

    pub fn top(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
