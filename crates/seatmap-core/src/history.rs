//! Linear undo/redo history of shape-list snapshots.

use crate::shapes::Shape;

/// Full snapshots of the shape list with a cursor.
///
/// There is always at least one entry; `cursor` indexes the entry matching
/// the last committed state.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<Vec<Shape>>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: Vec<Shape>) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> &[Shape] {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Vec<Shape>] {
        &self.entries
    }

    /// Record `shapes` as a new entry, discarding any redo tail.
    /// Returns false (and records nothing) when `shapes` equals the current
    /// entry.
    pub fn commit(&mut self, shapes: &[Shape]) -> bool {
        if self.current() == shapes {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(shapes.to_vec());
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back. Returns the snapshot to restore, or `None` at the start.
    pub fn undo(&mut self) -> Option<&[Shape]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the end.
    pub fn redo(&mut self) -> Option<&[Shape]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
