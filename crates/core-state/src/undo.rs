//! Linear undo history of reversible edit records.
//!
//! Each record names the action kind it reverses, the byte payload that
//! action produced or consumed, and the cursor position the record anchors
//! to. The log keeps an index of the highest record still applied; appending
//! after an undo truncates everything beyond that index first, so the
//! history stays linear.

use tracing::trace;

/// Action kind a record reverses. One constructor per reversible action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoKind {
    InsertChar,
    InsertNewline,
    DeleteLeft,
    DeleteCurrent,
    CutRegion,
    Paste,
    OpenLineBelow,
}

/// One reversible edit: kind, payload bytes, anchor position.
#[derive(Debug, Clone)]
pub struct UndoRecord {
    pub kind: UndoKind,
    pub data: Vec<u8>,
    pub x: usize,
    pub y: usize,
}

/// Linear record vector plus the index of the last applied record
/// (`None` when everything has been undone).
#[derive(Default)]
pub struct UndoLog {
    records: Vec<UndoRecord>,
    applied: Option<usize>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when there is nothing left to undo.
    pub fn at_oldest(&self) -> bool {
        self.records.is_empty() || self.applied.is_none()
    }

    /// True when there is nothing left to redo.
    pub fn at_newest(&self) -> bool {
        self.applied == Some(self.records.len().wrapping_sub(1)) && !self.records.is_empty()
    }

    /// Append a record, discarding any undone tail first.
    pub fn push(&mut self, kind: UndoKind, data: Vec<u8>, x: usize, y: usize) {
        let keep = self.applied.map_or(0, |p| p + 1);
        self.records.truncate(keep);
        self.records.push(UndoRecord { kind, data, x, y });
        self.applied = Some(self.records.len() - 1);
        trace!(target: "state.undo", len = self.records.len(), ?kind, "push_record");
    }

    /// Step the applied index back one record, returning the record to
    /// reverse. `None` when already at the oldest change.
    pub fn step_back(&mut self) -> Option<UndoRecord> {
        let idx = self.applied?;
        let record = self.records[idx].clone();
        self.applied = idx.checked_sub(1);
        trace!(target: "state.undo", idx, "undo_step");
        Some(record)
    }

    /// Step the applied index forward one record, returning the record to
    /// reapply. `None` when already at the newest change.
    pub fn step_forward(&mut self) -> Option<UndoRecord> {
        let idx = self.applied.map_or(0, |p| p + 1);
        if idx >= self.records.len() {
            return None;
        }
        let record = self.records[idx].clone();
        self.applied = Some(idx);
        trace!(target: "state.undo", idx, "redo_step");
        Some(record)
    }
}
