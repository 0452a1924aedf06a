//! Undo/redo application: walks the record log and replays the forward or
//! reverse mutation through the edit layer with recording disabled.
//!
//! The pairing is symmetric: undoing an insert is the same operation as
//! redoing a delete, so both route through the same arm. Cursor placement
//! after application is deterministic per kind.

use crate::edit;
use core_state::{EditorState, Mode, UndoKind};

pub(crate) fn undo_or_redo(state: &mut EditorState, undo: bool) {
    if state.undo.is_empty() || (undo && state.undo.at_oldest()) {
        state.set_error("already at oldest change");
        return;
    }
    if !undo && state.undo.at_newest() {
        state.set_error("already at newest change");
        return;
    }

    let rec = if undo {
        state.undo.step_back()
    } else {
        state.undo.step_forward()
    };
    let Some(rec) = rec else {
        return;
    };

    match (rec.kind, undo) {
        // Remove one byte the record inserted (or re-remove one it deleted).
        (UndoKind::InsertChar, true)
        | (UndoKind::InsertNewline, true)
        | (UndoKind::DeleteCurrent, false)
        | (UndoKind::DeleteLeft, false) => {
            state.set_cursor(rec.x, rec.y);
            edit::delete_current(state, false);
        }

        // Re-insert one byte. Cursor lands one past an insert-char, at the
        // start of the new row for a newline, and stays put for delete-left.
        (UndoKind::DeleteCurrent, true)
        | (UndoKind::DeleteLeft, true)
        | (UndoKind::InsertChar, false)
        | (UndoKind::InsertNewline, false) => {
            state.set_cursor(rec.x, rec.y);
            if let Some(&c) = rec.data.first() {
                edit::insert_char(state, false, c);
            }
            let (mut x, mut y) = (rec.x, rec.y);
            if rec.kind == UndoKind::InsertChar {
                x = rec.x + 1;
            } else if rec.kind == UndoKind::InsertNewline {
                x = 0;
                y += 1;
            }
            if rec.kind != UndoKind::DeleteLeft {
                state.set_cursor(x, y);
            }
        }

        // Re-insert the whole payload at the anchor.
        (UndoKind::CutRegion, true) | (UndoKind::Paste, false) => {
            state.set_cursor(rec.x, rec.y);
            for &c in &rec.data {
                edit::insert_char(state, false, c);
            }
        }

        // Delete payload-many bytes from the anchor.
        (UndoKind::Paste, true) | (UndoKind::CutRegion, false) => {
            state.set_cursor(rec.x, rec.y);
            for _ in 0..rec.data.len() {
                edit::delete_current(state, false);
            }
        }

        (UndoKind::OpenLineBelow, _) => {
            state.set_cursor(rec.x, rec.y);
            if undo {
                state.rows.delete_row(rec.y + 1);
            } else {
                edit::open_line_below(state, false);
                state.change_mode(Mode::Navigate);
            }
        }
    }

    // Undone back to the load point: the buffer matches the file again.
    if undo && state.undo.at_oldest() {
        state.rows.dirty = false;
    }
}
