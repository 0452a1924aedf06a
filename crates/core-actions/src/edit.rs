//! Buffer mutations: insertion, deletion, indentation, region cut, paste.
//!
//! Each mutator takes a `record` flag; the undo walker re-enters these
//! functions with `record = false`. Deletion records anchor at the position
//! of the removed byte, insertions at the pre-insert cursor, so the reverse
//! tables in the undo module line up without extra bookkeeping.

use core_state::{Clipboard as _, EditorState, Mode, UndoKind};
use core_text::TAB_STOP;

pub(crate) fn set_mark(state: &mut EditorState) {
    state.mx = state.cx;
    state.my = state.cy;
}

/// The buffer may legitimately hold zero rows; any insertion first gives it
/// one to write into.
fn ensure_row_exists(state: &mut EditorState) {
    if state.rows.is_empty() {
        state.rows.insert_row(0, Vec::new());
    }
}

/// Empty-buffer convention: a single empty row collapses back to no rows.
fn collapse_empty_buffer(state: &mut EditorState) {
    if state.rows.numrows() == 1 && state.rows.row_len(state.cy) == 0 {
        state.rows.delete_row(0);
    }
}

pub(crate) fn insert_char(state: &mut EditorState, record: bool, c: u8) {
    if c == b'\n' {
        // Payload newlines (paste, undo replay) never autoindent.
        insert_newline(state, record, false);
        return;
    }
    if record {
        state.undo.push(UndoKind::InsertChar, vec![c], state.cx, state.cy);
    }
    ensure_row_exists(state);
    state.rows.row_insert_byte(state.cy, state.cx, c);
    state.set_cursor(state.cx + 1, state.cy);
}

pub(crate) fn insert_newline(state: &mut EditorState, record: bool, autoindent: bool) {
    if record {
        state
            .undo
            .push(UndoKind::InsertNewline, vec![b'\n'], state.cx, state.cy);
    }
    ensure_row_exists(state);

    if state.cx == 0 {
        state.rows.insert_row(state.cy, Vec::new());
    } else {
        let len = state.rows.row_len(state.cy);
        let suffix = state.rows.row_delete_range(state.cy, state.cx, len - state.cx);
        state.rows.insert_row(state.cy + 1, suffix);
    }
    state.set_cursor(0, state.cy + 1);
    if autoindent {
        autoindent_after_newline(state);
    }
}

/// Re-emit the indent of the nearest non-empty row above the cursor's row.
/// Only meaningful at column 0, right after a newline or open-line.
fn autoindent_after_newline(state: &mut EditorState) {
    if state.cx != 0 {
        return;
    }
    let mut target_indent = None;
    for i in (0..state.cy).rev() {
        match state.rows.row(i) {
            Some(row) if !row.is_empty() => {
                target_indent = Some(row.indent_col());
                break;
            }
            _ => {}
        }
    }
    let Some(indent) = target_indent else {
        return;
    };

    for _ in 0..indent / TAB_STOP {
        if state.indent_as_spaces {
            for _ in 0..TAB_STOP {
                insert_char(state, false, b' ');
            }
        } else {
            insert_char(state, false, b'\t');
        }
    }
    for _ in 0..indent % TAB_STOP {
        insert_char(state, false, b' ');
    }
}

/// Advance to the next tab stop: one tab byte, or the equivalent run of
/// spaces, depending on the indent preference.
pub(crate) fn insert_indent(state: &mut EditorState, record: bool) {
    if state.indent_as_spaces {
        state.update_rx();
        let spaces = (TAB_STOP - 1) - (state.rx % TAB_STOP) + 1;
        for _ in 0..spaces {
            insert_char(state, record, b' ');
        }
    } else {
        insert_char(state, record, b'\t');
    }
}

pub(crate) fn delete_left(state: &mut EditorState, record: bool) {
    if state.cx == 0 && state.cy == 0 {
        return;
    }

    if state.cx > 0 {
        let c = state.rows.get_char(state.cx - 1, state.cy);
        state.rows.row_delete_range(state.cy, state.cx - 1, 1);
        state.set_cursor(state.cx - 1, state.cy);
        if record {
            state.undo.push(UndoKind::DeleteLeft, vec![c], state.cx, state.cy);
        }
    } else {
        // Column 0 of a non-first row: join onto the row above. The record
        // anchors at the join point.
        let join = state.rows.row_len(state.cy - 1);
        state.set_cursor(join, state.cy - 1);
        if record {
            state
                .undo
                .push(UndoKind::DeleteLeft, vec![b'\n'], state.cx, state.cy);
        }
        let data = state.rows.delete_row(state.cy + 1);
        state.rows.row_append_bytes(state.cy, &data);
    }

    collapse_empty_buffer(state);
}

pub(crate) fn delete_current(state: &mut EditorState, record: bool) {
    let Some(row) = state.rows.row(state.cy) else {
        return;
    };
    let len = row.len();

    if state.cx == len {
        if state.cy < state.rows.last_row_idx() {
            if record {
                state
                    .undo
                    .push(UndoKind::DeleteCurrent, vec![b'\n'], state.cx, state.cy);
            }
            let data = state.rows.delete_row(state.cy + 1);
            state.rows.row_append_bytes(state.cy, &data);
        }
    } else {
        let c = state.rows.get_char(state.cx, state.cy);
        if record {
            state
                .undo
                .push(UndoKind::DeleteCurrent, vec![c], state.cx, state.cy);
        }
        state.rows.row_delete_range(state.cy, state.cx, 1);
    }

    collapse_empty_buffer(state);
}

/// Cut the mark..cursor region: removes it from the buffer, copies it (rows
/// joined by `\n`) to the clipboard, and leaves the cursor at the region
/// start. An empty region is a no-op and records nothing.
pub(crate) fn cut_region(state: &mut EditorState, record: bool) {
    let (startx, starty, endx, endy) = if state.my < state.cy {
        (state.mx, state.my, state.cx, state.cy)
    } else if state.cy < state.my {
        (state.cx, state.cy, state.mx, state.my)
    } else if state.cx < state.mx {
        (state.cx, state.cy, state.mx, state.cy)
    } else if state.mx < state.cx {
        (state.mx, state.cy, state.cx, state.cy)
    } else {
        return;
    };

    let mut copy: Vec<u8> = Vec::new();
    let whole_buffer = startx == 0
        && starty == 0
        && endy == state.rows.last_row_idx()
        && endx == state.rows.row_len(endy);

    if whole_buffer {
        let numrows = state.rows.numrows();
        for i in 0..numrows {
            if i != 0 {
                copy.push(b'\n');
            }
            copy.extend(state.rows.delete_row(0));
        }
    } else if starty == endy {
        copy.extend(state.rows.row_delete_range(starty, startx, endx - startx));
    } else {
        let mut startrow_deleted = false;
        if startx == 0 {
            copy.extend(state.rows.delete_row(starty));
            startrow_deleted = true;
        } else {
            let len = state.rows.row_len(starty);
            copy.extend(state.rows.row_delete_range(starty, startx, len - startx));
        }

        // Intermediate rows shift down as they are deleted; the index to
        // delete at stays fixed.
        let mid_at = if startrow_deleted { starty } else { starty + 1 };
        for _ in starty + 1..endy {
            copy.push(b'\n');
            copy.extend(state.rows.delete_row(mid_at));
        }

        copy.push(b'\n');
        let end_at = mid_at;
        if startrow_deleted {
            copy.extend(state.rows.row_delete_range(end_at, 0, endx));
        } else {
            let endlen = state.rows.row_len(end_at);
            let tail = state.rows.row_delete_range(end_at, endx, endlen - endx);
            state.rows.row_append_bytes(starty, &tail);
            copy.extend(state.rows.delete_row(end_at));
        }
    }

    state.set_cursor(startx, starty);
    state.clipboard.set(&copy);
    if record {
        state
            .undo
            .push(UndoKind::CutRegion, copy, state.cx, state.cy);
    }
}

pub(crate) fn paste_clipboard(state: &mut EditorState, record: bool) {
    let Some(text) = state.clipboard.get() else {
        state.set_error("nothing to paste");
        return;
    };
    if record {
        state
            .undo
            .push(UndoKind::Paste, text.clone(), state.cx, state.cy);
    }
    for &c in &text {
        insert_char(state, false, c);
    }
}

pub(crate) fn open_line_below(state: &mut EditorState, record: bool) {
    if record {
        state
            .undo
            .push(UndoKind::OpenLineBelow, Vec::new(), state.cx, state.cy);
    }
    state.rows.insert_row(state.cy + 1, Vec::new());
    state.set_cursor(0, state.cy + 1);
    autoindent_after_newline(state);
    state.change_mode(Mode::Insert);
}
