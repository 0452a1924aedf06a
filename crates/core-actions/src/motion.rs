//! Cursor motion semantics.
//!
//! Horizontal motions go through `EditorState::set_cursor`, which re-seeds
//! the sticky column. Vertical motions assign `cy` only and then land `cx`
//! via [`vertical_landing`], so stepping across a short line keeps the
//! preferred rendered column.

use core_state::EditorState;

/// After a `cy` change, pick the `cx` whose rendered column best matches the
/// sticky target. `rx` is recomputed from the chosen `cx` on the next
/// refresh, so the target never collapses on short lines.
fn vertical_landing(state: &mut EditorState) {
    if !state.rows.is_empty() {
        state.cx = state.rows.rx_to_cx(state.cy, state.tx.max(state.rx));
    }
}

pub(crate) fn cursor_up(state: &mut EditorState) {
    if state.cy != 0 {
        state.cy -= 1;
    }
    vertical_landing(state);
}

pub(crate) fn cursor_down(state: &mut EditorState) {
    if state.cy < state.rows.last_row_idx() {
        state.cy += 1;
    }
    vertical_landing(state);
}

pub(crate) fn cursor_left(state: &mut EditorState) {
    if state.cx != 0 {
        state.set_cursor(state.cx - 1, state.cy);
    } else if state.cy > 0 {
        let prev_len = state.rows.row_len(state.cy - 1);
        state.set_cursor(prev_len, state.cy - 1);
    }
}

pub(crate) fn cursor_right(state: &mut EditorState) {
    let Some(row) = state.rows.row(state.cy) else {
        return;
    };
    let len = row.len();
    if state.cx < len {
        state.set_cursor(state.cx + 1, state.cy);
    } else if state.cy != state.rows.last_row_idx() {
        state.set_cursor(0, state.cy + 1);
    }
}

pub(crate) fn line_begin(state: &mut EditorState) {
    state.set_cursor(0, state.cy);
}

pub(crate) fn line_end(state: &mut EditorState) {
    if let Some(row) = state.rows.row(state.cy) {
        let len = row.len();
        state.set_cursor(len, state.cy);
    }
}

/// Skip right over non-alphabetic bytes, then consume one alphabetic run.
/// Digits count as separators here.
pub(crate) fn forward_word(state: &mut EditorState) {
    while !state.char_at_cursor().is_ascii_alphabetic() && !state.cursor_at_end() {
        cursor_right(state);
    }
    if !state.cursor_at_end() {
        while state.char_at_cursor().is_ascii_alphabetic() {
            cursor_right(state);
        }
    }
}

/// Mirror of [`forward_word`] driven by the byte left of the cursor.
pub(crate) fn backward_word(state: &mut EditorState) {
    if state.cx == 0 && state.cy == 0 {
        return;
    }
    loop {
        let c = state.char_left_of_cursor();
        if c.is_ascii_alphabetic() || c == 0 {
            break;
        }
        cursor_left(state);
    }
    while state.char_left_of_cursor().is_ascii_alphabetic() {
        cursor_left(state);
    }
}

pub(crate) fn first_row(state: &mut EditorState) {
    state.cy = 0;
    vertical_landing(state);
}

pub(crate) fn last_row(state: &mut EditorState) {
    state.cy = state.rows.last_row_idx();
    vertical_landing(state);
}

fn page_motion(state: &mut EditorState, down: bool) {
    if down {
        state.cy = state.rowoff + state.screenrows.saturating_sub(1);
        if state.cy > state.rows.last_row_idx() {
            state.cy = state.rows.last_row_idx();
        }
    } else {
        state.cy = state.rowoff;
    }
    vertical_landing(state);

    // One whole screen of single-row steps, so the sticky column applies on
    // every line along the way.
    for _ in 0..state.screenrows {
        if down {
            cursor_down(state);
        } else {
            cursor_up(state);
        }
    }
}

pub(crate) fn page_up(state: &mut EditorState) {
    page_motion(state, false);
}

pub(crate) fn page_down(state: &mut EditorState) {
    page_motion(state, true);
}

fn row_is_blank(state: &EditorState, y: usize) -> bool {
    state.rows.row(y).map_or(true, |r| r.is_blank())
}

/// Skip a run of whitespace-only rows, then a run of content rows, downward.
pub(crate) fn next_para(state: &mut EditorState) {
    if state.cy == state.rows.last_row_idx() {
        return;
    }
    state.cy += 1;
    while state.cy != state.rows.last_row_idx() && row_is_blank(state, state.cy) {
        state.cy += 1;
    }
    while state.cy != state.rows.last_row_idx() && !row_is_blank(state, state.cy) {
        state.cy += 1;
    }
    vertical_landing(state);
}

pub(crate) fn prev_para(state: &mut EditorState) {
    if state.cy == 0 {
        return;
    }
    state.cy -= 1;
    while state.cy != 0 && row_is_blank(state, state.cy) {
        state.cy -= 1;
    }
    while state.cy != 0 && !row_is_blank(state, state.cy) {
        state.cy -= 1;
    }
    vertical_landing(state);
}
