//! Incremental substring search over rendered row text.
//!
//! Matches are found in rendered coordinates (so a hit inside a tab span
//! reports the cell you see), mapped back to logical columns only when the
//! cursor moves. A hit seeds the selection highlight and a miss surfaces a
//! command-line error and clears it; whether a hit's highlight survives
//! depends on the caller (the mini-line paths keep it, the Navigate-mode
//! repeat actions clear it in the action epilogue).

use core_state::{EditorState, Span};

fn find_from(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > hay.len() {
        return None;
    }
    hay[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Rightmost match whose start index is at most `upto`.
fn rfind_upto(hay: &[u8], needle: &[u8], upto: usize) -> Option<usize> {
    let last_start = hay.len().checked_sub(needle.len())?;
    (0..=last_start.min(upto)).rev().find(|&i| &hay[i..i + needle.len()] == needle)
}

/// Scan rows from the cursor downward. On the starting row the scan begins
/// one cell right of the cursor so repeated searches advance.
pub fn search_forward(state: &mut EditorState, query: &str, set_cursor_on_match: bool) {
    if query.is_empty() {
        state.reset_hlt();
        return;
    }
    let q = query.as_bytes();

    for i in state.cy..state.rows.numrows() {
        let from = if i == state.cy { state.rx + 1 } else { 0 };
        let hit = state
            .rows
            .row(i)
            .and_then(|row| find_from(row.render(), q, from));
        if let Some(m) = hit {
            if set_cursor_on_match {
                let cx = state.rows.rx_to_cx(i, m);
                state.set_cursor(cx, i);
            }
            state.hlt = Some(Span {
                sx: m,
                sy: i,
                ex: m + q.len(),
                ey: i,
            });
            state.scroll_to(m + q.len(), i);
            return;
        }
    }

    state.set_error("search reached EOF");
    state.reset_hlt();
}

/// Scan rows from the cursor upward. The starting row is bounded one cell
/// left of the cursor, and skipped entirely from column 0.
pub fn search_backward(state: &mut EditorState, query: &str, set_cursor_on_match: bool) {
    if query.is_empty() {
        state.reset_hlt();
        return;
    }
    let q = query.as_bytes();

    for i in (0..=state.cy).rev() {
        if i == state.cy && state.cx == 0 {
            continue;
        }
        let upto = if i == state.cy {
            state.rx.saturating_sub(1)
        } else {
            usize::MAX
        };
        let hit = state
            .rows
            .row(i)
            .and_then(|row| rfind_upto(row.render(), q, upto));
        if let Some(m) = hit {
            if set_cursor_on_match {
                let cx = state.rows.rx_to_cx(i, m);
                state.set_cursor(cx, i);
            }
            state.hlt = Some(Span {
                sx: m,
                sy: i,
                ex: m + q.len(),
                ey: i,
            });
            state.scroll_to(m + q.len(), i);
            return;
        }
    }

    state.set_error("search reached BOF");
    state.reset_hlt();
}

/// Replay the last Enter-terminated search query from the current cursor.
pub(crate) fn repeat_search(state: &mut EditorState, forward: bool) {
    if state.search_default.is_empty() {
        state.set_error("empty prev search");
        return;
    }
    let query = state.search_default.clone();
    if forward {
        search_forward(state, &query, true);
    } else {
        search_backward(state, &query, true);
    }
}
