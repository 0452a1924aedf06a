//! Shared harness: builds states over an in-memory clipboard and models the
//! controller's per-key refresh (rx recompute + scroll reconciliation) that
//! the renderer performs between dispatches.
#![allow(dead_code)]

use core_actions::{Dispatcher, Flow};
use core_input::Key;
use core_state::{EditorState, MemoryClipboard, Mode};

pub fn state_with(lines: &[&str]) -> EditorState {
    let mut st = EditorState::new(Box::new(MemoryClipboard::new()));
    for (i, line) in lines.iter().enumerate() {
        st.rows.insert_row(i, line.as_bytes().to_vec());
    }
    st.rows.dirty = false;
    st.set_screen_size(24, 80);
    st
}

/// Dispatch one key, then refresh the rendered-cursor state the way a frame
/// would.
pub fn press(d: &mut Dispatcher, st: &mut EditorState, key: Key) -> Flow {
    let flow = d.dispatch(st, key);
    if !matches!(st.mode, Mode::Command | Mode::Search) {
        st.update_rx();
        st.scroll_to(st.rx, st.cy);
    }
    st.scroll_cmdline();
    flow
}

pub fn type_str(d: &mut Dispatcher, st: &mut EditorState, text: &str) {
    for c in text.chars() {
        let key = match c {
            '\n' => Key::Enter,
            '\t' => Key::Tab,
            c => Key::Char(c),
        };
        press(d, st, key);
    }
}

pub fn buffer(st: &EditorState) -> Vec<u8> {
    st.rows.to_bytes()
}

pub fn cursor(st: &EditorState) -> (usize, usize) {
    (st.cx, st.cy)
}
