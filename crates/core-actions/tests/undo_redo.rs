//! Undo/redo reversibility across the record table.

mod common;

use common::{buffer, cursor, state_with};
use core_actions::{Action, apply};
use core_state::Clipboard as _;

#[test]
fn insert_char_undo_restores_bytes_and_cursor() {
    let mut st = state_with(&["ab"]);
    st.set_cursor(1, 0);
    apply(&mut st, Action::InsertChar(b'X'));
    assert_eq!(buffer(&st), b"aXb\n");
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"ab\n");
    assert_eq!(cursor(&st), (1, 0));
    apply(&mut st, Action::Redo);
    assert_eq!(buffer(&st), b"aXb\n");
    assert_eq!(cursor(&st), (2, 0), "cursor one past the reinserted byte");
}

#[test]
fn newline_undo_rejoins_rows() {
    let mut st = state_with(&["abcd"]);
    st.set_cursor(2, 0);
    apply(&mut st, Action::InsertNewline);
    assert_eq!(buffer(&st), b"ab\ncd\n");
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"abcd\n");
    apply(&mut st, Action::Redo);
    assert_eq!(buffer(&st), b"ab\ncd\n");
    assert_eq!(cursor(&st), (0, 1));
}

#[test]
fn delete_left_undo_reinserts() {
    let mut st = state_with(&["abcd"]);
    st.set_cursor(3, 0);
    apply(&mut st, Action::DeleteLeftChar);
    assert_eq!(buffer(&st), b"abd\n");
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"abcd\n");
    assert_eq!(cursor(&st), (3, 0));
    apply(&mut st, Action::Redo);
    assert_eq!(buffer(&st), b"abd\n");
    assert_eq!(cursor(&st), (2, 0));
}

#[test]
fn delete_left_join_undo_resplits_rows() {
    let mut st = state_with(&["ab", "cd"]);
    st.set_cursor(0, 1);
    apply(&mut st, Action::DeleteLeftChar);
    assert_eq!(buffer(&st), b"abcd\n");
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"ab\ncd\n");
    assert_eq!(cursor(&st), (0, 1));
}

#[test]
fn delete_current_undo_reinserts_in_place() {
    let mut st = state_with(&["abc"]);
    st.set_cursor(1, 0);
    apply(&mut st, Action::DeleteCurrentChar);
    assert_eq!(buffer(&st), b"ac\n");
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"abc\n");
    assert_eq!(cursor(&st), (1, 0), "cursor back on the reinserted byte");
}

#[test]
fn cut_region_undo_reinserts_payload() {
    let mut st = state_with(&["abc", "def", "ghi"]);
    st.set_cursor(1, 0);
    apply(&mut st, Action::SetMark);
    st.set_cursor(2, 2);
    apply(&mut st, Action::CutRegion);
    assert_eq!(buffer(&st), b"ai\n");
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"abc\ndef\nghi\n");
    apply(&mut st, Action::Redo);
    assert_eq!(buffer(&st), b"ai\n");
    assert_eq!(cursor(&st), (1, 0));
}

#[test]
fn paste_undo_deletes_payload() {
    let mut st = state_with(&["ad"]);
    st.clipboard.set(b"b\nc");
    st.set_cursor(1, 0);
    apply(&mut st, Action::PasteClipboard);
    assert_eq!(buffer(&st), b"ab\ncd\n");
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"ad\n");
    assert_eq!(cursor(&st), (1, 0));
    apply(&mut st, Action::Redo);
    assert_eq!(buffer(&st), b"ab\ncd\n");
}

#[test]
fn open_line_undo_removes_the_new_row() {
    let mut st = state_with(&["  a", "b"]);
    apply(&mut st, Action::OpenLineBelow);
    assert_eq!(buffer(&st), b"  a\n  \nb\n");
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"  a\nb\n");
    assert_eq!(cursor(&st), (0, 0));
    apply(&mut st, Action::Redo);
    assert_eq!(buffer(&st), b"  a\n  \nb\n");
    assert_eq!(st.mode, core_state::Mode::Navigate, "redo does not re-enter insert");
}

#[test]
fn undo_at_oldest_reports_limit() {
    let mut st = state_with(&["a"]);
    apply(&mut st, Action::Undo);
    assert_eq!(st.cmdline.buf, "already at oldest change");

    apply(&mut st, Action::InsertChar(b'x'));
    apply(&mut st, Action::Undo);
    st.cmdline.buf.clear();
    apply(&mut st, Action::Undo);
    assert_eq!(st.cmdline.buf, "already at oldest change");
}

#[test]
fn redo_at_newest_reports_limit() {
    let mut st = state_with(&["a"]);
    apply(&mut st, Action::InsertChar(b'x'));
    apply(&mut st, Action::Redo);
    assert_eq!(st.cmdline.buf, "already at newest change");
}

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut st = state_with(&[]);
    apply(&mut st, Action::InsertChar(b'a'));
    apply(&mut st, Action::InsertChar(b'b'));
    apply(&mut st, Action::Undo);
    apply(&mut st, Action::InsertChar(b'c'));
    assert_eq!(buffer(&st), b"ac\n");
    st.cmdline.buf.clear();
    apply(&mut st, Action::Redo);
    assert_eq!(st.cmdline.buf, "already at newest change");
    // Undo now walks the new branch.
    apply(&mut st, Action::Undo);
    assert_eq!(buffer(&st), b"a\n");
}

#[test]
fn undo_to_oldest_clears_dirty() {
    let mut st = state_with(&["a"]);
    apply(&mut st, Action::InsertChar(b'x'));
    assert!(st.rows.dirty);
    apply(&mut st, Action::Undo);
    assert!(!st.rows.dirty);
}

#[test]
fn undo_then_redo_round_trips_a_typing_burst() {
    let mut st = state_with(&[]);
    for c in b"hi\nthere" {
        apply(&mut st, Action::InsertChar(*c));
    }
    let full = buffer(&st);
    let full_cursor = cursor(&st);
    for _ in 0..8 {
        apply(&mut st, Action::Undo);
    }
    assert_eq!(st.rows.numrows(), 0);
    for _ in 0..8 {
        apply(&mut st, Action::Redo);
    }
    assert_eq!(buffer(&st), full);
    assert_eq!(cursor(&st), full_cursor);
}
