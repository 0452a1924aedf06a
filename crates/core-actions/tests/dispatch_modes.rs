//! The mode machine: key routing, two-key sequences, mini-line editing,
//! and the quit guard.

mod common;

use common::{buffer, cursor, press, state_with, type_str};
use core_actions::{Dispatcher, Flow};
use core_input::Key;
use core_state::Mode;

#[test]
fn insert_mode_round_trip() {
    let mut st = state_with(&[]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('i'));
    assert_eq!(st.mode, Mode::Insert);
    type_str(&mut d, &mut st, "hi");
    press(&mut d, &mut st, Key::Esc);
    assert_eq!(st.mode, Mode::Navigate);
    assert_eq!(buffer(&st), b"hi\n");
}

#[test]
fn navigate_letters_are_not_inserted() {
    let mut st = state_with(&["abc"]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('l'));
    press(&mut d, &mut st, Key::Char('l'));
    assert_eq!(buffer(&st), b"abc\n");
    assert_eq!(cursor(&st), (2, 0));
}

#[test]
fn gg_two_key_sequence_jumps_to_first_row() {
    let mut st = state_with(&["a", "b", "c"]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('G'));
    assert_eq!(st.cy, 2);
    press(&mut d, &mut st, Key::Char('g'));
    assert_eq!(st.cy, 2, "first g is pending, no motion yet");
    press(&mut d, &mut st, Key::Char('g'));
    assert_eq!(st.cy, 0);
}

#[test]
fn pending_g_resets_on_other_keys() {
    let mut st = state_with(&["a", "b"]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('G'));
    press(&mut d, &mut st, Key::Char('g'));
    press(&mut d, &mut st, Key::Char('x'));
    assert!(st.cmdline.buf.contains("invalid key 'g x'"));
    // The sequence is consumed; a lone g starts a fresh one.
    press(&mut d, &mut st, Key::Char('g'));
    press(&mut d, &mut st, Key::Char('g'));
    assert_eq!(st.cy, 0);
}

#[test]
fn unknown_navigate_key_reports() {
    let mut st = state_with(&["a"]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('z'));
    assert_eq!(st.cmdline.buf, "invalid key 'z' in normal mode");
}

#[test]
fn nonprintable_insert_key_reports() {
    let mut st = state_with(&[]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('i'));
    press(&mut d, &mut st, Key::Ctrl('x'));
    assert_eq!(st.cmdline.buf, "non-printable key 'ctrl-x' in insert mode");
    assert_eq!(st.rows.numrows(), 0);
}

#[test]
fn command_mode_runs_buffer_on_enter() {
    let mut st = state_with(&["a"]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Alt('m'));
    assert_eq!(st.mode, Mode::Command);
    type_str(&mut d, &mut st, "bogus");
    let flow = press(&mut d, &mut st, Key::Enter);
    assert_eq!(flow, Flow::Continue);
    assert_eq!(st.mode, Mode::Navigate);
    assert_eq!(st.cmdline.buf, "unknown command 'bogus'");
}

#[test]
fn command_exit_quits_via_dispatch() {
    let mut st = state_with(&[]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Alt('m'));
    type_str(&mut d, &mut st, "exit");
    assert_eq!(press(&mut d, &mut st, Key::Enter), Flow::Quit);
}

#[test]
fn command_force_exit_ignores_dirty_buffer() {
    let mut st = state_with(&["a"]);
    st.rows.dirty = true;
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Alt('m'));
    type_str(&mut d, &mut st, "exit --force");
    assert_eq!(press(&mut d, &mut st, Key::Enter), Flow::Quit);
}

#[test]
fn miniline_editing_moves_and_deletes() {
    let mut st = state_with(&[]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Alt('m'));
    type_str(&mut d, &mut st, "abd");
    press(&mut d, &mut st, Key::Ctrl('h'));
    assert_eq!(st.cmdline.cmdx, 2);
    type_str(&mut d, &mut st, "c");
    assert_eq!(st.cmdline.buf, "abcd");
    press(&mut d, &mut st, Key::AltLeft);
    assert_eq!(st.cmdline.cmdx, 0);
    press(&mut d, &mut st, Key::AltRight);
    assert_eq!(st.cmdline.cmdx, 4);
    press(&mut d, &mut st, Key::Backspace);
    assert_eq!(st.cmdline.buf, "abc");
    assert_eq!(st.cmdline.cmdx, 3);
}

#[test]
fn backspace_on_empty_miniline_leaves_mode() {
    let mut st = state_with(&[]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('/'));
    assert_eq!(st.mode, Mode::Search);
    press(&mut d, &mut st, Key::Backspace);
    assert_eq!(st.mode, Mode::Navigate);
}

#[test]
fn esc_cancels_miniline() {
    let mut st = state_with(&[]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Alt('m'));
    type_str(&mut d, &mut st, "exit");
    press(&mut d, &mut st, Key::Esc);
    assert_eq!(st.mode, Mode::Navigate);
    assert_eq!(st.cmdline.buf, "", "cancelled buffer is not kept");
}

#[test]
fn backtick_quit_guard_counts_down_then_quits() {
    let mut st = state_with(&["a"]);
    st.rows.dirty = true;
    let mut d = Dispatcher::new();
    assert_eq!(press(&mut d, &mut st, Key::Char('`')), Flow::Continue);
    assert!(st.cmdline.buf.contains("2 more times"));
    assert_eq!(press(&mut d, &mut st, Key::Char('`')), Flow::Continue);
    assert!(st.cmdline.buf.contains("1 more times"));
    assert_eq!(press(&mut d, &mut st, Key::Char('`')), Flow::Quit);
}

#[test]
fn clean_buffer_quits_immediately() {
    let mut st = state_with(&["a"]);
    let mut d = Dispatcher::new();
    assert_eq!(press(&mut d, &mut st, Key::Char('`')), Flow::Quit);
}

#[test]
fn motion_between_exit_presses_rearms_the_guard() {
    let mut st = state_with(&["ab"]);
    st.rows.dirty = true;
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('`'));
    press(&mut d, &mut st, Key::Char('l'));
    press(&mut d, &mut st, Key::Char('`'));
    assert!(st.cmdline.buf.contains("2 more times"));
}

#[test]
fn arrow_keys_move_in_insert_mode() {
    let mut st = state_with(&["abc"]);
    let mut d = Dispatcher::new();
    press(&mut d, &mut st, Key::Char('i'));
    press(&mut d, &mut st, Key::Right);
    press(&mut d, &mut st, Key::Right);
    type_str(&mut d, &mut st, "X");
    assert_eq!(buffer(&st), b"abXc\n");
}
