//! The mode machine: routes decoded keys to actions, or to the mini-line
//! editor when Command or Search mode owns input.
//!
//! The only dispatcher-local state is the pending `g` of the two-key
//! `g g` sequence; everything else reads and writes `EditorState`. Keys
//! with no binding surface a command-line error instead of being dropped
//! silently.

use crate::{Action, Flow, apply, search};
use core_input::Key;
use core_state::{EditorState, Mode};

pub mod command;

/// Key router. One instance lives for the whole session.
#[derive(Default)]
pub struct Dispatcher {
    pending_g: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one key according to the active mode.
    pub fn dispatch(&mut self, state: &mut EditorState, key: Key) -> Flow {
        match state.mode {
            Mode::Navigate => self.navigate_key(state, key),
            Mode::Insert => insert_key(state, key),
            Mode::Command | Mode::Search => miniline_key(state, key),
        }
    }

    fn navigate_key(&mut self, state: &mut EditorState, key: Key) -> Flow {
        if self.pending_g {
            self.pending_g = false;
            match key {
                Key::Char('g') => return apply(state, Action::CursorFirstRow),
                Key::Esc => return Flow::Continue,
                _ => {
                    state.set_error(format!("invalid key 'g {key}' in normal mode"));
                    return Flow::Continue;
                }
            }
        }

        let action = match key {
            Key::Char('i') => Action::ChangeModeToInsert,
            Key::Char('w') => Action::DeleteCurrentChar,
            Key::Char('`') => Action::ExitEditor,
            Key::Char('U') => Action::CursorPageUp,
            Key::Char('M') => Action::CursorPageDown,
            Key::Char('a') => Action::CursorLineBegin,
            Key::Char(';') => Action::CursorLineEnd,
            Key::Left | Key::Char('h') => Action::CursorLeft,
            Key::Down | Key::Char('j') => Action::CursorDown,
            Key::Up | Key::Char('k') => Action::CursorUp,
            Key::Right | Key::Char('l') => Action::CursorRight,
            Key::Char('o') => Action::CursorForwardWord,
            Key::Char('n') => Action::CursorBackwardWord,
            Key::Char('u') => Action::CursorPrevPara,
            Key::Char('m') => Action::CursorNextPara,
            Key::Char(',') => Action::OpenLineBelow,
            Key::Char('d') => Action::SetMark,
            Key::Char('f') => Action::CutRegion,
            Key::Char('c') => Action::PasteClipboard,
            Key::Char('b') => Action::RepeatSearchForward,
            Key::Char('B') => Action::RepeatSearchBackward,
            Key::Char('G') => Action::CursorLastRow,
            Key::Char('e') => Action::Undo,
            Key::Char('E') => Action::Redo,
            Key::Alt('m') => Action::ChangeModeToCommand,
            Key::Alt('s') => Action::SaveFile,
            Key::Char('/') => Action::ChangeModeToSearch,
            Key::Char('g') => {
                self.pending_g = true;
                return Flow::Continue;
            }
            Key::Backspace | Key::Enter | Key::Esc => return Flow::Continue,
            _ => {
                state.set_error(format!("invalid key '{key}' in normal mode"));
                return Flow::Continue;
            }
        };
        apply(state, action)
    }
}

fn is_printable(c: char) -> bool {
    c.is_ascii() && (' '..='~').contains(&c)
}

fn insert_key(state: &mut EditorState, key: Key) -> Flow {
    let action = match key {
        Key::Backspace => Action::DeleteLeftChar,
        Key::Enter => Action::InsertNewline,
        Key::Tab => Action::InsertIndent,
        Key::Left => Action::CursorLeft,
        Key::Down => Action::CursorDown,
        Key::Up => Action::CursorUp,
        Key::Right => Action::CursorRight,
        Key::Esc => Action::ChangeModeToNavigate,
        Key::Char(c) if is_printable(c) => Action::InsertChar(c as u8),
        _ => {
            state.set_error(format!("non-printable key '{key}' in insert mode"));
            return Flow::Continue;
        }
    };
    apply(state, action)
}

/// Command/Search share one single-line editor; Enter decides what the
/// accumulated buffer means. In Search mode every buffer mutation re-runs
/// the search from the current cursor without moving it, so the highlight
/// tracks incremental typing.
fn miniline_key(state: &mut EditorState, key: Key) -> Flow {
    match key {
        Key::Enter => {
            let text = state.cmdline.buf.clone();
            let mode = state.mode;
            apply(state, Action::ChangeModeToNavigate);
            if mode == Mode::Command {
                return command::run(state, &text);
            }
            state.search_default = text.clone();
            search::search_forward(state, &text, true);
        }
        Key::Backspace => {
            if state.cmdline.cmdx > 0 {
                state.cmdline.buf.remove(state.cmdline.cmdx - 1);
                state.cmdline.cmdx -= 1;
                rerun_search(state);
            } else if state.cmdline.buf.is_empty() {
                return apply(state, Action::ChangeModeToNavigate);
            }
        }
        Key::Ctrl('h') => {
            if state.cmdline.cmdx > 0 {
                state.cmdline.cmdx -= 1;
            }
        }
        Key::Ctrl('l') => {
            if state.cmdline.cmdx < state.cmdline.buf.len() {
                state.cmdline.cmdx += 1;
            }
        }
        Key::AltLeft => state.cmdline.cmdx = 0,
        Key::AltRight => state.cmdline.cmdx = state.cmdline.buf.len(),
        Key::Esc => return apply(state, Action::ChangeModeToNavigate),
        Key::Char(c) if is_printable(c) => {
            state.cmdline.buf.insert(state.cmdline.cmdx, c);
            state.cmdline.cmdx += 1;
            rerun_search(state);
        }
        _ => {}
    }
    Flow::Continue
}

fn rerun_search(state: &mut EditorState) {
    if state.mode == Mode::Search {
        let query = state.cmdline.buf.clone();
        search::search_forward(state, &query, false);
    }
}
