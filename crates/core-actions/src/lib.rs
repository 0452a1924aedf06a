//! The action layer: every state mutation and cursor motion, the undo/redo
//! walker, search, the mode dispatcher, and file open/save.
//!
//! Actions are the only writers of `EditorState`. Mutating actions take a
//! `record` flag; when set, an undo record capturing the pre-action state is
//! appended before the mutation (the undo walker replays actions with
//! `record = false`). [`apply`] is the single entry point: it routes one
//! [`Action`], then re-establishes the cursor invariants, re-arms the
//! force-quit counter, and resets the selection highlight. The mini-line
//! search paths run outside `apply`, which is why a committed or
//! incremental search keeps its highlight while everything dispatched
//! through here clears it.

use core_state::{EditorState, FORCE_QUIT_PRESSES, Mode};
use tracing::debug;

pub mod dispatcher;
mod edit;
pub mod io_ops;
mod motion;
mod search;
mod undo;

pub use dispatcher::Dispatcher;
pub use search::{search_backward, search_forward};

/// Controller verdict after one dispatch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything a key can ask the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorLineBegin,
    CursorLineEnd,
    CursorForwardWord,
    CursorBackwardWord,
    CursorFirstRow,
    CursorLastRow,
    CursorPageUp,
    CursorPageDown,
    CursorNextPara,
    CursorPrevPara,
    ChangeModeToNavigate,
    ChangeModeToInsert,
    ChangeModeToCommand,
    ChangeModeToSearch,
    SetMark,
    CutRegion,
    InsertChar(u8),
    /// Newline with autoindent; the plain-byte path goes through
    /// `InsertChar(b'\n')`, which never autoindents.
    InsertNewline,
    InsertIndent,
    DeleteLeftChar,
    DeleteCurrentChar,
    PasteClipboard,
    OpenLineBelow,
    SaveFile,
    ExitEditor,
    ForceExitEditor,
    RepeatSearchForward,
    RepeatSearchBackward,
    Undo,
    Redo,
}

/// Route one action into the mutation layer.
///
/// The exit actions return before the epilogue: the force-quit countdown
/// must survive consecutive exit presses.
pub fn apply(state: &mut EditorState, action: Action) -> Flow {
    debug!(target: "dispatch", ?action, "apply");
    match action {
        Action::ExitEditor => return exit_editor(state),
        Action::ForceExitEditor => return Flow::Quit,
        _ => {}
    }

    match action {
        Action::CursorUp => motion::cursor_up(state),
        Action::CursorDown => motion::cursor_down(state),
        Action::CursorLeft => motion::cursor_left(state),
        Action::CursorRight => motion::cursor_right(state),
        Action::CursorLineBegin => motion::line_begin(state),
        Action::CursorLineEnd => motion::line_end(state),
        Action::CursorForwardWord => motion::forward_word(state),
        Action::CursorBackwardWord => motion::backward_word(state),
        Action::CursorFirstRow => motion::first_row(state),
        Action::CursorLastRow => motion::last_row(state),
        Action::CursorPageUp => motion::page_up(state),
        Action::CursorPageDown => motion::page_down(state),
        Action::CursorNextPara => motion::next_para(state),
        Action::CursorPrevPara => motion::prev_para(state),
        Action::ChangeModeToNavigate => state.change_mode(Mode::Navigate),
        Action::ChangeModeToInsert => state.change_mode(Mode::Insert),
        Action::ChangeModeToCommand => state.change_mode(Mode::Command),
        Action::ChangeModeToSearch => state.change_mode(Mode::Search),
        Action::SetMark => edit::set_mark(state),
        Action::CutRegion => edit::cut_region(state, true),
        Action::InsertChar(c) => edit::insert_char(state, true, c),
        Action::InsertNewline => edit::insert_newline(state, true, true),
        Action::InsertIndent => edit::insert_indent(state, true),
        Action::DeleteLeftChar => edit::delete_left(state, true),
        Action::DeleteCurrentChar => edit::delete_current(state, true),
        Action::PasteClipboard => edit::paste_clipboard(state, true),
        Action::OpenLineBelow => edit::open_line_below(state, true),
        Action::SaveFile => io_ops::save_file(state),
        Action::RepeatSearchForward => search::repeat_search(state, true),
        Action::RepeatSearchBackward => search::repeat_search(state, false),
        Action::Undo => undo::undo_or_redo(state, true),
        Action::Redo => undo::undo_or_redo(state, false),
        Action::ExitEditor | Action::ForceExitEditor => unreachable!(),
    }

    // Cursor invariants: cy within the row range, cx at most one past the
    // row end.
    if state.cy > state.rows.last_row_idx() {
        state.cy = state.rows.last_row_idx();
    }
    let rowlen = state.rows.row_len(state.cy);
    if state.cx > rowlen {
        state.cx = rowlen;
    }

    state.quit_times = FORCE_QUIT_PRESSES;
    state.reset_hlt();
    Flow::Continue
}

fn exit_editor(state: &mut EditorState) -> Flow {
    if state.rows.dirty && state.quit_times > 0 {
        state.set_error(format!(
            "File has unsaved changes: press [backtick] {} more times to quit",
            state.quit_times
        ));
        state.quit_times -= 1;
        Flow::Continue
    } else {
        Flow::Quit
    }
}
