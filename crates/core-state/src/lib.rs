//! Editor state: buffer, cursor/mark geometry, viewport, mode, mini-line,
//! undo history, and the clipboard handle.
//!
//! The cursor, the mark, and the selection highlight are three independent
//! position pairs with distinct lifetimes: the cursor moves on every action,
//! the mark persists until it is explicitly reset, and the highlight is
//! scoped per-action (any action that does not set it clears it). They all
//! live here, in a single state record, so the action layer can keep them
//! consistent in one place.

use core_text::RowStore;
use std::path::PathBuf;

pub mod clipboard;
pub mod undo;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use undo::{UndoKind, UndoLog, UndoRecord};

/// Presses of the exit key required to discard unsaved changes.
pub const FORCE_QUIT_PRESSES: u32 = 2;

/// Scroll margin: cells of context kept around the cursor while scrolling.
pub const SCROLL_MARGIN: usize = 5;

/// Active input mode; selects the dispatcher branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Insert,
    Command,
    Search,
}

/// Style of the transient command-line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdlineStyle {
    Info,
    Error,
}

/// Single-line editor used by Command and Search modes. The same buffer
/// doubles as the transient message area while neither mode is active.
#[derive(Default)]
pub struct Cmdline {
    pub buf: String,
    pub cmdx: usize,
    pub cmdoff: usize,
    pub style: CmdlineStyle,
}

impl Default for CmdlineStyle {
    fn default() -> Self {
        Self::Info
    }
}

impl Cmdline {
    pub fn clear(&mut self) {
        self.buf.clear();
        self.style = CmdlineStyle::Info;
        self.cmdx = 0;
        self.cmdoff = 0;
    }
}

/// Selection-highlight span in rendered coordinates, half-open on the end
/// column. Sourced from search hits; reset by any action that does not set
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub sx: usize,
    pub sy: usize,
    pub ex: usize,
    pub ey: usize,
}

/// Process-wide editor state record.
pub struct EditorState {
    pub rows: RowStore,

    /// Cursor in logical coordinates; `rx` is its rendered column, refreshed
    /// before scrolling. `tx` is the sticky rendered column vertical motion
    /// aims for.
    pub cx: usize,
    pub cy: usize,
    pub rx: usize,
    pub tx: usize,

    /// Mark position, the other end of the cut region.
    pub mx: usize,
    pub my: usize,

    /// Viewport anchor and size in character cells. `screenrows` counts text
    /// rows only; the status bar and command line sit below them.
    pub rowoff: usize,
    pub coloff: usize,
    pub screenrows: usize,
    pub screencols: usize,

    pub mode: Mode,
    pub path: Option<PathBuf>,
    pub cmdline: Cmdline,
    pub hlt: Option<Span>,
    pub undo: UndoLog,
    pub quit_times: u32,
    pub search_default: String,
    pub indent_as_spaces: bool,
    pub clipboard: Box<dyn Clipboard>,
}

impl EditorState {
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            rows: RowStore::new(),
            cx: 0,
            cy: 0,
            rx: 0,
            tx: 0,
            mx: 0,
            my: 0,
            rowoff: 0,
            coloff: 0,
            screenrows: 0,
            screencols: 0,
            mode: Mode::Navigate,
            path: None,
            cmdline: Cmdline::default(),
            hlt: None,
            undo: UndoLog::new(),
            quit_times: FORCE_QUIT_PRESSES,
            search_default: String::new(),
            indent_as_spaces: true,
            clipboard,
        }
    }

    pub fn set_screen_size(&mut self, rows: usize, cols: usize) {
        self.screenrows = rows;
        self.screencols = cols;
    }

    /// Move the cursor horizontally (or to an absolute position): updates
    /// `(cx, cy)` and resets the sticky column from the new position.
    pub fn set_cursor(&mut self, cx: usize, cy: usize) {
        self.cx = cx;
        self.cy = cy;
        self.tx = self.rows.cx_to_rx(cy, cx);
    }

    /// Byte under the cursor (`\n` at end of row, NUL past the last row).
    pub fn char_at_cursor(&self) -> u8 {
        self.rows.get_char(self.cx, self.cy)
    }

    /// Byte immediately left of the cursor, treating the end of the previous
    /// row as `\n`; NUL at the very start of the buffer.
    pub fn char_left_of_cursor(&self) -> u8 {
        if self.cx == 0 && self.cy == 0 {
            return 0;
        }
        if self.cx == 0 {
            let y = self.cy - 1;
            self.rows.get_char(self.rows.row_len(y), y)
        } else {
            self.rows.get_char(self.cx - 1, self.cy)
        }
    }

    /// True at (or past) the last position of the buffer.
    pub fn cursor_at_end(&self) -> bool {
        if self.rows.is_empty() {
            return true;
        }
        self.cy == self.rows.last_row_idx() && self.cx >= self.rows.row_len(self.cy)
    }

    pub fn reset_hlt(&mut self) {
        self.hlt = None;
    }

    /// Recompute the rendered cursor column. Past the last row `rx` is 0.
    pub fn update_rx(&mut self) {
        self.rx = if self.cy < self.rows.numrows() {
            self.rows.cx_to_rx(self.cy, self.cx)
        } else {
            0
        };
    }

    /// Shift the viewport offsets so `(x, y)` (rendered coordinates) stays
    /// inside the visible window with `SCROLL_MARGIN` cells of context.
    pub fn scroll_to(&mut self, x: usize, y: usize) {
        let vrows = self.screenrows.saturating_sub(SCROLL_MARGIN);
        let vcols = self.screencols.saturating_sub(SCROLL_MARGIN);
        if y < self.rowoff {
            self.rowoff = y;
        }
        if y >= self.rowoff + vrows {
            self.rowoff = (y + 1).saturating_sub(vrows);
        }
        if x < self.coloff {
            self.coloff = x;
        }
        if x >= self.coloff + vcols {
            self.coloff = (x + 1).saturating_sub(vcols);
        }
    }

    /// Keep the mini-line cursor visible within its single scrolling axis.
    pub fn scroll_cmdline(&mut self) {
        let width = self.screencols.saturating_sub(1);
        if self.cmdline.cmdx < self.cmdline.cmdoff {
            self.cmdline.cmdoff = self.cmdline.cmdx;
        }
        if self.cmdline.cmdx >= self.cmdline.cmdoff + width {
            self.cmdline.cmdoff = (self.cmdline.cmdx + 1).saturating_sub(width);
        }
    }

    /// Switch mode, clearing the mini-line buffer and message styling.
    pub fn change_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.cmdline.clear();
    }

    fn miniline_active(&self) -> bool {
        matches!(self.mode, Mode::Command | Mode::Search)
    }

    /// Surface a transient info message. Suppressed while the mini-line owns
    /// the command-line row.
    pub fn set_msg(&mut self, msg: impl Into<String>) {
        if !self.miniline_active() {
            self.cmdline.buf = msg.into();
            self.cmdline.style = CmdlineStyle::Info;
        }
    }

    /// Surface a transient error-styled message.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        if !self.miniline_active() {
            self.cmdline.buf = msg.into();
            self.cmdline.style = CmdlineStyle::Error;
        }
    }
}
