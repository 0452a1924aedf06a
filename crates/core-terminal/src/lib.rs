//! Terminal backend abstraction and crossterm implementation.
//!
//! The editor owns the terminal for its whole lifetime: raw mode plus the
//! alternate screen are entered once at startup and must be left on every
//! exit path, including errors and panics. `leave` is idempotent and also
//! runs from `Drop`, so an early `?` return cannot strand the user on a raw
//! alternate screen.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
    },
};
use std::io::stdout;

/// Rows reserved below the text area: status bar and command line.
pub const RESERVED_ROWS: u16 = 2;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal restoration even if the caller
/// early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that leaves on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}

/// Editable window size in character cells: `(text_rows, cols)`. The bottom
/// [`RESERVED_ROWS`] rows are subtracted for the status bar and command
/// line.
pub fn text_window_size() -> Result<(usize, usize)> {
    let (cols, rows) = size()?;
    Ok((rows.saturating_sub(RESERVED_ROWS) as usize, cols as usize))
}

/// Same subtraction applied to an already known terminal size (resize
/// events carry one).
pub fn text_rows_for(rows: u16) -> usize {
    rows.saturating_sub(RESERVED_ROWS) as usize
}
