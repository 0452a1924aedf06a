//! Key decoding on top of crossterm's event stream.
//!
//! The terminal collaborator owns escape-sequence decoding; this crate maps
//! its events onto the small [`Key`] alphabet the dispatcher understands.
//! Reads poll with a short timeout (one decisecond) so the controller loop
//! can service resizes without blocking indefinitely on input.

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use std::fmt;
use std::time::Duration;

/// Poll timeout for one read attempt.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Decoded input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    AltUp,
    AltDown,
    AltLeft,
    AltRight,
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    Unknown,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Ctrl(c) => write!(f, "ctrl-{c}"),
            Key::Alt(c) => write!(f, "alt-{c}"),
            Key::Enter => write!(f, "enter"),
            Key::Esc => write!(f, "esc"),
            Key::Backspace => write!(f, "backspace"),
            Key::Tab => write!(f, "tab"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::AltUp => write!(f, "alt-up"),
            Key::AltDown => write!(f, "alt-down"),
            Key::AltLeft => write!(f, "alt-left"),
            Key::AltRight => write!(f, "alt-right"),
            Key::Resize(..) => write!(f, "resize"),
            Key::Unknown => write!(f, "unknown"),
        }
    }
}

/// Map one crossterm key event. Release events and key codes outside the
/// editor's alphabet come back as `None` / `Unknown` respectively.
pub fn map_key_event(ev: &KeyEvent) -> Option<Key> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    let alt = ev.modifiers.contains(KeyModifiers::ALT);
    let ctrl = ev.modifiers.contains(KeyModifiers::CONTROL);
    let key = match ev.code {
        KeyCode::Char(c) if ctrl => Key::Ctrl(c),
        KeyCode::Char(c) if alt => Key::Alt(c),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up if alt => Key::AltUp,
        KeyCode::Down if alt => Key::AltDown,
        KeyCode::Left if alt => Key::AltLeft,
        KeyCode::Right if alt => Key::AltRight,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => Key::Unknown,
    };
    Some(key)
}

/// Poll for up to [`READ_TIMEOUT`]; `Ok(None)` when no event arrived. Events
/// that are not keys or resizes (focus, mouse) are swallowed.
pub fn read_key() -> Result<Option<Key>> {
    if !event::poll(READ_TIMEOUT)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(ev) => Ok(map_key_event(&ev)),
        Event::Resize(cols, rows) => Ok(Some(Key::Resize(cols, rows))),
        _ => Ok(None),
    }
}
