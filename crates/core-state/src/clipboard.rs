//! Clipboard bridge: `set`/`get` over byte strings.
//!
//! The system implementation delegates to `arboard` and is acquired
//! best-effort: clipboard access can fail in headless or unusual terminal
//! environments, in which case every `get` reports empty. An in-memory
//! implementation backs tests and doubles as a fallback register.

use tracing::warn;

/// Process-wide clipboard handle, acquired once at startup.
pub trait Clipboard {
    fn set(&mut self, bytes: &[u8]);
    /// Current clipboard contents; `None` when empty or unavailable.
    fn get(&mut self) -> Option<Vec<u8>>;
}

/// System clipboard via `arboard`.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(cb) => Some(cb),
            Err(e) => {
                warn!(target: "clipboard", ?e, "clipboard_unavailable");
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn set(&mut self, bytes: &[u8]) {
        if let Some(cb) = &mut self.inner {
            let text = String::from_utf8_lossy(bytes).into_owned();
            if let Err(e) = cb.set_text(text) {
                warn!(target: "clipboard", ?e, "clipboard_set_failed");
            }
        }
    }

    fn get(&mut self) -> Option<Vec<u8>> {
        let cb = self.inner.as_mut()?;
        match cb.get_text() {
            Ok(text) if !text.is_empty() => Some(text.into_bytes()),
            _ => None,
        }
    }
}

/// In-process clipboard used by tests.
#[derive(Default)]
pub struct MemoryClipboard {
    data: Option<Vec<u8>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn set(&mut self, bytes: &[u8]) {
        self.data = Some(bytes.to_vec());
    }

    fn get(&mut self) -> Option<Vec<u8>> {
        self.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_round_trip() {
        let mut cb = MemoryClipboard::new();
        assert!(cb.get().is_none());
        cb.set(b"abc\ndef");
        assert_eq!(cb.get().as_deref(), Some(&b"abc\ndef"[..]));
        // get() is non-destructive
        assert_eq!(cb.get().as_deref(), Some(&b"abc\ndef"[..]));
    }
}
