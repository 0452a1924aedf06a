//! Row storage and tab-expansion geometry.
//!
//! A [`Row`] owns the logical byte content of one line plus its rendered
//! (tab-expanded) form and a highlight tag per rendered byte. The rendered
//! form and tags are rebuilt on every mutation so the invariants
//! `render == expand(data)` and `hl.len() == render.len()` hold at all times.
//!
//! Columns come in two coordinate systems: `cx` indexes logical bytes,
//! `rx` indexes rendered cells. [`Row::cx_to_rx`] and [`Row::rx_to_cx`]
//! convert between them; a mid-tab `rx` resolves to the `cx` of the tab
//! itself, so `rx_to_cx(cx_to_rx(cx)) == cx` for every valid `cx`.

use core_syntax::{Highlight, Syntax, highlight_row};

/// Tab stop width in rendered cells.
pub const TAB_STOP: usize = 4;

/// One editable line: logical bytes, rendered bytes, per-rendered-byte tags.
/// No newline bytes are ever stored.
pub struct Row {
    data: Vec<u8>,
    render: Vec<u8>,
    hl: Vec<Highlight>,
}

impl Row {
    fn new(data: Vec<u8>, syn: Option<&Syntax>) -> Self {
        let mut row = Self {
            data,
            render: Vec::new(),
            hl: Vec::new(),
        };
        row.update(syn);
        row
    }

    /// Logical byte length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    pub fn hl(&self) -> &[Highlight] {
        &self.hl
    }

    /// Rebuild the rendered form and tag array from the logical content.
    fn update(&mut self, syn: Option<&Syntax>) {
        self.render.clear();
        for &c in &self.data {
            if c == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_STOP != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(c);
            }
        }
        self.hl = highlight_row(&self.render, syn);
    }

    fn rehighlight(&mut self, syn: Option<&Syntax>) {
        self.hl = highlight_row(&self.render, syn);
    }

    /// Rendered column for logical column `cx`.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &c in self.data.iter().take(cx) {
            if c == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Logical column whose rendered span covers `rx`. A mid-tab `rx` maps to
    /// the tab's own `cx`; an `rx` past the row end maps to `len()`.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &c) in self.data.iter().enumerate() {
            if c == b'\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.data.len()
    }

    /// Indent width of the leading whitespace in rendered-ish units: each tab
    /// counts as `TAB_STOP`, each space as 1.
    pub fn indent_col(&self) -> usize {
        let mut indent = 0;
        for &c in &self.data {
            match c {
                b'\t' => indent += TAB_STOP,
                b' ' => indent += 1,
                _ => break,
            }
        }
        indent
    }

    /// True when the row holds only tabs and spaces (or nothing).
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&c| c == b'\t' || c == b' ')
    }
}

/// Ordered, densely indexed sequence of rows plus the active language
/// descriptor and the buffer-level dirty flag.
pub struct RowStore {
    rows: Vec<Row>,
    syntax: Option<&'static Syntax>,
    pub dirty: bool,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RowStore {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            syntax: None,
            dirty: false,
        }
    }

    pub fn numrows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the last row; 0 when the store is empty (callers guard with
    /// [`RowStore::is_empty`] where the distinction matters).
    pub fn last_row_idx(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    /// Rendered column of `(cx, y)`; 0 when the row does not exist.
    pub fn cx_to_rx(&self, y: usize, cx: usize) -> usize {
        self.rows.get(y).map_or(0, |r| r.cx_to_rx(cx))
    }

    /// Logical column of `(rx, y)`; 0 when the row does not exist.
    pub fn rx_to_cx(&self, y: usize, rx: usize) -> usize {
        self.rows.get(y).map_or(0, |r| r.rx_to_cx(rx))
    }

    pub fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// Switch the language descriptor and re-lex every row. Does not touch
    /// the dirty flag: content is unchanged.
    pub fn set_syntax(&mut self, syn: Option<&'static Syntax>) {
        self.syntax = syn;
        for row in &mut self.rows {
            row.rehighlight(syn);
        }
    }

    /// Insert a row at `at` (clamped: out-of-range is a no-op).
    pub fn insert_row(&mut self, at: usize, data: Vec<u8>) {
        if at > self.rows.len() {
            return;
        }
        let row = Row::new(data, self.syntax);
        self.rows.insert(at, row);
        self.dirty = true;
    }

    /// Remove and return the logical data of row `at`; empty on out-of-range.
    pub fn delete_row(&mut self, at: usize) -> Vec<u8> {
        if at >= self.rows.len() {
            return Vec::new();
        }
        let row = self.rows.remove(at);
        self.dirty = true;
        row.data
    }

    /// Insert one byte into row `y` at logical column `at` (clamped to the
    /// row end).
    pub fn row_insert_byte(&mut self, y: usize, at: usize, c: u8) {
        let syn = self.syntax;
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let at = at.min(row.data.len());
        row.data.insert(at, c);
        row.update(syn);
        self.dirty = true;
    }

    /// Insert a byte string into row `y` at `at` (clamped).
    pub fn row_insert_bytes(&mut self, y: usize, at: usize, s: &[u8]) {
        let syn = self.syntax;
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let at = at.min(row.data.len());
        row.data.splice(at..at, s.iter().copied());
        row.update(syn);
        self.dirty = true;
    }

    /// Remove `len` bytes of row `y` starting at `at`, returning the removed
    /// slice. Out-of-range or zero-length requests remove nothing.
    pub fn row_delete_range(&mut self, y: usize, at: usize, len: usize) -> Vec<u8> {
        let syn = self.syntax;
        let Some(row) = self.rows.get_mut(y) else {
            return Vec::new();
        };
        if len == 0 || at + len > row.data.len() {
            return Vec::new();
        }
        let removed: Vec<u8> = row.data.drain(at..at + len).collect();
        row.update(syn);
        self.dirty = true;
        removed
    }

    /// Append a byte string to row `y`.
    pub fn row_append_bytes(&mut self, y: usize, s: &[u8]) {
        let syn = self.syntax;
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        row.data.extend_from_slice(s);
        row.update(syn);
        self.dirty = true;
    }

    /// Byte at `(x, y)`: the content byte, `\n` one past the row end, NUL for
    /// a missing row. Backs the word/paragraph motion predicates.
    pub fn get_char(&self, x: usize, y: usize) -> u8 {
        let Some(row) = self.rows.get(y) else {
            return 0;
        };
        if x >= row.data.len() {
            b'\n'
        } else {
            row.data[x]
        }
    }

    /// Full buffer contents: rows joined and terminated by `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for row in &self.rows {
            out.extend_from_slice(&row.data);
            out.push(b'\n');
        }
        out
    }

    /// Strip trailing tabs and spaces from every row, keeping the rendered
    /// form in sync.
    pub fn trim_trailing_ws(&mut self) {
        let syn = self.syntax;
        for row in &mut self.rows {
            let keep = row
                .data
                .iter()
                .rposition(|&c| !c.is_ascii_whitespace())
                .map_or(0, |p| p + 1);
            if keep < row.data.len() {
                row.data.truncate(keep);
                row.update(syn);
                self.dirty = true;
            }
        }
    }
}
