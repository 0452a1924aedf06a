//! Frame composition: turns editor state into one terminal byte stream.
//!
//! Every frame is queued into a scratch buffer (text rows, status bar,
//! command line, final cursor placement) and handed back for a single
//! write, so the terminal never sees a partially drawn screen. Cursor and
//! clear sequences go through crossterm's queued commands; colors are
//! emitted as literal SGR strings because the palette is part of the wire
//! contract (`44` for the selection background, `1;38;5;63` for keywords,
//! and so on), and row text is written as raw bytes since buffer content
//! is not guaranteed UTF-8.

use anyhow::Result;
use core_state::{CmdlineStyle, EditorState, Mode};
use core_syntax::Highlight;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Banner shown on an empty buffer.
const WELCOME: &str = "hew editor -- modal editing for one file";

/// SGR color parameters for a highlight tag. `Normal` is handled by a full
/// attribute reset instead.
fn hl_sgr(hl: Highlight) -> &'static str {
    match hl {
        Highlight::Number | Highlight::Str | Highlight::Const => "35",
        Highlight::Comment => "38;5;248",
        Highlight::Keyword | Highlight::Type => "1;38;5;63",
        Highlight::Normal => "37",
    }
}

fn sgr(buf: &mut Vec<u8>, params: &str) -> Result<()> {
    buf.write_all(b"\x1b[")?;
    buf.write_all(params.as_bytes())?;
    buf.write_all(b"m")?;
    Ok(())
}

/// Composes frames into an owned scratch buffer reused across frames.
#[derive(Default)]
pub struct Renderer {
    buf: Vec<u8>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(5 * 1024),
        }
    }

    /// Compose one frame. Reconciles scrolling first, clears any transient
    /// message after drawing it, and returns the bytes for a single write.
    pub fn render(&mut self, state: &mut EditorState) -> Result<&[u8]> {
        let miniline = matches!(state.mode, Mode::Command | Mode::Search);
        if !miniline {
            state.update_rx();
            state.scroll_to(state.rx, state.cy);
        }
        state.scroll_cmdline();

        self.buf.clear();
        queue!(self.buf, Hide, MoveTo(0, 0))?;

        draw_rows(&mut self.buf, state)?;
        draw_status_bar(&mut self.buf, state)?;
        draw_cmdline(&mut self.buf, state)?;

        if miniline {
            // Two rows below the text area: past the status bar, on the
            // command line, one cell right of the prompt character.
            let col = state.cmdline.cmdx - state.cmdline.cmdoff + 1;
            queue!(self.buf, MoveTo(col as u16, state.screenrows as u16 + 1))?;
        } else {
            let col = state.rx - state.coloff;
            let row = state.cy - state.rowoff;
            queue!(self.buf, MoveTo(col as u16, row as u16))?;
        }
        queue!(self.buf, Show)?;

        Ok(&self.buf)
    }
}

fn draw_rows(buf: &mut Vec<u8>, state: &EditorState) -> Result<()> {
    for y in 0..state.screenrows {
        let filerow = y + state.rowoff;
        queue!(buf, Clear(ClearType::UntilNewLine))?;

        if filerow >= state.rows.numrows() {
            if state.rows.is_empty() && y == state.screenrows / 3 {
                draw_welcome(buf, state.screencols)?;
            } else {
                buf.write_all(b"~")?;
            }
        } else {
            draw_file_row(buf, state, filerow)?;
        }

        if y < state.screenrows.saturating_sub(1) {
            buf.write_all(b"\r\n")?;
        }
    }
    Ok(())
}

fn draw_welcome(buf: &mut Vec<u8>, screencols: usize) -> Result<()> {
    let text = &WELCOME[..WELCOME.len().min(screencols)];
    let mut padding = (screencols - text.len()) / 2;
    if padding > 0 {
        buf.write_all(b"~")?;
        padding -= 1;
    }
    for _ in 0..padding {
        buf.write_all(b" ")?;
    }
    buf.write_all(text.as_bytes())?;
    Ok(())
}

fn draw_file_row(buf: &mut Vec<u8>, state: &EditorState, filerow: usize) -> Result<()> {
    let row = match state.rows.row(filerow) {
        Some(r) => r,
        None => return Ok(()),
    };
    let render = row.render();
    let hl = row.hl();
    let start = state.coloff.min(render.len());
    let end = (state.coloff + state.screencols).min(render.len());
    let visible = end - start;

    // The active color run; `None` means default attributes.
    let mut current: Option<Highlight> = None;

    // One step past the last visible byte, so a selection ending exactly at
    // the right edge still gets its closing toggle.
    for i in 0..=visible {
        let filei = i + start;
        if let Some(span) = state.hlt {
            if filerow == span.sy && filei == span.sx {
                sgr(buf, "44")?;
            }
            if filerow == span.ey && filei == span.ex {
                sgr(buf, "49")?;
            }
        }
        if i == visible {
            break;
        }

        let c = render[start + i];
        let tag = hl[start + i];
        if c.is_ascii_control() {
            // Caret notation in inverse video; re-assert the active color
            // afterwards since the reset wiped it.
            let sym = if c <= 26 { b'@' + c } else { b'?' };
            sgr(buf, "7")?;
            buf.write_all(&[sym])?;
            sgr(buf, "")?;
            if let Some(active) = current {
                sgr(buf, hl_sgr(active))?;
            }
        } else if tag == Highlight::Normal {
            if current.is_some() {
                sgr(buf, "0")?;
                current = None;
            }
            buf.write_all(&[c])?;
        } else {
            if current != Some(tag) {
                current = Some(tag);
                sgr(buf, hl_sgr(tag))?;
            }
            buf.write_all(&[c])?;
        }
    }
    sgr(buf, "39")?;
    Ok(())
}

fn draw_status_bar(buf: &mut Vec<u8>, state: &EditorState) -> Result<()> {
    buf.write_all(b"\r\n")?;
    if state.mode == Mode::Insert {
        sgr(buf, "1;47;30")?;
    } else {
        sgr(buf, "1;44;30")?;
    }

    let path = state
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "[No name]".to_string());
    let lstatus = format!(
        "[{}{}] {}",
        if state.rows.dirty { '*' } else { '-' },
        if state.mode == Mode::Insert { 'I' } else { 'N' },
        path
    );
    let rstatus = format!(
        "{} {}/{} ",
        state.rows.syntax().map_or("none", |s| s.name),
        state.cy + 1,
        state.rows.numrows()
    );

    let mut llen = lstatus.len().min(state.screencols);
    buf.write_all(&lstatus.as_bytes()[..llen])?;
    while llen < state.screencols {
        if state.screencols - llen == rstatus.len() {
            buf.write_all(rstatus.as_bytes())?;
            break;
        }
        buf.write_all(b" ")?;
        llen += 1;
    }

    sgr(buf, "")?;
    Ok(())
}

fn draw_cmdline(buf: &mut Vec<u8>, state: &mut EditorState) -> Result<()> {
    buf.write_all(b"\r\n")?;
    queue!(buf, Clear(ClearType::UntilNewLine))?;

    match state.mode {
        Mode::Command | Mode::Search => {
            let prefix: &[u8] = if state.mode == Mode::Command { b":" } else { b"/" };
            buf.write_all(prefix)?;
            let text = state.cmdline.buf.as_bytes();
            let from = state.cmdline.cmdoff.min(text.len());
            let take = text.len().min(state.screencols.saturating_sub(1));
            let take = take.min(text.len() - from);
            buf.write_all(&text[from..from + take])?;
        }
        _ => {
            // Transient message: drawn once, then cleared so the next
            // action starts from a blank command line.
            let error = state.cmdline.style == CmdlineStyle::Error;
            if error {
                sgr(buf, "41;37")?;
            }
            let text = state.cmdline.buf.as_bytes();
            let take = text.len().min(state.screencols);
            buf.write_all(&text[..take])?;
            if error {
                sgr(buf, "0")?;
            }
            state.cmdline.buf.clear();
            state.cmdline.style = CmdlineStyle::Info;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::{MemoryClipboard, Span};

    fn state_with(lines: &[&str]) -> EditorState {
        let mut st = EditorState::new(Box::new(MemoryClipboard::new()));
        for (i, line) in lines.iter().enumerate() {
            st.rows.insert_row(i, line.as_bytes().to_vec());
        }
        st.rows.dirty = false;
        st.set_screen_size(10, 40);
        st
    }

    fn render_lossy(st: &mut EditorState) -> String {
        let mut r = Renderer::new();
        let bytes = r.render(st).unwrap().to_vec();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn empty_buffer_draws_banner_and_fringe() {
        let mut st = state_with(&[]);
        let frame = render_lossy(&mut st);
        assert!(frame.contains("hew editor"));
        assert!(frame.contains('~'));
    }

    #[test]
    fn file_rows_replace_fringe() {
        let mut st = state_with(&["hello"]);
        let frame = render_lossy(&mut st);
        assert!(frame.contains("hello"));
        assert!(!frame.contains("hew editor"));
    }

    #[test]
    fn frame_hides_then_shows_cursor() {
        let mut st = state_with(&["x"]);
        let frame = render_lossy(&mut st);
        assert!(frame.starts_with("\x1b[?25l"));
        assert!(frame.ends_with("\x1b[?25h"));
    }

    #[test]
    fn rows_are_cleared_to_eol() {
        let mut st = state_with(&["x"]);
        let frame = render_lossy(&mut st);
        assert!(frame.matches("\x1b[K").count() >= st.screenrows);
    }

    #[test]
    fn status_bar_shows_mode_dirty_and_counts() {
        let mut st = state_with(&["a", "b", "c"]);
        let frame = render_lossy(&mut st);
        assert!(frame.contains("[-N] [No name]"));
        assert!(frame.contains("none 1/3 "));
        assert!(frame.contains("\x1b[1;44;30m"));

        st.rows.dirty = true;
        st.mode = Mode::Insert;
        let frame = render_lossy(&mut st);
        assert!(frame.contains("[*I] [No name]"));
        assert!(frame.contains("\x1b[1;47;30m"));
    }

    #[test]
    fn cursor_position_sequence_tracks_cursor() {
        let mut st = state_with(&["abc", "def"]);
        st.set_cursor(2, 1);
        let frame = render_lossy(&mut st);
        // Row 2, col 3 in 1-based terminal coordinates.
        assert!(frame.ends_with("\x1b[2;3H\x1b[?25h"));
    }

    #[test]
    fn rendered_column_drives_cursor_placement_through_tabs() {
        let mut st = state_with(&["\tx"]);
        st.set_cursor(1, 0);
        let frame = render_lossy(&mut st);
        // cx 1 sits at rendered cell 4 -> terminal column 5.
        assert!(frame.ends_with("\x1b[1;5H\x1b[?25h"));
    }

    #[test]
    fn miniline_cursor_sits_on_command_row() {
        let mut st = state_with(&["abc"]);
        st.change_mode(Mode::Command);
        st.cmdline.buf.push_str("exit");
        st.cmdline.cmdx = 4;
        let frame = render_lossy(&mut st);
        assert!(frame.contains(":exit"));
        // screenrows 10 -> command line is terminal row 12; col = 4+2.
        assert!(frame.ends_with("\x1b[12;6H\x1b[?25h"));
    }

    #[test]
    fn search_prompt_uses_slash() {
        let mut st = state_with(&["abc"]);
        st.change_mode(Mode::Search);
        st.cmdline.buf.push_str("ab");
        st.cmdline.cmdx = 2;
        let frame = render_lossy(&mut st);
        assert!(frame.contains("/ab"));
    }

    #[test]
    fn transient_message_cleared_after_one_frame() {
        let mut st = state_with(&["abc"]);
        st.set_error("boom");
        let frame = render_lossy(&mut st);
        assert!(frame.contains("\x1b[41;37mboom\x1b[0m"));
        let frame = render_lossy(&mut st);
        assert!(!frame.contains("boom"));
    }

    #[test]
    fn selection_span_toggles_background() {
        let mut st = state_with(&["foo bar foo"]);
        st.hlt = Some(Span {
            sx: 8,
            sy: 0,
            ex: 11,
            ey: 0,
        });
        let frame = render_lossy(&mut st);
        let on = frame.find("\x1b[44m").expect("background on");
        let off = frame.find("\x1b[49m").expect("background off");
        assert!(on < off);
        // The highlighted slice sits between the toggles.
        assert_eq!(&frame[on + 5..off], "foo");
    }

    #[test]
    fn control_bytes_render_caret_notation_inverse() {
        let mut st = state_with(&["a\x01b"]);
        let frame = render_lossy(&mut st);
        assert!(frame.contains("\x1b[7mA\x1b[m"), "0x01 renders as inverse ^A");
    }

    #[test]
    fn keyword_rows_emit_bold_indexed_color() {
        let mut st = state_with(&[]);
        st.rows.set_syntax(core_syntax::detect("t.c"));
        st.rows.insert_row(0, b"if (x) return 1;".to_vec());
        st.rows.dirty = false;
        let frame = render_lossy(&mut st);
        assert!(frame.contains("\x1b[1;38;5;63mif"));
        assert!(frame.contains("\x1b[35m1"), "numbers use magenta");
    }

    #[test]
    fn comment_uses_gray_indexed_color() {
        let mut st = state_with(&[]);
        st.rows.set_syntax(core_syntax::detect("t.c"));
        st.rows.insert_row(0, b"x // note".to_vec());
        st.rows.dirty = false;
        let frame = render_lossy(&mut st);
        assert!(frame.contains("\x1b[38;5;248m// note"));
    }

    #[test]
    fn long_rows_clip_to_viewport() {
        let long = "x".repeat(100);
        let mut st = state_with(&[long.as_str()]);
        st.set_screen_size(10, 20);
        let frame = render_lossy(&mut st);
        assert!(!frame.contains(&"x".repeat(21)));
        assert!(frame.contains(&"x".repeat(20)));
    }

    #[test]
    fn viewport_scrolls_to_reveal_cursor() {
        let lines: Vec<String> = (0..50).map(|i| format!("line{i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut st = state_with(&refs);
        st.set_cursor(0, 40);
        let frame = render_lossy(&mut st);
        assert!(frame.contains("line40"));
        assert!(!frame.contains("line0\r"), "top of file scrolled out");
        assert!(st.rowoff > 0);
    }
}
