//! File open and save.
//!
//! Files are `\n`-terminated byte lines; no BOM or CRLF translation. Save is
//! atomic: the buffer is written to `<path>.tmp` which is then renamed over
//! the target, so a failed write never clobbers the previous file.

use anyhow::{Context, Result};
use core_state::EditorState;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Associate a path with the buffer and re-select the language descriptor
/// from its extension.
pub fn set_path(state: &mut EditorState, path: PathBuf) {
    let syn = path.to_str().and_then(core_syntax::detect);
    state.rows.set_syntax(syn);
    state.path = Some(path);
}

/// Load `path` into the row store. Missing or unreadable files are fatal at
/// startup; the caller reports and exits.
pub fn open_file(state: &mut EditorState, path: &Path) -> Result<()> {
    let content = std::fs::read(path)
        .with_context(|| format!("cannot open file {}", path.display()))?;

    let mut lines: Vec<&[u8]> = content.split(|&b| b == b'\n').collect();
    // A trailing newline terminates the last line rather than opening a new
    // empty one.
    if content.ends_with(b"\n") {
        lines.pop();
    }
    for line in lines {
        let at = state.rows.numrows();
        state.rows.insert_row(at, line.to_vec());
    }
    debug!(target: "io", file = %path.display(), size_bytes = content.len(), rows = state.rows.numrows(), "file_read_ok");

    set_path(state, path.to_path_buf());
    state.rows.dirty = false;
    Ok(())
}

/// Trim trailing whitespace, write the whole buffer through a temp file,
/// rename it over the target, and clear the dirty flag. Recoverable
/// failures surface on the command line.
pub fn save_file(state: &mut EditorState) {
    state.rows.trim_trailing_ws();

    let Some(path) = state.path.clone() else {
        state.set_error("no filename");
        return;
    };

    let contents = state.rows.to_bytes();
    let mut tmp_os: OsString = path.clone().into_os_string();
    tmp_os.push(".tmp");
    let tmp = PathBuf::from(tmp_os);

    let result = std::fs::write(&tmp, &contents).and_then(|_| std::fs::rename(&tmp, &path));
    match result {
        Ok(()) => {
            debug!(target: "io", file = %path.display(), size_bytes = contents.len(), "file_write_ok");
            state.set_msg(format!("{} bytes written", contents.len()));
            state.rows.dirty = false;
        }
        Err(e) => {
            error!(target: "io", ?e, "file_write_error");
            state.set_error("cannot write to file for saving");
        }
    }
}
