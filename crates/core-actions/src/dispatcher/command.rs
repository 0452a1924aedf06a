//! Command-mode parsing: trims the mini-line buffer, splits on spaces, and
//! routes recognized names into actions. Unknown names and malformed
//! arguments surface command-line errors; nothing here terminates the
//! editor except through the exit actions themselves.

use crate::{Action, Flow, apply};
use core_state::EditorState;

/// Parse and run one Enter-terminated command buffer.
pub fn run(state: &mut EditorState, input: &str) -> Flow {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        state.set_error("empty command");
        return Flow::Continue;
    }

    let parts: Vec<&str> = trimmed.split(' ').collect();
    match parts[0] {
        // Reserved for future options.
        "set" => Flow::Continue,
        "exit" => {
            if parts.len() == 1 {
                apply(state, Action::ExitEditor)
            } else if parts[1] == "--force" {
                apply(state, Action::ForceExitEditor)
            } else {
                state.set_error("exit: unknown extra arguments");
                Flow::Continue
            }
        }
        name => {
            state.set_error(format!("unknown command '{name}'"));
            Flow::Continue
        }
    }
}
