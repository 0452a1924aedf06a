//! hew entrypoint: terminal setup, state construction, and the outer loop
//! (read key, dispatch, render).

use anyhow::Result;
use clap::Parser;
use core_actions::{Dispatcher, Flow, io_ops};
use core_input::{Key, read_key};
use core_render::Renderer;
use core_state::{EditorState, SystemClipboard};
use core_terminal::{CrosstermBackend, text_rows_for, text_window_size};
use std::io::Write;
use tracing::{error, info};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "hew", version, about = "hew editor")]
struct Args {
    /// Path to open at startup. If omitted an empty buffer is used.
    pub path: Option<std::path::PathBuf>,
    /// Configuration file path (overrides discovery of `hew.toml`).
    #[arg(long = "config")]
    pub config: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    // File logging: the terminal is ours, so diagnostics go to hew.log.
    let log_path = std::path::Path::new("hew.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }
    let file_appender = tracing_appender::rolling::never(".", "hew.log");
    let (nb_writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .init();

    info!(target: "runtime", "startup");

    // Log panics before the terminal guard restores the screen.
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!(target: "runtime.panic", ?info, "panic");
        default_panic(info);
    }));

    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;

    let mut term = CrosstermBackend::new();
    let _term_guard = term.enter_guard()?;

    let mut state = EditorState::new(Box::new(SystemClipboard::new()));
    state.indent_as_spaces = config.file.indent.as_spaces;
    let (rows, cols) = text_window_size()?;
    state.set_screen_size(rows, cols);

    if let Some(path) = &args.path {
        io_ops::open_file(&mut state, path)?;
    }

    state.set_msg("HELP: Alt-s save, ` quit");

    run_loop(&mut state)
}

/// One dispatch step per key, one full frame per step.
fn run_loop(state: &mut EditorState) -> Result<()> {
    let mut dispatcher = Dispatcher::new();
    let mut renderer = Renderer::new();
    let mut stdout = std::io::stdout();

    loop {
        let frame = renderer.render(state)?;
        stdout.write_all(frame)?;
        stdout.flush()?;

        // The poll timeout keeps the loop responsive to resize events.
        let key = loop {
            if let Some(key) = read_key()? {
                break key;
            }
        };

        if let Key::Resize(cols, rows) = key {
            state.set_screen_size(text_rows_for(rows), cols as usize);
            continue;
        }

        match dispatcher.dispatch(state, key) {
            Flow::Continue => {}
            Flow::Quit => break,
        }
    }

    info!(target: "runtime", "clean_exit");
    Ok(())
}
