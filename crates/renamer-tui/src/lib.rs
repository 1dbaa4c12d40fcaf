//! Full-screen terminal front-end for the rename protocol.
//!
//! Shows a file browser next to a rename form and a status log. In typed
//! mode the new name comes from the keyboard; in voice mode it comes from
//! [`UiState::voice`](renamer::ui::UiState::voice), which a background
//! listener fills in. Either way the screen is a [`RenameFrontend`]: every
//! request goes through [`drive`] and the shared [`RenameRequestHandler`].
//!
//! # Quick start
//!
//! ```no_run
//! use renamer::ui::UiState;
//! use renamer_tui::{TuiConfig, run_tui};
//! use std::sync::{Arc, Mutex};
//!
//! let state = Arc::new(Mutex::new(UiState::default()));
//! let summary = run_tui(state, TuiConfig::default())?;
//! println!("{} renamed", summary.succeeded);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use ratatui::prelude::*;
use renamer::request::{RenameOutcome, RenameRequest, leaf_name};
use renamer::ui::tracing::LogBuffer;
use renamer::ui::{SharedUiState, VoiceInput, push_outcome, quit_requested, request_quit, set_voice};
use renamer::{RenameFrontend, RenameRequestHandler, SessionSummary, drive};
use tracing::warn;

mod app;
mod input;
mod render;

pub use render::{activity_style, log_level_style};

use app::App;
use input::handle_key_event;
use render::render;

/// How often the screen redraws while waiting for a key.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for the screen.
pub struct TuiConfig {
    /// Directory the browser opens in.
    pub start_dir: PathBuf,
    /// Take new names from speech (`l` listens, `r` renames) instead of
    /// the keyboard.
    pub voice: bool,
    /// Optional log buffer from the tracing layer, drained once per frame.
    pub log_buffer: Option<LogBuffer>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            start_dir: PathBuf::from("."),
            voice: false,
            log_buffer: None,
        }
    }
}

/// Spawn the screen on a dedicated OS thread.
///
/// The thread returns when the user quits or `quit_requested` is set.
pub fn spawn_tui(state: SharedUiState, config: TuiConfig) -> JoinHandle<io::Result<SessionSummary>> {
    std::thread::spawn(move || run_tui(state, config))
}

/// Run the screen until the user quits (blocking).
///
/// Marks the session as finished on return so background workers stop.
pub fn run_tui(state: SharedUiState, config: TuiConfig) -> io::Result<SessionSummary> {
    let mut frontend = TuiFrontend::enter(state.clone(), config)?;
    let summary = drive(&mut frontend, &RenameRequestHandler::new());
    request_quit(&state);
    match frontend.error.take() {
        Some(e) => Err(e),
        None => Ok(summary),
    }
}

/// The screen as a [`RenameFrontend`]. Owns the terminal while alive and
/// restores it on drop.
pub struct TuiFrontend {
    state: SharedUiState,
    app: App,
    log_buffer: Option<LogBuffer>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Terminal error that ended the session.
    error: Option<io::Error>,
}

impl TuiFrontend {
    /// Switch the terminal to raw mode and the alternate screen.
    pub fn enter(state: SharedUiState, config: TuiConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        let terminal = execute!(stdout, EnterAlternateScreen, cursor::Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
        let terminal = match terminal {
            Ok(t) => t,
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
                let _ = disable_raw_mode();
                return Err(e);
            }
        };
        Ok(Self {
            state,
            app: App::new(config.start_dir, config.voice),
            log_buffer: config.log_buffer,
            terminal,
            error: None,
        })
    }

    /// Draw one frame and handle at most one key.
    fn tick(&mut self) -> io::Result<Option<RenameRequest>> {
        if let Some(ref buf) = self.log_buffer {
            buf.flush_into(&self.state);
        }

        let (state, app) = (&self.state, &self.app);
        self.terminal.draw(|frame| render(frame, state, app))?;

        if event::poll(FRAME_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(handle_key_event(key, &mut self.app, &self.state));
        }
        Ok(None)
    }
}

impl RenameFrontend for TuiFrontend {
    fn next_request(&mut self) -> Option<RenameRequest> {
        loop {
            if self.app.should_quit || quit_requested(&self.state) {
                request_quit(&self.state);
                return None;
            }
            match self.tick() {
                Ok(Some(request)) => return Some(request),
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "terminal error, leaving screen");
                    self.error = Some(e);
                    request_quit(&self.state);
                    return None;
                }
            }
        }
    }

    fn render(&mut self, request: &RenameRequest, outcome: &RenameOutcome) {
        apply_outcome(&mut self.app, &self.state, request, outcome);
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, cursor::Show);
        let _ = self.terminal.show_cursor();
    }
}

/// Show an outcome. A success clears the form and reloads the browser with
/// the cursor on the renamed file; a failure keeps the form for a retry.
fn apply_outcome(
    app: &mut App,
    state: &SharedUiState,
    request: &RenameRequest,
    outcome: &RenameOutcome,
) {
    push_outcome(state, request, outcome);
    match outcome {
        RenameOutcome::Success { new_path, .. } => {
            let new_name = leaf_name(new_path);
            app.clear_form();
            if app.voice_mode {
                set_voice(state, VoiceInput::Idle);
            }
            app.refresh();
            if let Some(pos) = app.entries.iter().position(|e| e.name == new_name) {
                app.cursor = pos;
            }
            app.status_message = Some(format!("Renamed to {new_name}"));
        }
        RenameOutcome::Failure { .. } => {
            app.status_message = Some(outcome.describe(request));
        }
    }
}
