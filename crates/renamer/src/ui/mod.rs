//! UI state shared between a screen front-end and its background workers.
//!
//! The graphical and voice front-ends render from one
//! `Arc<Mutex<UiState>>`. The render thread reads it once per frame; the
//! voice listener writes recognized text into it from a tokio task.
//!
//! ```text
//! voice listener ──writes──▶ Arc<Mutex<UiState>> ◀──reads/writes── screen
//! ```
//!
//! Only session-display data lives here. The rename handler never sees it.

pub mod tracing;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use chrono::Local;

use crate::request::{RenameOutcome, RenameRequest};

/// Maximum log lines kept in memory.
pub const MAX_LOG_LINES: usize = 2000;
/// Trim to this many when the cap is exceeded.
pub const LOG_TRIM_TO: usize = 1200;

/// Maximum activity lines kept in memory.
pub const MAX_ACTIVITY: usize = 500;
/// Trim to this many when the cap is exceeded.
pub const ACTIVITY_TRIM_TO: usize = 300;

// ── Activity ──────────────────────────────────────────────────────────

/// What kind of event an activity line reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Info,
    Success,
    Error,
}

impl ActivityKind {
    /// Marker printed in front of the message.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Info => "\u{2022}",
            Self::Success => "\u{2705}",
            Self::Error => "\u{274c}",
        }
    }
}

/// One line of the user-visible status log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLine {
    pub time: String,
    pub kind: ActivityKind,
    pub message: String,
}

// ── Log Types ─────────────────────────────────────────────────────────

/// A single log line captured from tracing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogLine {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log severity level (mirrors tracing levels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short fixed-width label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

impl From<&::tracing::Level> for LogLevel {
    fn from(level: &::tracing::Level) -> Self {
        match *level {
            ::tracing::Level::TRACE => Self::Trace,
            ::tracing::Level::DEBUG => Self::Debug,
            ::tracing::Level::INFO => Self::Info,
            ::tracing::Level::WARN => Self::Warn,
            ::tracing::Level::ERROR => Self::Error,
        }
    }
}

// ── Voice input ───────────────────────────────────────────────────────

/// Where the voice front-end is in capturing a new name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceInput {
    /// Nothing captured yet.
    #[default]
    Idle,
    /// The listener is recording or waiting on the speech service.
    Listening,
    /// Raw transcript, not yet sanitized.
    Recognized(String),
    /// The speech service or capture failed; holds the description.
    Failed(String),
}

impl VoiceInput {
    /// The transcript, when one is available.
    pub fn transcript(&self) -> Option<&str> {
        match self {
            Self::Recognized(text) => Some(text),
            _ => None,
        }
    }

    /// Text for the "Recognized text" line.
    pub fn display_text(&self) -> String {
        match self {
            Self::Idle => "(waiting for voice input)".to_string(),
            Self::Listening => "(listening...)".to_string(),
            Self::Recognized(text) => text.clone(),
            Self::Failed(_) => "(no valid voice input)".to_string(),
        }
    }
}

// ── UiState ───────────────────────────────────────────────────────────

/// State shared between a screen front-end and background workers.
pub struct UiState {
    /// User-visible status log, oldest first.
    pub activity: Vec<ActivityLine>,
    /// Tracing output, shown in the optional log pane.
    pub logs: Vec<LogLine>,
    pub voice: VoiceInput,
    /// Set by the screen, consumed by the voice listener.
    pub listen_requested: bool,
    /// The screen sets this when the user quits; workers stop on it.
    pub quit_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            activity: Vec::new(),
            logs: Vec::new(),
            voice: VoiceInput::Idle,
            listen_requested: false,
            quit_requested: false,
        }
    }
}

/// Shared handle used by front-ends and workers.
pub type SharedUiState = Arc<Mutex<UiState>>;

// ── Convenience Updaters ──────────────────────────────────────────────

/// Lock the shared state mutex and run a closure on the guard.
/// Silently ignores poisoned locks (no log spam inside UI frontends).
macro_rules! with_state {
    ($state:expr, |$s:ident| $body:block) => {
        if let Ok(mut $s) = $state.lock() {
            $body
        }
    };
}

fn now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn trim_activity(s: &mut UiState) {
    if s.activity.len() > MAX_ACTIVITY {
        let drain = s.activity.len() - ACTIVITY_TRIM_TO;
        s.activity.drain(..drain);
    }
}

/// Append a line to the status log.
pub fn push_activity(state: &SharedUiState, kind: ActivityKind, message: &str) {
    with_state!(state, |s| {
        s.activity.push(ActivityLine {
            time: now(),
            kind,
            message: message.to_string(),
        });
        trim_activity(&mut s);
    });
}

/// Append the outcome of a rename to the status log.
pub fn push_outcome(state: &SharedUiState, request: &RenameRequest, outcome: &RenameOutcome) {
    let (kind, message) = match outcome {
        RenameOutcome::Success { .. } => (
            ActivityKind::Success,
            format!("SUCCESS! {}", outcome.describe(request)),
        ),
        RenameOutcome::Failure { .. } => (
            ActivityKind::Error,
            format!("Error: {}", outcome.describe(request)),
        ),
    };
    push_activity(state, kind, &message);
}

/// Empty the status log.
pub fn clear_activity(state: &SharedUiState) {
    with_state!(state, |s| { s.activity.clear() });
}

/// Replace the voice input state.
pub fn set_voice(state: &SharedUiState, voice: VoiceInput) {
    with_state!(state, |s| { s.voice = voice });
}

/// Ask the voice listener to start. Returns `false` if it is already
/// listening or a request is still pending.
pub fn request_listen(state: &SharedUiState) -> bool {
    let Ok(mut s) = state.lock() else {
        return false;
    };
    if s.listen_requested || s.voice == VoiceInput::Listening {
        return false;
    }
    s.listen_requested = true;
    s.voice = VoiceInput::Listening;
    true
}

/// Consume a pending listen request. Used by the voice listener.
pub fn take_listen_request(state: &SharedUiState) -> bool {
    state
        .lock()
        .map(|mut s| std::mem::take(&mut s.listen_requested))
        .unwrap_or(false)
}

/// Whether the user has asked to quit.
pub fn quit_requested(state: &SharedUiState) -> bool {
    state.lock().map(|s| s.quit_requested).unwrap_or(true)
}

/// Mark the session as finished so workers stop.
pub fn request_quit(state: &SharedUiState) {
    with_state!(state, |s| { s.quit_requested = true });
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FailureReason;
    use std::path::PathBuf;

    fn shared() -> SharedUiState {
        Arc::new(Mutex::new(UiState::default()))
    }

    #[test]
    fn log_level_labels() {
        assert_eq!(LogLevel::Info.label(), "INFO ");
        assert_eq!(LogLevel::Error.label(), "ERROR");
        assert_eq!(LogLevel::from(&::tracing::Level::WARN), LogLevel::Warn);
    }

    #[test]
    fn ui_state_defaults() {
        let state = UiState::default();
        assert!(state.activity.is_empty());
        assert!(state.logs.is_empty());
        assert_eq!(state.voice, VoiceInput::Idle);
        assert!(!state.listen_requested);
        assert!(!state.quit_requested);
    }

    #[test]
    fn outcomes_become_marked_activity_lines() {
        let state = shared();
        let request = RenameRequest::new("/d/a.txt", "b.txt");

        push_outcome(
            &state,
            &request,
            &RenameOutcome::Failure {
                reason: FailureReason::AlreadyExists,
            },
        );
        push_outcome(
            &state,
            &request,
            &RenameOutcome::Success {
                old_path: PathBuf::from("/d/a.txt"),
                new_path: PathBuf::from("/d/b.txt"),
            },
        );

        let s = state.lock().unwrap();
        assert_eq!(s.activity.len(), 2);
        assert_eq!(s.activity[0].kind, ActivityKind::Error);
        assert_eq!(s.activity[0].message, "Error: File 'b.txt' already exists!");
        assert_eq!(s.activity[1].kind, ActivityKind::Success);
        assert_eq!(s.activity[1].message, "SUCCESS! 'a.txt' renamed to 'b.txt'");
    }

    #[test]
    fn activity_is_trimmed_to_recent_lines() {
        let state = shared();
        for i in 0..=MAX_ACTIVITY {
            push_activity(&state, ActivityKind::Info, &format!("line {i}"));
        }
        let s = state.lock().unwrap();
        assert_eq!(s.activity.len(), ACTIVITY_TRIM_TO);
        assert_eq!(
            s.activity.last().unwrap().message,
            format!("line {MAX_ACTIVITY}")
        );
    }

    #[test]
    fn listen_request_is_single_flight() {
        let state = shared();

        assert!(request_listen(&state));
        assert!(!request_listen(&state), "already pending");
        assert_eq!(state.lock().unwrap().voice, VoiceInput::Listening);

        assert!(take_listen_request(&state));
        assert!(!take_listen_request(&state));
        assert!(!request_listen(&state), "still listening");

        set_voice(&state, VoiceInput::Recognized("notes".into()));
        assert!(request_listen(&state));
    }

    #[test]
    fn voice_display_text() {
        assert_eq!(VoiceInput::Idle.display_text(), "(waiting for voice input)");
        assert_eq!(VoiceInput::Recognized("x".into()).transcript(), Some("x"));
        assert_eq!(VoiceInput::Failed("offline".into()).transcript(), None);
    }

    #[test]
    fn quit_flag_round_trip() {
        let state = shared();
        assert!(!quit_requested(&state));
        request_quit(&state);
        assert!(quit_requested(&state));
    }
}
