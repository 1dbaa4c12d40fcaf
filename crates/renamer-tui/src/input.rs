//! Key handling. Returns a request when the user submits one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use renamer::request::{RenameRequest, leaf_name};
use renamer::ui::{
    ActivityKind, SharedUiState, VoiceInput, clear_activity, push_activity, request_listen,
    set_voice,
};

use crate::app::{ActivePane, App, InputMode};

pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    state: &SharedUiState,
) -> Option<RenameRequest> {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }

    match app.input_mode {
        InputMode::Browse => handle_browse_key(key, app, state),
        InputMode::EditName => handle_edit_key(key, app, state),
    }
}

fn handle_browse_key(key: KeyEvent, app: &mut App, state: &SharedUiState) -> Option<RenameRequest> {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),
        KeyCode::Enter | KeyCode::Right => {
            if let Some(path) = app.open_current() {
                let name = leaf_name(&path);
                push_activity(state, ActivityKind::Success, &format!("File selected: {name}"));
                app.status_message = Some(format!("Selected {name}"));
            }
        }
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
            app.go_to_parent();
        }
        KeyCode::Char('n') if !app.voice_mode => {
            if require_selection(app, state) {
                app.name_buffer.clear();
                app.input_mode = InputMode::EditName;
                app.status_message = None;
            }
        }
        KeyCode::Char('l') if app.voice_mode => {
            if request_listen(state) {
                push_activity(
                    state,
                    ActivityKind::Info,
                    "Listening... Speak the new filename now...",
                );
                app.status_message = Some("Listening...".into());
            } else {
                app.status_message = Some("Already listening.".into());
            }
        }
        KeyCode::Char('r') if app.voice_mode => return submit_voice(app, state),
        KeyCode::Char('x') => {
            app.clear_form();
            clear_activity(state);
            if app.voice_mode {
                set_voice(state, VoiceInput::Idle);
            }
            app.status_message = Some("Form reset.".into());
        }
        KeyCode::Char(',') => {
            app.show_logs = !app.show_logs;
            app.active_pane = if app.show_logs {
                ActivePane::Log
            } else {
                ActivePane::Activity
            };
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if app.show_logs {
                app.active_pane = match app.active_pane {
                    ActivePane::Log => ActivePane::Activity,
                    ActivePane::Activity => ActivePane::Log,
                };
            }
        }
        KeyCode::PageUp => {
            let scroll = active_scroll_mut(app);
            *scroll = scroll.saturating_add(10);
        }
        KeyCode::PageDown => {
            let scroll = active_scroll_mut(app);
            *scroll = scroll.saturating_sub(10);
        }
        KeyCode::End => {
            *active_scroll_mut(app) = 0; // follow tail
        }
        _ => {}
    }
    None
}

fn handle_edit_key(key: KeyEvent, app: &mut App, state: &SharedUiState) -> Option<RenameRequest> {
    match key.code {
        KeyCode::Esc => {
            app.name_buffer.clear();
            app.input_mode = InputMode::Browse;
            app.status_message = Some("Rename cancelled.".into());
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Browse;
            if !require_selection(app, state) {
                return None;
            }
            let source = app.selected.clone()?;
            return Some(RenameRequest::new(source, app.name_buffer.clone()));
        }
        KeyCode::Backspace => {
            app.name_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.name_buffer.push(c);
        }
        _ => {}
    }
    None
}

/// Build a request from the recognized transcript, or report why there is
/// none. Speech failures never reach the handler.
fn submit_voice(app: &mut App, state: &SharedUiState) -> Option<RenameRequest> {
    if !require_selection(app, state) {
        return None;
    }
    let voice = state
        .lock()
        .map(|s| s.voice.clone())
        .unwrap_or_default();
    let Some(transcript) = voice.transcript() else {
        push_activity(state, ActivityKind::Error, "Error: No valid voice input");
        app.status_message = Some("Please provide a valid filename via voice!".into());
        return None;
    };
    let source = app.selected.clone()?;
    Some(RenameRequest::from_transcript(source, transcript))
}

/// Front-end precondition: a file must be selected before renaming.
fn require_selection(app: &mut App, state: &SharedUiState) -> bool {
    if app.selected.is_some() {
        return true;
    }
    push_activity(state, ActivityKind::Error, "Error: No file selected");
    app.status_message = Some("Please select a file first!".into());
    false
}

fn active_scroll_mut(app: &mut App) -> &mut usize {
    match app.active_pane {
        ActivePane::Activity => &mut app.activity_scroll,
        ActivePane::Log => &mut app.log_scroll,
    }
}
