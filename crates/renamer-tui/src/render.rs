//! Drawing of the rename screen.

use renamer::request::leaf_name;
use renamer::ui::{ActivityKind, ActivityLine, LogLevel, LogLine, SharedUiState, VoiceInput};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{ActivePane, App, InputMode};

// ── Public Utilities ──────────────────────────────────────────────────

/// Map a log level to a ratatui [`Style`].
pub fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
        LogLevel::Debug => Style::default().fg(Color::Cyan),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Map an activity kind to a ratatui [`Style`].
pub fn activity_style(kind: ActivityKind) -> Style {
    match kind {
        ActivityKind::Info => Style::default().fg(Color::White),
        ActivityKind::Success => Style::default().fg(Color::Green),
        ActivityKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

// ── Root Render ───────────────────────────────────────────────────────

/// Copy of the shared fields a frame needs, taken under one short lock.
struct RenderSnapshot {
    activity: Vec<ActivityLine>,
    logs: Vec<LogLine>,
    voice: VoiceInput,
}

fn snapshot(state: &SharedUiState, app: &App) -> RenderSnapshot {
    match state.lock() {
        Ok(s) => RenderSnapshot {
            activity: s.activity.clone(),
            logs: if app.show_logs {
                s.logs.clone()
            } else {
                Vec::new()
            },
            voice: s.voice.clone(),
        },
        Err(_) => RenderSnapshot {
            activity: Vec::new(),
            logs: Vec::new(),
            voice: VoiceInput::Idle,
        },
    }
}

pub(crate) fn render(frame: &mut Frame, state: &SharedUiState, app: &App) {
    let snap = snapshot(state, app);

    // [3] title | [flex] body | [3] help bar.
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_title(frame, rows[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_browser(frame, body[0], app);

    // Right column: selected file | new name | status log (+ tracing log).
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(body[1]);

    render_selected(frame, right[0], app);
    if app.voice_mode {
        render_recognized(frame, right[1], &snap.voice);
    } else {
        render_name_entry(frame, right[1], app);
    }

    if app.show_logs {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(right[2]);
        render_activity(frame, split[0], &snap.activity, app);
        render_logs(frame, split[1], &snap.logs, app);
    } else {
        render_activity(frame, right[2], &snap.activity, app);
    }

    render_help(frame, rows[2], app);
}

// ── Title ─────────────────────────────────────────────────────────────

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.voice_mode {
        "FILE RENAME TOOL - VUI (Voice Interface)"
    } else {
        "FILE RENAME TOOL - GUI"
    };
    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(app.dir.display().to_string(), Style::default().fg(Color::DarkGray)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

// ── File Browser ──────────────────────────────────────────────────────

fn render_browser(frame: &mut Frame, area: Rect, app: &App) {
    let inner_height = area.height.saturating_sub(2) as usize;
    // Keep the cursor on screen.
    let top = if inner_height == 0 || app.cursor < inner_height {
        0
    } else {
        app.cursor + 1 - inner_height
    };

    let lines: Vec<Line> = app
        .entries
        .iter()
        .enumerate()
        .skip(top)
        .take(inner_height.max(1))
        .map(|(i, entry)| {
            let is_cursor = i == app.cursor;
            let is_selected = !entry.is_dir
                && app
                    .selected
                    .as_ref()
                    .is_some_and(|p| p.parent() == Some(app.dir.as_path()) && leaf_name(p) == entry.name);
            let marker = if is_cursor { "> " } else { "  " };
            let mut style = if entry.is_dir {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            if is_selected {
                style = style.fg(Color::Green);
            }
            if is_cursor {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Line::from(Span::styled(format!("{marker}{}", entry.display_name()), style))
        })
        .collect();

    let border = if app.input_mode == InputMode::Browse {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Browse ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Form Fields ───────────────────────────────────────────────────────

fn render_selected(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.selected {
        Some(path) => Span::styled(leaf_name(path), Style::default().fg(Color::Green)),
        None => Span::styled("No file selected", Style::default().fg(Color::DarkGray)),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Selected File ");
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
}

fn render_name_entry(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::EditName;
    let line = if editing {
        Line::from(vec![
            Span::raw(app.name_buffer.as_str()),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ])
    } else if app.name_buffer.is_empty() {
        Line::from(Span::styled(
            "press [n] to enter a new filename",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::raw(app.name_buffer.as_str()))
    };
    let border = if editing { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" New Filename ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_recognized(frame: &mut Frame, area: Rect, voice: &VoiceInput) {
    let style = match voice {
        VoiceInput::Recognized(_) => Style::default().fg(Color::White),
        VoiceInput::Listening => Style::default().fg(Color::Yellow),
        VoiceInput::Failed(_) => Style::default().fg(Color::Red),
        VoiceInput::Idle => Style::default().fg(Color::DarkGray),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Recognized Text ");
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(voice.display_text(), style))).block(block),
        area,
    );
}

// ── Status Log ────────────────────────────────────────────────────────

/// First visible line when showing the tail minus `offset` lines.
fn tail_scroll(total: usize, visible: usize, offset: usize) -> u16 {
    let max = total.saturating_sub(visible);
    max.saturating_sub(offset).min(u16::MAX as usize) as u16
}

fn render_activity(frame: &mut Frame, area: Rect, activity: &[ActivityLine], app: &App) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = activity
        .iter()
        .map(|a| {
            Line::from(vec![
                Span::styled(format!("{} ", a.time), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{} {}", a.kind.marker(), a.message), activity_style(a.kind)),
            ])
        })
        .collect();

    let scroll = tail_scroll(lines.len(), inner_height, app.activity_scroll);
    let border = if app.active_pane == ActivePane::Activity {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Status ");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_logs(frame: &mut Frame, area: Rect, logs: &[LogLine], app: &App) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = logs
        .iter()
        // Trace output is too noisy for the pane.
        .filter(|log| log.level != LogLevel::Trace)
        .map(|log| {
            Line::from(vec![
                Span::styled(format!("{} ", log.time), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{} ", log.level.label()), log_level_style(log.level)),
                Span::raw(log.message.as_str()),
            ])
        })
        .collect();

    let scroll = tail_scroll(lines.len(), inner_height, app.log_scroll);
    let border = if app.active_pane == ActivePane::Log {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Log ");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ── Help Bar ──────────────────────────────────────────────────────────

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let hint = |k: &'static str, label: &'static str| {
        [
            Span::styled(k, key_style),
            Span::styled(format!(" {label}  "), Style::default().fg(Color::DarkGray)),
        ]
    };

    let mut spans: Vec<Span> = Vec::new();
    match (app.input_mode, app.voice_mode) {
        (InputMode::EditName, _) => {
            spans.extend(hint("[Enter]", "rename"));
            spans.extend(hint("[Esc]", "cancel"));
        }
        (InputMode::Browse, voice) => {
            spans.extend(hint("[\u{2191}\u{2193}]", "move"));
            spans.extend(hint("[Enter]", "open/select"));
            spans.extend(hint("[Bksp]", "up"));
            if voice {
                spans.extend(hint("[l]", "listen"));
                spans.extend(hint("[r]", "rename with voice"));
            } else {
                spans.extend(hint("[n]", "new name"));
            }
            spans.extend(hint("[x]", "reset"));
            spans.extend(hint("[,]", "logs"));
            spans.extend(hint("[q]", "quit"));
        }
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(ref msg) = app.status_message {
        lines.insert(
            0,
            Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow))),
        );
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use renamer::ui::{UiState, push_activity};
    use std::sync::{Arc, Mutex};

    fn draw(app: &App, state: &SharedUiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(frame, state, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn typed_screen_shows_form_and_status() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        let app = App::new(dir.path(), false);
        let state: SharedUiState = Arc::new(Mutex::new(UiState::default()));
        push_activity(&state, ActivityKind::Error, "Error: No file selected");

        let screen = draw(&app, &state);
        assert!(screen.contains("FILE RENAME TOOL - GUI"));
        assert!(screen.contains("No file selected"));
        assert!(screen.contains("a.txt"));
        assert!(screen.contains("Error: No file selected"));
        assert!(screen.contains("new name"));
    }

    #[test]
    fn voice_screen_shows_recognized_text() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(dir.path(), true);
        let state: SharedUiState = Arc::new(Mutex::new(UiState::default()));
        state.lock().unwrap().voice = VoiceInput::Recognized("quarterly report".into());

        let screen = draw(&app, &state);
        assert!(screen.contains("VUI (Voice Interface)"));
        assert!(screen.contains("quarterly report"));
        assert!(screen.contains("listen"));
    }

    #[test]
    fn tail_scroll_follows_end() {
        assert_eq!(tail_scroll(10, 4, 0), 6);
        assert_eq!(tail_scroll(10, 4, 2), 4);
        assert_eq!(tail_scroll(3, 4, 0), 0);
        assert_eq!(tail_scroll(10, 4, 50), 0);
    }
}
