//! Tracing layer that captures events for on-screen display.
//!
//! A full-screen front-end owns the terminal, so log output cannot go to
//! stderr. [`UiTracingLayer`] turns each event into a [`LogLine`] and pushes
//! it into a [`LogBuffer`]; the screen drains that buffer into
//! [`UiState::logs`](super::UiState::logs) once per frame. The buffer has its
//! own mutex, so logging from the voice listener never waits on a render.

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::{LOG_TRIM_TO, LogLevel, LogLine, MAX_LOG_LINES, SharedUiState};

/// Pending log lines, shared between the layer and the screen.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<LogLine>>>);

impl LogBuffer {
    fn push(&self, line: LogLine) {
        if let Ok(mut buf) = self.0.lock() {
            buf.push(line);
            cap(&mut buf);
        }
    }

    /// Take every pending line.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *buf)
    }

    /// Move pending lines into `UiState::logs`.
    ///
    /// Locks the UI state only when there is something to move.
    pub fn flush_into(&self, state: &SharedUiState) {
        let lines = self.drain();
        if lines.is_empty() {
            return;
        }
        if let Ok(mut s) = state.lock() {
            s.logs.extend(lines);
            cap(&mut s.logs);
        }
    }
}

fn cap(lines: &mut Vec<LogLine>) {
    if lines.len() > MAX_LOG_LINES {
        let drop = lines.len() - LOG_TRIM_TO;
        lines.drain(..drop);
    }
}

/// [`Layer`] that records events into a [`LogBuffer`].
pub struct UiTracingLayer {
    buffer: LogBuffer,
}

impl UiTracingLayer {
    /// Create the layer and the buffer the screen should drain.
    pub fn new() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for UiTracingLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        self.buffer.push(LogLine {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: LogLevel::from(event.metadata().level()),
            message: fields.into_message(),
        });
    }
}

/// Collects the `message` field and any structured fields of an event.
#[derive(Default)]
struct FieldCollector {
    message: String,
    extras: Vec<String>,
}

impl FieldCollector {
    /// `message {k=v, ...}`, or just the fields when there is no message.
    fn into_message(self) -> String {
        match (self.message.is_empty(), self.extras.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.extras.join(" "),
            (false, false) => format!("{} {{{}}}", self.message, self.extras.join(", ")),
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.extras.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            // `format_args!` messages arrive here; their Debug output is the
            // plain text.
            self.message = format!("{value:?}");
        } else {
            self.extras.push(format!("{}={value:?}", field.name()));
        }
    }
}
