//! Convenience re-exports for front-end crates.
//!
//! ```ignore
//! use renamer::prelude::*;
//! ```

pub use crate::config::RenamerConfig;
pub use crate::frontend::console::{ConsoleFrontend, run_once};
pub use crate::frontend::{RenameFrontend, SessionSummary, drive, resolve_source};
pub use crate::handler::RenameRequestHandler;
pub use crate::listing::{DirEntryInfo, list_entries};
pub use crate::request::{FailureReason, RenameOutcome, RenameRequest, leaf_name};
pub use crate::sanitize::sanitize_transcript;
pub use crate::ui::tracing::{LogBuffer, UiTracingLayer};
pub use crate::ui::{
    ActivityKind, ActivityLine, LogLevel, LogLine, SharedUiState, UiState, VoiceInput,
    push_activity, push_outcome,
};
