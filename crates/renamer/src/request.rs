//! Request and outcome types for a single rename.
//!
//! Both types are transient: a front-end builds a [`RenameRequest`] per user
//! action, hands it to the [`RenameRequestHandler`](crate::handler::RenameRequestHandler),
//! and renders the returned [`RenameOutcome`] straight away.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_transcript;

// ── RenameRequest ─────────────────────────────────────────────────────

/// A candidate rename: which entry to rename and the leaf name it should get.
///
/// The destination always lives in the same directory as `source_path`;
/// `new_name` is a leaf name, never a path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRequest {
    /// Existing filesystem entry to rename.
    pub source_path: PathBuf,
    /// Candidate leaf name for the entry.
    pub new_name: String,
}

impl RenameRequest {
    /// Build a request from typed input.
    pub fn new(source_path: impl Into<PathBuf>, new_name: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            new_name: new_name.into(),
        }
    }

    /// Build a request from a speech transcript.
    ///
    /// The transcript is sanitized first, so a transcript made only of
    /// disallowed characters yields an empty name and is later rejected as
    /// [`FailureReason::InvalidName`].
    pub fn from_transcript(source_path: impl Into<PathBuf>, transcript: &str) -> Self {
        Self::new(source_path, sanitize_transcript(transcript))
    }
}

// ── FailureReason ─────────────────────────────────────────────────────

/// Why a rename was refused or failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The source entry does not exist.
    NotFound,
    /// An entry with the new name already exists next to the source.
    AlreadyExists,
    /// The new name is empty, or is not a plain leaf name.
    InvalidName,
    /// The rename itself failed (permissions, cross-device, lost race).
    IoError(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::AlreadyExists => write!(f, "a file with that name already exists"),
            Self::InvalidName => write!(f, "invalid file name"),
            Self::IoError(detail) => write!(f, "{detail}"),
        }
    }
}

// ── RenameOutcome ─────────────────────────────────────────────────────

/// Result of executing one [`RenameRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// The entry now lives at `new_path`.
    Success { old_path: PathBuf, new_path: PathBuf },
    /// Nothing was renamed.
    Failure { reason: FailureReason },
}

impl RenameOutcome {
    pub(crate) fn failure(reason: FailureReason) -> Self {
        Self::Failure { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }

    /// One-line, user-facing description of the outcome.
    ///
    /// Every front-end prefixes this with its own success/error marker.
    pub fn describe(&self, request: &RenameRequest) -> String {
        match self {
            Self::Success { old_path, new_path } => format!(
                "'{}' renamed to '{}'",
                leaf_name(old_path),
                leaf_name(new_path)
            ),
            Self::Failure { reason } => match reason {
                FailureReason::NotFound => format!(
                    "File '{}' not found!",
                    request.source_path.display()
                ),
                FailureReason::AlreadyExists => format!(
                    "File '{}' already exists!",
                    request.new_name.trim()
                ),
                FailureReason::InvalidName if request.new_name.trim().is_empty() => {
                    "Please enter a new filename!".to_string()
                }
                FailureReason::InvalidName => format!(
                    "'{}' is not a valid file name!",
                    request.new_name.trim()
                ),
                FailureReason::IoError(detail) => detail.clone(),
            },
        }
    }
}

/// Final path component as a displayable string, or the whole path when it
/// has none (e.g. `/` or `..`).
pub fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
