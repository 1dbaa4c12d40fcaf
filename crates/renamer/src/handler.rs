//! The rename protocol shared by every front-end.
//!
//! [`RenameRequestHandler::execute`] runs these steps in order and stops at
//! the first failure:
//!
//! 1. the source entry must exist, else [`FailureReason::NotFound`];
//! 2. the trimmed new name must be a plain leaf name, else
//!    [`FailureReason::InvalidName`];
//! 3. the destination is the new name joined onto the source's parent;
//! 4. the destination must not exist, else [`FailureReason::AlreadyExists`];
//! 5. one `std::fs::rename` call, whose errors become
//!    [`FailureReason::IoError`].
//!
//! The existence checks and the rename are separate syscalls, so an entry
//! created at the destination between steps 4 and 5 is not detected. On
//! Unix the rename then replaces it; platforms that refuse surface the
//! error as `AlreadyExists` or `IoError`. No locking is attempted.

use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::request::{FailureReason, RenameOutcome, RenameRequest};

/// Validates and executes rename requests. Holds no state between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenameRequestHandler;

impl RenameRequestHandler {
    pub fn new() -> Self {
        Self
    }

    /// Validate `request` and, if it passes, rename the entry.
    ///
    /// Never panics and never returns an error: every failure is reported
    /// as [`RenameOutcome::Failure`].
    pub fn execute(&self, request: &RenameRequest) -> RenameOutcome {
        let source = request.source_path.as_path();

        if let Err(reason) = self.check_source(source) {
            return reject(request, reason);
        }

        let Some(name) = leaf_name_candidate(&request.new_name) else {
            return reject(request, FailureReason::InvalidName);
        };

        let destination = destination_for(source, name);
        if entry_exists(&destination) {
            return reject(request, FailureReason::AlreadyExists);
        }

        debug!(
            source = %source.display(),
            destination = %destination.display(),
            "renaming"
        );
        match fs::rename(source, &destination) {
            Ok(()) => {
                info!(
                    from = %source.display(),
                    to = %destination.display(),
                    "file renamed"
                );
                RenameOutcome::Success {
                    old_path: source.to_path_buf(),
                    new_path: destination,
                }
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                reject(request, FailureReason::AlreadyExists)
            }
            Err(e) => reject(request, FailureReason::IoError(e.to_string())),
        }
    }

    /// Step 1 on its own, for front-ends that want to reject a missing
    /// source before asking for the new name.
    pub fn check_source(&self, source: &Path) -> Result<(), FailureReason> {
        if entry_exists(source) {
            Ok(())
        } else {
            Err(FailureReason::NotFound)
        }
    }
}

fn reject(request: &RenameRequest, reason: FailureReason) -> RenameOutcome {
    warn!(
        source = %request.source_path.display(),
        new_name = %request.new_name,
        %reason,
        "rename refused"
    );
    RenameOutcome::failure(reason)
}

/// Whether anything (file, directory, or symlink, dangling or not) exists
/// at `path`.
fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Trim `raw` and accept it only if it names an entry in the same
/// directory: non-empty, no separators, no NUL, not `.` or `..`.
fn leaf_name_candidate(raw: &str) -> Option<&str> {
    let name = raw.trim();
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', MAIN_SEPARATOR, '\0'])
    {
        return None;
    }
    Some(name)
}

/// `name` joined onto the parent of `source`. A bare relative source has
/// an empty parent, so the destination stays relative to the same directory.
fn destination_for(source: &Path, name: &str) -> PathBuf {
    source
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_within_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "hello").unwrap();

        let outcome = RenameRequestHandler::new().execute(&RenameRequest::new(&source, "c.txt"));

        let expected = dir.path().join("c.txt");
        assert_eq!(
            outcome,
            RenameOutcome::Success {
                old_path: source.clone(),
                new_path: expected.clone(),
            }
        );
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(expected).unwrap(), "hello");
    }

    #[test]
    fn missing_source_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = RenameRequestHandler::new()
            .execute(&RenameRequest::new(dir.path().join("ghost.txt"), "c.txt"));
        assert_eq!(outcome.reason(), Some(&FailureReason::NotFound));
        assert!(!dir.path().join("c.txt").exists());
    }

    #[test]
    fn not_found_takes_precedence_over_invalid_name() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = RenameRequestHandler::new()
            .execute(&RenameRequest::new(dir.path().join("ghost.txt"), ""));
        assert_eq!(outcome.reason(), Some(&FailureReason::NotFound));
    }

    #[test]
    fn blank_names_are_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "").unwrap();

        let handler = RenameRequestHandler::new();
        for name in ["", "   ", "\t\n"] {
            let outcome = handler.execute(&RenameRequest::new(&source, name));
            assert_eq!(outcome.reason(), Some(&FailureReason::InvalidName), "{name:?}");
        }
        assert!(source.exists());
    }

    #[test]
    fn names_that_leave_the_directory_are_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "").unwrap();

        let handler = RenameRequestHandler::new();
        for name in ["..", ".", "sub/c.txt", "../c.txt"] {
            let outcome = handler.execute(&RenameRequest::new(&source, name));
            assert_eq!(outcome.reason(), Some(&FailureReason::InvalidName), "{name:?}");
        }
        assert!(source.exists());
    }

    #[test]
    fn collision_leaves_both_files_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let outcome = RenameRequestHandler::new().execute(&RenameRequest::new(&a, "b.txt"));

        assert_eq!(outcome.reason(), Some(&FailureReason::AlreadyExists));
        assert_eq!(fs::read_to_string(&a).unwrap(), "a");
        assert_eq!(fs::read_to_string(&b).unwrap(), "b");
    }

    #[test]
    fn new_name_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "").unwrap();

        let outcome =
            RenameRequestHandler::new().execute(&RenameRequest::new(&source, "  c.txt  "));
        assert!(outcome.is_success());
        assert!(dir.path().join("c.txt").exists());
    }

    #[test]
    fn renames_directories_too() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("old");
        fs::create_dir(&source).unwrap();

        let outcome = RenameRequestHandler::new().execute(&RenameRequest::new(&source, "new"));
        assert!(outcome.is_success());
        assert!(dir.path().join("new").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_existing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("link")).unwrap();

        let handler = RenameRequestHandler::new();
        let collision = handler.execute(&RenameRequest::new(&a, "link"));
        assert_eq!(collision.reason(), Some(&FailureReason::AlreadyExists));

        let moved = handler.execute(&RenameRequest::new(dir.path().join("link"), "link2"));
        assert!(moved.is_success());
    }

    #[test]
    fn destination_of_bare_relative_source_stays_relative() {
        assert_eq!(
            destination_for(Path::new("a.txt"), "c.txt"),
            PathBuf::from("c.txt")
        );
        assert_eq!(
            destination_for(Path::new("docs/a.txt"), "c.txt"),
            PathBuf::from("docs/c.txt")
        );
    }

    #[test]
    fn check_source_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let handler = RenameRequestHandler::new();
        assert_eq!(handler.check_source(dir.path()), Ok(()));
        assert_eq!(
            handler.check_source(&dir.path().join("nope")),
            Err(FailureReason::NotFound)
        );
    }
}
