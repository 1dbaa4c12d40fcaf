//! The boundary between the rename protocol and its user interfaces.
//!
//! A front-end is anything that can produce a [`RenameRequest`] and show a
//! [`RenameOutcome`]: the console menu ([`console::ConsoleFrontend`]), the
//! terminal file browser and the voice screen both implement
//! [`RenameFrontend`]. None of them validates or renames anything itself;
//! [`drive`] sends every request through the [`RenameRequestHandler`].
//!
//! ```text
//! front-end ──next_request()──▶ drive ──execute()──▶ RenameRequestHandler
//!     ▲                                                    │
//!     └────────────────render(outcome)─────────────────────┘
//! ```

pub mod console;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::handler::RenameRequestHandler;
use crate::request::{RenameOutcome, RenameRequest};

/// A source of rename requests that can also present their outcomes.
pub trait RenameFrontend {
    /// Block until the user submits a request. `None` means the user quit.
    fn next_request(&mut self) -> Option<RenameRequest>;

    /// Show the outcome of `request` to the user.
    fn render(&mut self, request: &RenameRequest, outcome: &RenameOutcome);
}

/// Counts of what happened during one [`drive`] session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub succeeded: u32,
    pub failed: u32,
}

impl SessionSummary {
    fn record(&mut self, outcome: &RenameOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Resolve a typed source name against `workdir`.
///
/// A blank name names no file. It resolves to `None` instead of to
/// `workdir` itself, so it can never select the session directory.
pub fn resolve_source(workdir: &Path, raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let path = Path::new(raw);
    Some(if path.is_absolute() {
        path.to_path_buf()
    } else {
        workdir.join(path)
    })
}

/// Run `frontend` until the user quits.
///
/// Each request is executed exactly once and its outcome rendered; failures
/// never end the session.
pub fn drive<F>(frontend: &mut F, handler: &RenameRequestHandler) -> SessionSummary
where
    F: RenameFrontend + ?Sized,
{
    let mut summary = SessionSummary::default();
    while let Some(request) = frontend.next_request() {
        let outcome = handler.execute(&request);
        summary.record(&outcome);
        frontend.render(&request, &outcome);
    }
    debug!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "session ended"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FailureReason;
    use std::collections::VecDeque;
    use std::fs;

    /// Replays a fixed list of requests and records what it was shown.
    struct Scripted {
        pending: VecDeque<RenameRequest>,
        shown: Vec<RenameOutcome>,
    }

    impl RenameFrontend for Scripted {
        fn next_request(&mut self) -> Option<RenameRequest> {
            self.pending.pop_front()
        }

        fn render(&mut self, _request: &RenameRequest, outcome: &RenameOutcome) {
            self.shown.push(outcome.clone());
        }
    }

    #[test]
    fn drive_executes_each_request_once_and_keeps_going_after_failures() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();

        let mut frontend = Scripted {
            pending: VecDeque::from(vec![
                RenameRequest::new(&a, "b.txt"),
                RenameRequest::new(&a, "   "),
                RenameRequest::new(&a, "c.txt"),
                RenameRequest::new(&a, "d.txt"),
            ]),
            shown: Vec::new(),
        };

        let summary = drive(&mut frontend, &RenameRequestHandler::new());

        assert_eq!(summary, SessionSummary { succeeded: 1, failed: 3 });
        let reasons: Vec<Option<&FailureReason>> =
            frontend.shown.iter().map(RenameOutcome::reason).collect();
        assert_eq!(
            reasons,
            vec![
                Some(&FailureReason::AlreadyExists),
                Some(&FailureReason::InvalidName),
                None,
                Some(&FailureReason::NotFound),
            ]
        );
        assert!(dir.path().join("c.txt").exists());
    }

    #[test]
    fn resolve_source_joins_relative_names_and_refuses_blank_ones() {
        let workdir = Path::new("/work");
        assert_eq!(
            resolve_source(workdir, "a.txt"),
            Some(PathBuf::from("/work/a.txt"))
        );
        assert_eq!(
            resolve_source(workdir, "/tmp/b.txt"),
            Some(PathBuf::from("/tmp/b.txt"))
        );
        assert_eq!(resolve_source(workdir, ""), None);
        assert_eq!(resolve_source(workdir, "   "), None);
    }

    #[test]
    fn drive_with_no_requests_is_empty() {
        let mut frontend = Scripted {
            pending: VecDeque::new(),
            shown: Vec::new(),
        };
        let summary = drive(&mut frontend, &RenameRequestHandler::new());
        assert_eq!(summary, SessionSummary::default());
        assert!(frontend.shown.is_empty());
    }
}
