//! Rename one file, safely, from any user interface.
//!
//! `renamer` holds the single piece of logic shared by the command-line,
//! graphical and voice front-ends: the rename-request protocol. A front-end
//! collects a source path and a new leaf name, builds a [`RenameRequest`],
//! and hands it to [`RenameRequestHandler::execute`], which checks that the
//! source exists, that the name is usable, and that nothing already sits at
//! the destination before issuing one `rename` call. The result is a
//! [`RenameOutcome`] the front-end renders however it likes.
//!
//! ```no_run
//! use renamer::prelude::*;
//!
//! let handler = RenameRequestHandler::new();
//! let outcome = handler.execute(&RenameRequest::new("notes/a.txt", "b.txt"));
//! match outcome {
//!     RenameOutcome::Success { new_path, .. } => println!("now at {}", new_path.display()),
//!     RenameOutcome::Failure { reason } => eprintln!("refused: {reason}"),
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`handler`] | Validation and execution of a rename |
//! | [`request`] | Request / outcome types |
//! | [`sanitize`] | Cleanup of speech transcripts into names |
//! | [`frontend`] | The [`RenameFrontend`] trait, [`drive`] loop, console menu |
//! | [`listing`] | Directory listing for menus and browsers |
//! | [`ui`] | State shared by screen front-ends, tracing capture |
//! | [`config`] | Session configuration |
//!
//! Every request is independent. The handler keeps no history, and anything
//! a front-end remembers between requests (selected file, current
//! directory) stays in that front-end.

pub mod config;
pub mod frontend;
pub mod handler;
pub mod listing;
pub mod prelude;
pub mod request;
pub mod sanitize;
pub mod ui;

pub use frontend::{RenameFrontend, SessionSummary, drive};
pub use handler::RenameRequestHandler;
pub use request::{FailureReason, RenameOutcome, RenameRequest};
