//! Interactive menu front-end for terminals and pipes.
//!
//! Generic over its reader and writer so the whole dialogue can be driven
//! from memory in tests. The "current directory" is session state of this
//! front-end only: relative file names are resolved against it and the
//! process working directory is never changed.
//!
//! [`run_once`] is the non-interactive counterpart used by `rename SOURCE
//! NEW_NAME`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{RenameFrontend, resolve_source};
use crate::handler::RenameRequestHandler;
use crate::listing::list_entries;
use crate::request::{FailureReason, RenameOutcome, RenameRequest};

const RULE_WIDTH: usize = 60;
const OK: &str = "\u{2705}";
const ERR: &str = "\u{274c}";

/// Menu-driven console session.
pub struct ConsoleFrontend<R, W> {
    input: R,
    output: W,
    workdir: PathBuf,
    handler: RenameRequestHandler,
    greeted: bool,
}

impl<R: BufRead, W: Write> ConsoleFrontend<R, W> {
    pub fn new(input: R, output: W, workdir: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output,
            workdir: workdir.into(),
            handler: RenameRequestHandler::new(),
            greeted: false,
        }
    }

    /// The session's current directory.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Give back the writer, e.g. to inspect a transcript in tests.
    pub fn into_output(self) -> W {
        self.output
    }

    fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }

    /// Print `label` and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn greet(&mut self) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "FILE RENAME TOOL - CLI (Command Line Interface)")?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output)
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Options:")?;
        writeln!(self.output, "  1. Rename a file")?;
        writeln!(self.output, "  2. List files in current directory")?;
        writeln!(self.output, "  3. Change directory")?;
        writeln!(self.output, "  4. Exit")?;
        writeln!(self.output)
    }

    /// Run the menu until a rename is ready or the session ends.
    fn read_request(&mut self) -> io::Result<Option<RenameRequest>> {
        if !self.greeted {
            self.greet()?;
            self.greeted = true;
        }

        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("Enter choice (1-4): ")? else {
                writeln!(self.output)?;
                writeln!(self.output, "Goodbye!")?;
                return Ok(None);
            };

            match choice.as_str() {
                "1" => {
                    if let Some(request) = self.collect_rename()? {
                        return Ok(Some(request));
                    }
                }
                "2" => self.list_directory()?,
                "3" => self.change_directory()?,
                "4" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(None);
                }
                _ => writeln!(self.output, "{ERR} Invalid choice!")?,
            }
        }
    }

    /// Ask for the old and new names. Returns `None` when the old name is
    /// missing (already reported) or input ended mid-dialogue.
    fn collect_rename(&mut self) -> io::Result<Option<RenameRequest>> {
        let Some(old_name) = self.prompt("Enter old filename: ")? else {
            return Ok(None);
        };
        let checked = resolve_source(&self.workdir, &old_name)
            .ok_or(FailureReason::NotFound)
            .and_then(|source| self.handler.check_source(&source).map(|()| source));
        let source = match checked {
            Ok(source) => source,
            Err(reason) => {
                let request = RenameRequest::new(&old_name, String::new());
                let outcome = RenameOutcome::failure(reason);
                writeln!(self.output, "{}", outcome_line(&request, &outcome))?;
                return Ok(None);
            }
        };

        let Some(new_name) = self.prompt("Enter new filename: ")? else {
            return Ok(None);
        };
        Ok(Some(RenameRequest::new(source, new_name)))
    }

    fn list_directory(&mut self) -> io::Result<()> {
        match list_entries(&self.workdir) {
            Ok(entries) if entries.is_empty() => writeln!(self.output, "Directory is empty"),
            Ok(entries) => {
                writeln!(self.output)?;
                writeln!(self.output, "Files in current directory:")?;
                for (i, entry) in entries.iter().enumerate() {
                    writeln!(self.output, "  {}. {}", i + 1, entry.display_name())?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn change_directory(&mut self) -> io::Result<()> {
        let Some(raw) = self.prompt("Enter path: ")? else {
            return Ok(());
        };
        let target = self.resolve(&raw);
        match std::fs::canonicalize(&target) {
            Ok(dir) if dir.is_dir() => {
                info!(dir = %dir.display(), "working directory changed");
                writeln!(self.output, "{OK} Changed to: {}", dir.display())?;
                self.workdir = dir;
            }
            Ok(other) => writeln!(
                self.output,
                "{ERR} Error: '{}' is not a directory",
                other.display()
            )?,
            Err(e) => writeln!(self.output, "{ERR} Error: {e}")?,
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> RenameFrontend for ConsoleFrontend<R, W> {
    fn next_request(&mut self) -> Option<RenameRequest> {
        match self.read_request() {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "console closed");
                None
            }
        }
    }

    fn render(&mut self, request: &RenameRequest, outcome: &RenameOutcome) {
        if let Err(e) = writeln!(self.output, "{}", outcome_line(request, outcome)) {
            warn!(error = %e, "failed to write outcome");
        }
    }
}

fn outcome_line(request: &RenameRequest, outcome: &RenameOutcome) -> String {
    match outcome {
        RenameOutcome::Success { .. } => format!("{OK} SUCCESS: {}", outcome.describe(request)),
        RenameOutcome::Failure { .. } => format!("{ERR} Error: {}", outcome.describe(request)),
    }
}

// ── One-shot ──────────────────────────────────────────────────────────

/// Execute a single rename and print its outcome.
///
/// `source` is resolved against `workdir` unless absolute; a blank source is
/// `NotFound`. Text mode writes success to `out` and failure to `err`; JSON
/// mode writes the serialized outcome to `out` either way. Returns whether
/// the rename succeeded.
pub fn run_once<O: Write, E: Write>(
    workdir: &Path,
    source: &str,
    new_name: &str,
    json: bool,
    out: &mut O,
    err: &mut E,
) -> Result<bool, String> {
    let (request, outcome) = match resolve_source(workdir, source) {
        Some(path) => {
            let request = RenameRequest::new(path, new_name);
            let outcome = RenameRequestHandler::new().execute(&request);
            (request, outcome)
        }
        None => (
            RenameRequest::new(source, new_name),
            RenameOutcome::failure(FailureReason::NotFound),
        ),
    };

    if json {
        let text = serde_json::to_string_pretty(&outcome)
            .map_err(|e| format!("failed to serialize outcome: {e}"))?;
        writeln!(out, "{text}").map_err(|e| format!("failed to write outcome: {e}"))?;
    } else {
        let sink: &mut dyn Write = if outcome.is_success() { out } else { err };
        writeln!(sink, "{}", outcome_line(&request, &outcome))
            .map_err(|e| format!("failed to write outcome: {e}"))?;
    }
    Ok(outcome.is_success())
}
