//! Screen-local state: the file browser, the selection, the name entry.
//!
//! None of this is shared with workers or the rename handler. The selected
//! file is passed explicitly in each request.

use std::path::{Path, PathBuf};

use renamer::listing::{DirEntryInfo, list_entries};
use tracing::warn;

/// Input mode for the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputMode {
    /// Arrow keys move through the file browser.
    Browse,
    /// Keys edit the new name; Enter submits, Esc cancels.
    EditName,
}

/// Which pane receives scroll keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ActivePane {
    Activity,
    Log,
}

pub(crate) const PARENT_ENTRY: &str = "..";

pub(crate) struct App {
    pub(crate) input_mode: InputMode,
    /// New name typed so far (typed mode only).
    pub(crate) name_buffer: String,
    /// Names come from speech instead of the keyboard.
    pub(crate) voice_mode: bool,
    /// Directory shown in the browser.
    pub(crate) dir: PathBuf,
    pub(crate) entries: Vec<DirEntryInfo>,
    pub(crate) cursor: usize,
    pub(crate) selected: Option<PathBuf>,
    pub(crate) active_pane: ActivePane,
    /// Whether the tracing log pane is visible (toggled with `,`).
    pub(crate) show_logs: bool,
    /// Offset from the bottom of the activity log (0 = follow tail).
    pub(crate) activity_scroll: usize,
    /// Offset from the bottom of the tracing log (0 = follow tail).
    pub(crate) log_scroll: usize,
    pub(crate) status_message: Option<String>,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new(dir: impl Into<PathBuf>, voice_mode: bool) -> Self {
        let mut app = Self {
            input_mode: InputMode::Browse,
            name_buffer: String::new(),
            voice_mode,
            dir: dir.into(),
            entries: Vec::new(),
            cursor: 0,
            selected: None,
            active_pane: ActivePane::Activity,
            show_logs: false,
            activity_scroll: 0,
            log_scroll: 0,
            status_message: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Re-read the current directory, keeping the cursor in range.
    pub(crate) fn refresh(&mut self) {
        self.entries.clear();
        if self.dir.parent().is_some() {
            self.entries.push(DirEntryInfo {
                name: PARENT_ENTRY.to_string(),
                is_dir: true,
            });
        }
        match list_entries(&self.dir) {
            Ok(listing) => self.entries.extend(listing),
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "cannot list directory");
                self.status_message = Some(format!("Cannot list {}: {e}", self.dir.display()));
            }
        }
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
    }

    pub(crate) fn current_entry(&self) -> Option<&DirEntryInfo> {
        self.entries.get(self.cursor)
    }

    pub(crate) fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.cursor = 0;
        self.refresh();
    }

    /// Go up one level. Returns `false` at the filesystem root.
    pub(crate) fn go_to_parent(&mut self) -> bool {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return false;
        };
        let came_from = self.dir.file_name().map(|n| n.to_string_lossy().into_owned());
        self.change_dir(parent);
        if let Some(name) = came_from
            && let Some(pos) = self.entries.iter().position(|e| e.name == name)
        {
            self.cursor = pos;
        }
        true
    }

    /// Enter the highlighted directory, or select the highlighted file.
    /// Returns the newly selected file, if any.
    pub(crate) fn open_current(&mut self) -> Option<PathBuf> {
        let entry = self.current_entry()?.clone();
        if entry.name == PARENT_ENTRY {
            self.go_to_parent();
            return None;
        }
        let path = self.dir.join(&entry.name);
        if entry.is_dir {
            self.change_dir(path);
            None
        } else {
            self.selected = Some(path.clone());
            Some(path)
        }
    }

    /// Forget the selection and any typed name.
    pub(crate) fn clear_form(&mut self) {
        self.selected = None;
        self.name_buffer.clear();
        self.input_mode = InputMode::Browse;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_parent_entry_then_directory_contents() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();

        let app = App::new(dir.path(), false);
        let names: Vec<&str> = app.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "sub", "a.txt"]);
        assert_eq!(app.input_mode, InputMode::Browse);
        assert!(app.selected.is_none());
    }

    #[test]
    fn open_descends_and_selects() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("a.txt"), "").unwrap();

        let mut app = App::new(dir.path(), false);
        app.cursor = 1;
        assert_eq!(app.open_current(), None);
        assert_eq!(app.dir, sub);

        app.cursor = 1;
        assert_eq!(app.open_current(), Some(sub.join("a.txt")));
        assert_eq!(app.selected, Some(sub.join("a.txt")));
    }

    #[test]
    fn parent_restores_cursor_on_child() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();

        let mut app = App::new(dir.path().join("b"), false);
        assert!(app.go_to_parent());
        assert_eq!(app.dir, dir.path());
        assert_eq!(app.current_entry().unwrap().name, "b");
    }

    #[test]
    fn cursor_stays_in_range() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("only.txt"), "").unwrap();

        let mut app = App::new(dir.path(), false);
        app.move_cursor_up();
        assert_eq!(app.cursor, 0);
        for _ in 0..5 {
            app.move_cursor_down();
        }
        assert_eq!(app.cursor, app.entries.len() - 1);
    }

    #[test]
    fn refresh_after_rename_clamps_cursor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();

        let mut app = App::new(dir.path(), false);
        app.cursor = 2;
        fs::remove_file(dir.path().join("b.txt")).unwrap();
        app.refresh();
        assert_eq!(app.cursor, 1);
    }
}
