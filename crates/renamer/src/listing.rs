//! Single-directory listing used by the console menu and the file browser.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

/// One entry of a directory listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntryInfo {
    /// Name with a trailing `/` for directories.
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// List the entries of `dir`, hidden ones included.
///
/// Directories come first, then files; each group is ordered by name,
/// case-insensitively. Symlinks are classified by their target. Entries
/// whose metadata cannot be read are listed as files.
pub fn list_entries(dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_dir = fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
        entries.push(DirEntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    entries.sort_by(compare_entries);
    Ok(entries)
}

fn compare_entries(a: &DirEntryInfo, b: &DirEntryInfo) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_first_then_case_insensitive_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("beta.txt"), "").unwrap();
        fs::write(dir.path().join("Alpha.txt"), "").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::create_dir(dir.path().join("zeta")).unwrap();

        let names: Vec<String> = list_entries(dir.path())
            .unwrap()
            .iter()
            .map(DirEntryInfo::display_name)
            .collect();
        assert_eq!(names, vec!["zeta/", ".hidden", "Alpha.txt", "beta.txt"]);
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_entries(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_entries(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
