//! Settings shared by the front-end binaries.
//!
//! [`RenamerConfig`] is filled from command-line flags and turned into the
//! values a session needs: the directory relative paths resolve against and
//! the tracing level.

use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;

/// Configuration for a rename session.
#[derive(Debug, Clone)]
pub struct RenamerConfig {
    /// Directory relative paths are resolved against. Default: `"."`.
    pub workdir: PathBuf,
    /// Number of `-v` flags. `0` logs warnings and errors only.
    pub verbosity: u8,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            verbosity: 0,
        }
    }
}

impl RenamerConfig {
    /// Build a config, resolving `workdir` to an absolute path when possible.
    pub fn new(workdir: impl AsRef<Path>, verbosity: u8) -> Self {
        Self {
            workdir: resolve_workdir(workdir.as_ref()),
            verbosity,
        }
    }

    /// Tracing level for the configured verbosity.
    pub fn level_filter(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Canonicalize `path`, falling back to it unchanged if that fails.
pub fn resolve_workdir(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
