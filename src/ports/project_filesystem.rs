//! Project-level filesystem operations.
//!
//! Paths may be absolute or relative to the project root. Implementations
//! must reject paths that escape the root.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Port for the file I/O the scaffolding commands perform.
pub trait ProjectFilesystem {
    /// The project root every path is scoped to.
    fn root(&self) -> &Path;

    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &Path) -> Result<String, AppError>;

    /// Replace a file's content atomically, creating parent directories as
    /// needed. Readers see either the old or the new content, never a mix.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError>;

    /// Check whether a file or directory exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Absolute form of `path` within the project root.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root().join(path) }
    }
}
