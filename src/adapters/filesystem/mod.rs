//! Local filesystem adapter for [`ProjectFilesystem`](crate::ports::ProjectFilesystem).
//!
//! Every path is validated against the project root before it is touched, so
//! a class or module name can never steer a write outside the project.

mod project_filesystem;

use std::path::{Component, Path, PathBuf};

use crate::domain::AppError;

/// Filesystem-backed project rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Create a filesystem rooted at the given directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create a filesystem rooted at the current working directory.
    pub fn current() -> Result<Self, AppError> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }
}

impl LocalFilesystem {
    /// Fails with `PathTraversal` unless `path`, once `.` and `..` are
    /// resolved lexically, lies under the root.
    pub(crate) fn validate_path_within_root(&self, path: &Path) -> Result<(), AppError> {
        let full_path = if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) };
        if normalize_path(&full_path).starts_with(normalize_path(&self.root)) {
            Ok(())
        } else {
            Err(AppError::PathTraversal(path.display().to_string()))
        }
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
