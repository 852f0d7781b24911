//! Test double for `ProjectFilesystem`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::ProjectFilesystem;

/// In-memory implementation of `ProjectFilesystem` for unit tests.
///
/// Keys are absolute paths under `root`; a directory exists when a file below
/// it does.
#[derive(Clone, Debug)]
pub struct MemoryFilesystem {
    root: PathBuf,
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Arc::new(Mutex::new(BTreeMap::new())),
            writes: Arc::new(Mutex::new(0)),
        }
    }

    /// Seed a file without counting it as a write.
    pub fn insert(&self, path: &Path, content: &str) {
        let path = self.resolve_path(path);
        self.files.lock().unwrap().insert(path, content.to_string());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(&self.resolve_path(path)).cloned()
    }

    /// All file paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    /// Number of `write_file` calls so far.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl ProjectFilesystem for MemoryFilesystem {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        self.contents(path).ok_or_else(|| {
            AppError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "Mock file not found"))
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let path = self.resolve_path(path);
        if !path.starts_with(&self.root) {
            return Err(AppError::PathTraversal(path.display().to_string()));
        }
        self.files.lock().unwrap().insert(path, content.to_string());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        let path = self.resolve_path(path);
        self.files.lock().unwrap().keys().any(|key| key.starts_with(&path))
    }
}
