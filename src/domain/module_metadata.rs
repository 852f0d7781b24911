use std::path::{Path, PathBuf};

use super::AppError;
use super::class_name::is_identifier;

/// Describes a module to be scaffolded: its name, the absolute directory it
/// lives in, and the source directory relative to that root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMetadata {
    name: String,
    root_path: PathBuf,
    source_path: String,
}

impl ModuleMetadata {
    /// A single leading `./` is stripped from `source_path`.
    pub fn new(name: &str, root_path: impl Into<PathBuf>, source_path: &str) -> Self {
        let source_path = source_path.strip_prefix("./").unwrap_or(source_path);
        Self {
            name: name.to_string(),
            root_path: root_path.into(),
            source_path: source_path.to_string(),
        }
    }

    /// Like [`ModuleMetadata::new`], rejecting names that are not a single
    /// PHP namespace segment.
    pub fn validated(
        name: &str,
        root_path: impl Into<PathBuf>,
        source_path: &str,
    ) -> Result<Self, AppError> {
        if !is_identifier(name) {
            return Err(AppError::InvalidModuleName(name.to_string()));
        }
        Ok(Self::new(name, root_path, source_path))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Absolute source directory.
    pub fn source_dir(&self) -> PathBuf {
        if self.source_path.is_empty() {
            self.root_path.clone()
        } else {
            self.root_path.join(&self.source_path)
        }
    }
}
