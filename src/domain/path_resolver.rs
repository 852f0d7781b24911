use std::path::{Path, PathBuf};

use super::{AppError, ClassName};

/// Maps class names to file paths through namespace-prefix → directory
/// entries, the way PSR-4 autoloading does. The longest matching prefix wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResolver {
    entries: Vec<(String, PathBuf)>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping, replacing an existing one for the same prefix.
    /// Returns the directory that was replaced.
    pub fn insert(&mut self, prefix: &str, directory: impl Into<PathBuf>) -> Option<PathBuf> {
        let prefix = normalize_prefix(prefix);
        let directory = directory.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == prefix) {
            Some((_, dir)) => Some(std::mem::replace(dir, directory)),
            None => {
                self.entries.push((prefix, directory));
                None
            }
        }
    }

    pub fn with_mapping(mut self, prefix: &str, directory: impl Into<PathBuf>) -> Self {
        self.insert(prefix, directory);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directory mapped to exactly `prefix`.
    pub fn directory_for(&self, prefix: &str) -> Option<&Path> {
        let prefix = normalize_prefix(prefix);
        self.entries.iter().find(|(existing, _)| *existing == prefix).map(|(_, dir)| dir.as_path())
    }

    /// File that holds `class`.
    pub fn resolve(&self, class: &ClassName) -> Result<PathBuf, AppError> {
        let name = class.as_str();
        let (prefix, directory) = self
            .entries
            .iter()
            .filter(|(prefix, _)| name.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .ok_or_else(|| AppError::UnresolvablePath(name.to_string()))?;

        let relative = &name[prefix.len()..];
        let mut path = directory.clone();
        for segment in relative.split('\\') {
            path.push(segment);
        }
        path.set_extension("php");
        Ok(path)
    }

    /// File that holds the factory for `class`: same directory, short name
    /// with `suffix` appended.
    pub fn factory_path(&self, class: &ClassName, suffix: &str) -> Result<PathBuf, AppError> {
        self.resolve(&class.with_suffix(suffix))
    }
}

/// `\App\Handler` and `App\Handler\` both become `App\Handler\`; the empty
/// prefix stays empty and matches every class.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('\\');
    if trimmed.is_empty() { String::new() } else { format!("{}\\", trimmed) }
}
