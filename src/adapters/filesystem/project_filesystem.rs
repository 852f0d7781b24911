//! `ProjectFilesystem` implementation for `LocalFilesystem`.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::AppError;
use crate::ports::ProjectFilesystem;

use super::LocalFilesystem;

impl ProjectFilesystem for LocalFilesystem {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        let full_path = self.resolve_path(path);
        self.validate_path_within_root(&full_path)?;
        fs::read_to_string(full_path).map_err(AppError::from)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let full_path = self.resolve_path(path);
        self.validate_path_within_root(&full_path)?;
        let parent = full_path.parent().ok_or_else(|| {
            AppError::config_error(format!("No parent directory for {}", full_path.display()))
        })?;
        fs::create_dir_all(parent)?;

        // Same directory as the target so the rename never crosses filesystems.
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&full_path).map(|m| m.permissions().mode()).unwrap_or(0o644);
            temp.as_file().set_permissions(fs::Permissions::from_mode(mode))?;
        }
        temp.persist(&full_path).map_err(|e| AppError::from(e.error))?;
        debug!(path = %full_path.display(), bytes = content.len(), "replaced file");
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        let full_path = self.resolve_path(path);
        if self.validate_path_within_root(&full_path).is_err() {
            return false;
        }
        full_path.exists()
    }
}
