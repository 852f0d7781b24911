//! Namespace map assembly from `composer.json` and `facgen.toml`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{AppError, COMPOSER_FILE, PathResolver, ToolConfig, parse_psr4_map};
use crate::ports::ProjectFilesystem;

/// Build the resolver from composer PSR-4 entries, then apply the
/// `[namespaces]` overrides from the tool configuration.
pub fn load_path_resolver<F: ProjectFilesystem>(
    filesystem: &F,
    config: &ToolConfig,
) -> Result<PathResolver, AppError> {
    let mut resolver = PathResolver::new();

    let composer = Path::new(COMPOSER_FILE);
    if filesystem.file_exists(composer) {
        let map = parse_psr4_map(&filesystem.read_file(composer)?)?;
        for (prefix, dir) in &map {
            resolver.insert(prefix, project_dir(filesystem, dir));
        }
        debug!(entries = map.len(), "loaded composer autoload map");
    } else {
        debug!("no {} in project root", COMPOSER_FILE);
    }

    for (prefix, dir) in &config.namespaces {
        let dir = project_dir(filesystem, dir);
        if let Some(previous) = resolver.insert(prefix, &dir)
            && previous != dir
        {
            warn!(
                prefix = %prefix,
                composer = %previous.display(),
                configured = %dir.display(),
                "facgen.toml overrides composer autoload directory"
            );
        }
    }

    Ok(resolver)
}

fn project_dir<F: ProjectFilesystem>(filesystem: &F, dir: &str) -> PathBuf {
    let dir = dir.strip_prefix("./").unwrap_or(dir).trim_end_matches('/');
    filesystem.resolve_path(Path::new(dir))
}
