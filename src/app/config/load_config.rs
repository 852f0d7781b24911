//! Tool configuration loading from the project root.

use std::path::Path;

use tracing::debug;

use crate::domain::{AppError, TOOL_CONFIG_FILE, ToolConfig, parse_tool_config};
use crate::ports::ProjectFilesystem;

/// Load `facgen.toml`, falling back to defaults when the file is absent.
pub fn load_tool_config<F: ProjectFilesystem>(filesystem: &F) -> Result<ToolConfig, AppError> {
    let path = Path::new(TOOL_CONFIG_FILE);
    if !filesystem.file_exists(path) {
        debug!("no {} in project root, using defaults", TOOL_CONFIG_FILE);
        return Ok(ToolConfig::default());
    }

    let content = filesystem.read_file(path)?;
    parse_tool_config(&content).map_err(|e| match e {
        AppError::TomlParseError(err) => AppError::ParseError {
            what: TOOL_CONFIG_FILE.to_string(),
            details: err.to_string(),
        },
        other => other,
    })
}
