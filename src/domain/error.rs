use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::php_config::ConfigError;

/// Library-wide error type for facgen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// An expected file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or editing a configuration array failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configuration file could not be read as a returned array.
    #[error("{}: {source}", path.display())]
    InvalidConfigFile { path: PathBuf, source: ConfigError },

    /// No namespace mapping covers the class.
    #[error(
        "No autoload mapping covers class '{0}'. Add a PSR-4 entry to composer.json or a [namespaces] entry to facgen.toml."
    )]
    UnresolvablePath(String),

    /// Target file exists and overwriting was not requested.
    #[error("File already exists: {} (use --force to overwrite)", .0.display())]
    FileAlreadyExists(PathBuf),

    /// The dependency configuration file is missing and may not be created.
    #[error("Dependency configuration file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    /// Class name is not a valid PHP class name.
    #[error("Invalid class name '{0}': expected Vendor\\Namespace\\ClassName")]
    InvalidClassName(String),

    /// Module name is not a valid PHP namespace segment.
    #[error("Invalid module name '{0}': must be a single PHP identifier")]
    InvalidModuleName(String),

    /// Template registration or rendering failed.
    #[error("Template error: {0}")]
    Template(String),

    /// Path escapes the project root.
    #[error("Path escapes the project root: {0}")]
    PathTraversal(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// The factory file was written but registering it failed.
    #[error(
        "Factory class was created at {} but registering it failed: {source}",
        factory_path.display()
    )]
    RegistrationFailed { factory_path: PathBuf, source: Box<AppError> },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Short label naming the failure kind, for one-line summaries.
    pub fn kind_label(&self) -> &'static str {
        match self {
            AppError::Io(_) => "io",
            AppError::Configuration(_) | AppError::TomlParseError(_) => "configuration",
            AppError::NotFound(_) => "not found",
            AppError::Config(err) | AppError::InvalidConfigFile { source: err, .. } => {
                err.kind_label()
            }
            AppError::UnresolvablePath(_) => "unresolvable path",
            AppError::FileAlreadyExists(_) => "file exists",
            AppError::ConfigFileNotFound(_) => "config file not found",
            AppError::InvalidClassName(_) | AppError::InvalidModuleName(_) => "invalid name",
            AppError::Template(_) => "template",
            AppError::PathTraversal(_) => "path traversal",
            AppError::ParseError { .. } => "parse error",
            AppError::RegistrationFailed { .. } => "registration failed",
        }
    }
}
