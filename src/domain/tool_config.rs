//! Tool configuration domain models.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::AppError;
use super::class_name::is_identifier;

/// Optional per-project configuration file.
pub const TOOL_CONFIG_FILE: &str = "facgen.toml";

/// Default dependency aggregation file, relative to the project root.
pub const DEFAULT_DEPENDENCIES_FILE: &str = "config/autoload/dependencies.global.php";

/// Configuration loaded from `facgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Factory generation settings.
    #[serde(default)]
    pub factory: FactorySettings,
    /// Dependency registration settings.
    #[serde(default)]
    pub injector: InjectorSettings,
    /// Namespace prefix → directory overrides, relative to the project root.
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
}

/// Factory generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorySettings {
    /// Appended to the class short name to form the factory name.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self { suffix: default_suffix() }
    }
}

fn default_suffix() -> String {
    "Factory".to_string()
}

/// Dependency registration settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InjectorSettings {
    /// Aggregation file, relative to the project root.
    #[serde(default = "default_config_file")]
    pub config_file: String,
    /// Start a new file when the aggregation file is missing.
    #[serde(default = "default_true")]
    pub create_missing: bool,
}

impl Default for InjectorSettings {
    fn default() -> Self {
        Self { config_file: default_config_file(), create_missing: default_true() }
    }
}

fn default_config_file() -> String {
    DEFAULT_DEPENDENCIES_FILE.to_string()
}

fn default_true() -> bool {
    true
}

impl ToolConfig {
    fn validate(&self) -> Result<(), AppError> {
        if !is_identifier(&self.factory.suffix) {
            return Err(AppError::config_error(format!(
                "factory.suffix '{}' is not a valid class name suffix",
                self.factory.suffix
            )));
        }
        if self.injector.config_file.trim().is_empty() {
            return Err(AppError::config_error("injector.config_file must not be empty"));
        }
        Ok(())
    }
}

/// Parse and validate tool configuration from TOML content.
pub fn parse_tool_config(content: &str) -> Result<ToolConfig, AppError> {
    let config: ToolConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
