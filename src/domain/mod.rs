pub mod class_name;
pub mod composer;
pub mod error;
pub mod module_metadata;
pub mod path_resolver;
pub mod php_config;
pub mod tool_config;

pub use class_name::ClassName;
pub use composer::{COMPOSER_FILE, parse_psr4_map};
pub use error::AppError;
pub use module_metadata::ModuleMetadata;
pub use path_resolver::PathResolver;
pub use php_config::{
    ArrayStyle, ConfigDocument, ConfigError, ConfigLiteral, Entry, EntryChange, Section,
    SectionPath,
};
pub use tool_config::{
    DEFAULT_DEPENDENCIES_FILE, FactorySettings, InjectorSettings, TOOL_CONFIG_FILE, ToolConfig,
    parse_tool_config,
};
