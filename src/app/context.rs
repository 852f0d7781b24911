use crate::app::config::{load_path_resolver, load_tool_config};
use crate::domain::{AppError, PathResolver, ToolConfig};
use crate::ports::{ProjectFilesystem, TemplateRenderer};

/// Application context holding dependencies for command execution.
pub struct AppContext<F: ProjectFilesystem, T: TemplateRenderer> {
    filesystem: F,
    templates: T,
    config: ToolConfig,
    resolver: PathResolver,
}

impl<F: ProjectFilesystem, T: TemplateRenderer> AppContext<F, T> {
    /// Create a new application context.
    pub fn new(filesystem: F, templates: T, config: ToolConfig, resolver: PathResolver) -> Self {
        Self { filesystem, templates, config, resolver }
    }

    /// Create a context from the project's `facgen.toml` and `composer.json`.
    pub fn load(filesystem: F, templates: T) -> Result<Self, AppError> {
        let config = load_tool_config(&filesystem)?;
        let resolver = load_path_resolver(&filesystem, &config)?;
        Ok(Self::new(filesystem, templates, config, resolver))
    }

    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    pub fn templates(&self) -> &T {
        &self.templates
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Namespace → directory map used to place generated classes.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }
}
