mod project_filesystem;
mod template_renderer;

pub use project_filesystem::ProjectFilesystem;
pub use template_renderer::{
    CONFIG_PROVIDER_TEMPLATE, FACTORY_TEMPLATE, TemplateRenderer, TemplateVars,
};
