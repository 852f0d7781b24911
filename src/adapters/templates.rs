//! Embedded minijinja templates for generated PHP sources.

use include_dir::{Dir, include_dir};
use minijinja::Environment;

use crate::domain::AppError;
use crate::ports::{TemplateRenderer, TemplateVars};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

const TEMPLATE_EXTENSION: &str = ".jinja";

/// Renders the templates compiled into the binary.
pub struct EmbeddedTemplates {
    env: Environment<'static>,
}

impl EmbeddedTemplates {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        for file in TEMPLATES_DIR.files() {
            let Some(name) = file.path().to_str().and_then(|p| p.strip_suffix(TEMPLATE_EXTENSION))
            else {
                continue;
            };
            let source = file
                .contents_utf8()
                .ok_or_else(|| AppError::Template(format!("Template '{}' is not UTF-8", name)))?;
            env.add_template(name, source).map_err(|e| {
                AppError::Template(format!("Failed to register template '{}': {}", name, e))
            })?;
        }

        Ok(Self { env })
    }
}

impl TemplateRenderer for EmbeddedTemplates {
    fn render(&self, template: &str, vars: &TemplateVars) -> Result<String, AppError> {
        let tmpl = self.env.get_template(template).map_err(|e| {
            AppError::Template(format!("Failed to load template '{}': {}", template, e))
        })?;
        tmpl.render(vars).map_err(|e| {
            AppError::Template(format!("Failed to render template '{}': {}", template, e))
        })
    }
}
