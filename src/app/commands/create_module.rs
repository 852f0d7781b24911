//! Create-module command: scaffold a module with its `ConfigProvider`.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::AppContext;
use crate::domain::{AppError, ModuleMetadata};
use crate::ports::{CONFIG_PROVIDER_TEMPLATE, ProjectFilesystem, TemplateRenderer, TemplateVars};

/// Default directory modules are created in, relative to the project root.
pub const DEFAULT_MODULES_PATH: &str = "src";

const MODULE_SOURCE_PATH: &str = "./src";
const CONFIG_PROVIDER_FILE: &str = "ConfigProvider.php";

/// Options for `create-module`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateModuleOptions {
    pub name: String,
    /// Parent directory of the module, relative to the project root.
    pub modules_path: String,
}

impl CreateModuleOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), modules_path: DEFAULT_MODULES_PATH.to_string() }
    }
}

/// Outcome of `create-module`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateModuleOutcome {
    pub module: ModuleMetadata,
    /// Absolute path of the written `ConfigProvider.php`.
    pub config_provider: PathBuf,
    /// Source directory relative to the project root, with a trailing `/`.
    pub autoload_dir: String,
}

impl CreateModuleOutcome {
    /// `"Name\\": "dir/"`, ready to paste into composer's `autoload.psr-4`.
    pub fn composer_autoload_entry(&self) -> Result<String, AppError> {
        let render = |value: &str| {
            serde_json::to_string(value).map_err(|e| AppError::ParseError {
                what: "autoload entry".to_string(),
                details: e.to_string(),
            })
        };
        Ok(format!("{}: {}", render(&format!("{}\\", self.module.name()))?, render(&self.autoload_dir)?))
    }

    /// Class to add to the application's config aggregator.
    pub fn config_provider_class(&self) -> String {
        format!("{}\\ConfigProvider", self.module.name())
    }
}

pub fn execute<F, T>(
    ctx: &AppContext<F, T>,
    options: &CreateModuleOptions,
) -> Result<CreateModuleOutcome, AppError>
where
    F: ProjectFilesystem,
    T: TemplateRenderer,
{
    let fs = ctx.filesystem();
    let modules_path = options.modules_path.strip_prefix("./").unwrap_or(&options.modules_path);
    let relative_root = Path::new(modules_path).join(&options.name);
    let module =
        ModuleMetadata::validated(&options.name, fs.resolve_path(&relative_root), MODULE_SOURCE_PATH)?;

    if fs.file_exists(module.root_path()) {
        return Err(AppError::FileAlreadyExists(module.root_path().to_path_buf()));
    }

    let mut vars = TemplateVars::new();
    vars.insert("module", module.name().to_string());
    vars.insert("template_namespace", module.name().to_lowercase());
    let content = ctx.templates().render(CONFIG_PROVIDER_TEMPLATE, &vars)?;

    let config_provider = module.source_dir().join(CONFIG_PROVIDER_FILE);
    fs.write_file(&config_provider, &content)?;
    fs.write_file(&module.root_path().join("templates").join(".gitkeep"), "")?;
    info!(module = module.name(), path = %module.root_path().display(), "created module");

    let autoload_dir = format!("{}/", relative_root.join(module.source_path()).display());
    Ok(CreateModuleOutcome { module, config_provider, autoload_dir })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::EmbeddedTemplates;
    use crate::domain::{PathResolver, ToolConfig};
    use crate::testing::MemoryFilesystem;

    fn context() -> AppContext<MemoryFilesystem, EmbeddedTemplates> {
        AppContext::new(
            MemoryFilesystem::new("/project"),
            EmbeddedTemplates::new().expect("templates load"),
            ToolConfig::default(),
            PathResolver::new(),
        )
    }

    #[test]
    fn scaffolds_module() {
        let ctx = context();
        let outcome = execute(&ctx, &CreateModuleOptions::new("Blog")).expect("creates module");

        assert_eq!(outcome.module.root_path(), Path::new("/project/src/Blog"));
        assert_eq!(outcome.module.source_path(), "src");
        assert_eq!(outcome.config_provider, Path::new("/project/src/Blog/src/ConfigProvider.php"));
        let provider = ctx.filesystem().contents(&outcome.config_provider).expect("written");
        assert!(provider.contains("namespace Blog;"));
        assert!(provider.contains("'blog' => [__DIR__ . '/../templates/'],"));
        assert_eq!(ctx.filesystem().contents(Path::new("/project/src/Blog/templates/.gitkeep")).as_deref(), Some(""));
    }

    #[test]
    fn autoload_hint_is_valid_json_fragment() {
        let ctx = context();
        let outcome = execute(
            &ctx,
            &CreateModuleOptions { name: "Blog".into(), modules_path: "./modules".into() },
        )
        .expect("creates module");

        assert_eq!(outcome.autoload_dir, "modules/Blog/src/");
        assert_eq!(outcome.composer_autoload_entry().expect("renders"), r#""Blog\\": "modules/Blog/src/""#);
        assert_eq!(outcome.config_provider_class(), r"Blog\ConfigProvider");
    }

    #[test]
    fn existing_module_is_refused() {
        let ctx = context();
        ctx.filesystem().insert(Path::new("src/Blog/README.md"), "mine");

        let err = execute(&ctx, &CreateModuleOptions::new("Blog")).expect_err("exists");
        assert!(matches!(err, AppError::FileAlreadyExists(p) if p == Path::new("/project/src/Blog")));
        assert_eq!(ctx.filesystem().paths().len(), 1);
    }

    #[test]
    fn module_name_must_be_one_segment() {
        let ctx = context();
        assert!(matches!(
            execute(&ctx, &CreateModuleOptions::new(r"Blog\Admin")),
            Err(AppError::InvalidModuleName(_))
        ));
    }
}
