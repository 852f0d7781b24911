//! Create-factory command: write a factory class and register it.

use crate::app::AppContext;
use crate::app::services::{
    ConfigInjector, FactoryClassGenerator, GeneratedFactory, InjectionOutcome,
};
use crate::domain::{AppError, ClassName};
use crate::ports::{ProjectFilesystem, TemplateRenderer};

/// Options for `create-factory`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateFactoryOptions {
    /// Fully-qualified class name the factory builds.
    pub class: String,
    /// Skip registration in the dependency aggregation file.
    pub no_register: bool,
    /// Overwrite an existing factory file.
    pub force: bool,
}

/// Outcome of `create-factory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFactoryOutcome {
    pub factory: GeneratedFactory,
    /// `None` when registration was skipped.
    pub registration: Option<InjectionOutcome>,
}

/// Write the factory file for `class`.
pub fn generate<F, T>(
    ctx: &AppContext<F, T>,
    class: &ClassName,
    force: bool,
) -> Result<GeneratedFactory, AppError>
where
    F: ProjectFilesystem,
    T: TemplateRenderer,
{
    let generator = FactoryClassGenerator::new(
        ctx.filesystem(),
        ctx.templates(),
        ctx.resolver(),
        &ctx.config().factory.suffix,
    );
    generator.create_for_class(class, force)
}

/// Register an already written factory.
///
/// Failures are reported as `RegistrationFailed` so the caller knows the
/// factory file exists even though the configuration was not updated.
pub fn register<F, T>(
    ctx: &AppContext<F, T>,
    factory: &GeneratedFactory,
) -> Result<InjectionOutcome, AppError>
where
    F: ProjectFilesystem,
    T: TemplateRenderer,
{
    ConfigInjector::new(ctx.filesystem(), &ctx.config().injector)
        .inject_factory_for_class(&factory.factory, &factory.class)
        .map_err(|source| AppError::RegistrationFailed {
            factory_path: factory.path.clone(),
            source: Box::new(source),
        })
}

/// Generate the factory and, unless disabled, register it.
pub fn execute<F, T>(
    ctx: &AppContext<F, T>,
    options: &CreateFactoryOptions,
) -> Result<CreateFactoryOutcome, AppError>
where
    F: ProjectFilesystem,
    T: TemplateRenderer,
{
    let class = ClassName::new(&options.class)?;
    let factory = generate(ctx, &class, options.force)?;
    let registration = if options.no_register { None } else { Some(register(ctx, &factory)?) };
    Ok(CreateFactoryOutcome { factory, registration })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::adapters::EmbeddedTemplates;
    use crate::domain::{EntryChange, PathResolver, ToolConfig};
    use crate::testing::MemoryFilesystem;

    const CONFIG: &str = "/project/config/autoload/dependencies.global.php";

    fn context() -> AppContext<MemoryFilesystem, EmbeddedTemplates> {
        let fs = MemoryFilesystem::new("/project");
        let templates = EmbeddedTemplates::new().expect("templates load");
        let resolver = PathResolver::new().with_mapping(r"App\", "/project/src/App");
        AppContext::new(fs, templates, ToolConfig::default(), resolver)
    }

    fn options(class: &str) -> CreateFactoryOptions {
        CreateFactoryOptions { class: class.to_string(), ..CreateFactoryOptions::default() }
    }

    #[test]
    fn creates_and_registers() {
        let ctx = context();
        let outcome = execute(&ctx, &options(r"App\Handler\HomePageHandler")).expect("succeeds");

        assert_eq!(outcome.factory.path, Path::new("/project/src/App/Handler/HomePageHandlerFactory.php"));
        let registration = outcome.registration.expect("registered");
        assert_eq!(registration.change, EntryChange::Inserted);
        let config = ctx.filesystem().contents(Path::new(CONFIG)).expect("config written");
        assert!(config.contains(
            r"App\Handler\HomePageHandler::class => App\Handler\HomePageHandlerFactory::class,"
        ));
    }

    #[test]
    fn no_register_leaves_config_alone() {
        let ctx = context();
        let outcome = execute(&ctx, &CreateFactoryOptions { no_register: true, ..options(r"App\Ping") })
            .expect("succeeds");

        assert!(outcome.registration.is_none());
        assert_eq!(ctx.filesystem().paths(), vec![Path::new("/project/src/App/PingFactory.php").to_path_buf()]);
    }

    #[test]
    fn registration_failure_keeps_factory_and_says_so() {
        let ctx = context();
        ctx.filesystem().insert(Path::new(CONFIG), "<?php\nreturn [\n    'dependencies' => (\n];\n");

        let err = execute(&ctx, &options(r"App\Ping")).expect_err("config is malformed");
        match &err {
            AppError::RegistrationFailed { factory_path, source } => {
                assert_eq!(factory_path, Path::new("/project/src/App/PingFactory.php"));
                assert!(matches!(**source, AppError::InvalidConfigFile { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("was created"));
        assert!(ctx.filesystem().contents(Path::new("/project/src/App/PingFactory.php")).is_some());
    }

    #[test]
    fn invalid_class_name_touches_nothing() {
        let ctx = context();
        assert!(matches!(execute(&ctx, &options("App/Ping")), Err(AppError::InvalidClassName(_))));
        assert!(ctx.filesystem().paths().is_empty());
    }

    #[test]
    fn existing_factory_stops_before_registration() {
        let ctx = context();
        ctx.filesystem().insert(Path::new("src/App/PingFactory.php"), "<?php\n");

        assert!(matches!(execute(&ctx, &options(r"App\Ping")), Err(AppError::FileAlreadyExists(_))));
        assert!(ctx.filesystem().contents(Path::new(CONFIG)).is_none());
    }
}
