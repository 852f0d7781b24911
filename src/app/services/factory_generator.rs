//! Factory class generation.

use std::path::PathBuf;

use tracing::info;

use crate::domain::{AppError, ClassName, PathResolver};
use crate::ports::{FACTORY_TEMPLATE, ProjectFilesystem, TemplateRenderer, TemplateVars};

/// A factory file written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFactory {
    /// Class the factory builds.
    pub class: ClassName,
    /// Fully-qualified factory class name.
    pub factory: ClassName,
    /// Absolute path of the written file.
    pub path: PathBuf,
}

/// Writes a factory class next to the class it builds.
pub struct FactoryClassGenerator<'a, F: ProjectFilesystem, T: TemplateRenderer> {
    filesystem: &'a F,
    templates: &'a T,
    resolver: &'a PathResolver,
    suffix: &'a str,
}

impl<'a, F: ProjectFilesystem, T: TemplateRenderer> FactoryClassGenerator<'a, F, T> {
    pub fn new(
        filesystem: &'a F,
        templates: &'a T,
        resolver: &'a PathResolver,
        suffix: &'a str,
    ) -> Self {
        Self { filesystem, templates, resolver, suffix }
    }

    /// Render and write the factory for `class`.
    ///
    /// Fails with `FileAlreadyExists` when the factory file is present and
    /// `overwrite` is false; nothing is written in that case.
    pub fn create_for_class(
        &self,
        class: &ClassName,
        overwrite: bool,
    ) -> Result<GeneratedFactory, AppError> {
        let factory = class.with_suffix(self.suffix);
        let path = self.resolver.factory_path(class, self.suffix)?;

        if !overwrite && self.filesystem.file_exists(&path) {
            return Err(AppError::FileAlreadyExists(path));
        }

        let content = self.templates.render(FACTORY_TEMPLATE, &template_vars(class, &factory))?;
        self.filesystem.write_file(&path, &content)?;
        info!(class = %class, path = %path.display(), "wrote factory class");

        Ok(GeneratedFactory { class: class.clone(), factory, path })
    }
}

fn template_vars(class: &ClassName, factory: &ClassName) -> TemplateVars {
    let mut vars = TemplateVars::new();
    vars.insert("namespace", class.namespace().unwrap_or_default().to_string());
    vars.insert("class", class.short_name().to_string());
    vars.insert("factory", factory.short_name().to_string());
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::templates::EmbeddedTemplates;
    use crate::testing::MemoryFilesystem;
    use std::path::Path;

    fn setup() -> (MemoryFilesystem, EmbeddedTemplates, PathResolver) {
        let fs = MemoryFilesystem::new("/project");
        let templates = EmbeddedTemplates::new().expect("templates load");
        let resolver = PathResolver::new().with_mapping(r"App\", "/project/src/App");
        (fs, templates, resolver)
    }

    #[test]
    fn writes_factory_next_to_class() {
        let (fs, templates, resolver) = setup();
        let generator = FactoryClassGenerator::new(&fs, &templates, &resolver, "Factory");
        let class = ClassName::new(r"App\Handler\HomePageHandler").expect("valid");

        let generated = generator.create_for_class(&class, false).expect("generates");

        assert_eq!(generated.path, Path::new("/project/src/App/Handler/HomePageHandlerFactory.php"));
        assert_eq!(generated.factory.as_str(), r"App\Handler\HomePageHandlerFactory");
        let content = fs.contents(&generated.path).expect("file written");
        assert!(content.contains("namespace App\\Handler;"));
        assert!(content.contains("class HomePageHandlerFactory"));
        assert!(content.contains("return new HomePageHandler();"));
    }

    #[test]
    fn existing_factory_is_not_overwritten() {
        let (fs, templates, resolver) = setup();
        let path = Path::new("/project/src/App/PingFactory.php");
        fs.insert(path, "<?php // hand-written\n");
        let generator = FactoryClassGenerator::new(&fs, &templates, &resolver, "Factory");
        let class = ClassName::new(r"App\Ping").expect("valid");

        let err = generator.create_for_class(&class, false).expect_err("refuses overwrite");
        assert!(matches!(err, AppError::FileAlreadyExists(p) if p == path));
        assert_eq!(fs.contents(path).as_deref(), Some("<?php // hand-written\n"));

        generator.create_for_class(&class, true).expect("overwrites when asked");
        assert!(fs.contents(path).expect("exists").contains("class PingFactory"));
    }

    #[test]
    fn unmapped_namespace_writes_nothing() {
        let (fs, templates, resolver) = setup();
        let generator = FactoryClassGenerator::new(&fs, &templates, &resolver, "Factory");
        let class = ClassName::new(r"Other\Ping").expect("valid");

        assert!(matches!(generator.create_for_class(&class, false), Err(AppError::UnresolvablePath(_))));
        assert!(fs.paths().is_empty());
    }

    #[test]
    fn honours_custom_suffix() {
        let (fs, templates, resolver) = setup();
        let generator = FactoryClassGenerator::new(&fs, &templates, &resolver, "Builder");
        let class = ClassName::new(r"App\Ping").expect("valid");

        let generated = generator.create_for_class(&class, false).expect("generates");
        assert_eq!(generated.path, Path::new("/project/src/App/PingBuilder.php"));
        assert!(fs.contents(&generated.path).expect("exists").contains("class PingBuilder"));
    }
}
