//! Registration of factories in the dependency aggregation file.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{
    AppError, ClassName, ConfigDocument, ConfigLiteral, EntryChange, InjectorSettings, SectionPath,
};
use crate::ports::ProjectFilesystem;

/// Section holding `Class::class => Factory::class` entries.
pub const FACTORIES_SECTION: [&str; 2] = ["dependencies", "factories"];

/// Result of registering one factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionOutcome {
    /// Absolute path of the aggregation file.
    pub path: PathBuf,
    pub change: EntryChange,
    /// The file did not exist and was started from an empty array.
    pub created_file: bool,
}

impl InjectionOutcome {
    /// Whether the file on disk was (re)written.
    pub fn written(&self) -> bool {
        self.created_file || self.change != EntryChange::Unchanged
    }
}

/// Edits the aggregation file through a [`ProjectFilesystem`].
pub struct ConfigInjector<'a, F: ProjectFilesystem> {
    filesystem: &'a F,
    settings: &'a InjectorSettings,
}

impl<'a, F: ProjectFilesystem> ConfigInjector<'a, F> {
    pub fn new(filesystem: &'a F, settings: &'a InjectorSettings) -> Self {
        Self { filesystem, settings }
    }

    /// Absolute path of the aggregation file.
    pub fn config_path(&self) -> PathBuf {
        self.filesystem.resolve_path(Path::new(&self.settings.config_file))
    }

    /// Register `target::class => factory::class` under `dependencies.factories`.
    ///
    /// Re-registering the same pair leaves an existing file byte-for-byte
    /// untouched. A different factory for the same class replaces the value.
    pub fn inject_factory_for_class(
        &self,
        factory: &ClassName,
        target: &ClassName,
    ) -> Result<InjectionOutcome, AppError> {
        let path = self.config_path();
        let mut document = self.load(&path)?;

        let section = SectionPath::new(FACTORIES_SECTION);
        let change = document
            .set_entry(
                &section,
                &ConfigLiteral::class_ref(target),
                &ConfigLiteral::class_ref(factory),
            )
            .map_err(|source| AppError::InvalidConfigFile { path: path.clone(), source })?;

        let outcome = InjectionOutcome { path, change, created_file: document.is_created() };
        if !outcome.written() {
            warn!(
                path = %outcome.path.display(),
                class = %target,
                "factory already registered, file left untouched"
            );
            return Ok(outcome);
        }

        self.filesystem.write_file(&outcome.path, document.render())?;
        info!(
            path = %outcome.path.display(),
            class = %target,
            factory = %factory,
            change = ?outcome.change,
            created = outcome.created_file,
            "registered factory"
        );
        Ok(outcome)
    }

    fn load(&self, path: &Path) -> Result<ConfigDocument, AppError> {
        if !self.filesystem.file_exists(path) {
            if !self.settings.create_missing {
                return Err(AppError::ConfigFileNotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "aggregation file missing, starting from an empty array");
            return Ok(ConfigDocument::create_empty());
        }
        ConfigDocument::load(self.filesystem, path)
    }
}
