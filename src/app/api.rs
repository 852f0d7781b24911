//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::PathBuf;

use crate::adapters::{EmbeddedTemplates, LocalFilesystem};
use crate::app::{
    AppContext,
    commands::{create_factory, create_module},
};

pub use crate::app::commands::create_factory::{CreateFactoryOptions, CreateFactoryOutcome};
pub use crate::app::commands::create_module::{
    CreateModuleOptions, CreateModuleOutcome, DEFAULT_MODULES_PATH,
};
pub use crate::app::services::{GeneratedFactory, InjectionOutcome};
pub use crate::domain::AppError;

/// Context for the project rooted at `root`.
pub(crate) fn create_context(
    root: impl Into<PathBuf>,
) -> Result<AppContext<LocalFilesystem, EmbeddedTemplates>, AppError> {
    let filesystem = LocalFilesystem::new(root.into());
    let templates = EmbeddedTemplates::new()?;
    AppContext::load(filesystem, templates)
}

// =============================================================================
// Create Factory API
// =============================================================================

/// Create (and register) a factory in the current directory's project.
pub fn create_factory(options: &CreateFactoryOptions) -> Result<CreateFactoryOutcome, AppError> {
    create_factory_at(options, std::env::current_dir()?)
}

/// Create (and register) a factory in the project at `root`.
pub fn create_factory_at(
    options: &CreateFactoryOptions,
    root: impl Into<PathBuf>,
) -> Result<CreateFactoryOutcome, AppError> {
    let ctx = create_context(root)?;
    create_factory::execute(&ctx, options)
}

// =============================================================================
// Create Module API
// =============================================================================

/// Scaffold a module in the current directory's project.
pub fn create_module(options: &CreateModuleOptions) -> Result<CreateModuleOutcome, AppError> {
    create_module_at(options, std::env::current_dir()?)
}

/// Scaffold a module in the project at `root`.
pub fn create_module_at(
    options: &CreateModuleOptions,
    root: impl Into<PathBuf>,
) -> Result<CreateModuleOutcome, AppError> {
    let ctx = create_context(root)?;
    create_module::execute(&ctx, options)
}
