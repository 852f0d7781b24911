//! facgen: scaffold PHP factory classes and register them in the
//! dependency-injection configuration of a Mezzio-style application.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    CreateFactoryOptions, CreateFactoryOutcome, CreateModuleOptions, CreateModuleOutcome,
    create_factory, create_factory_at, create_module, create_module_at,
};
pub use domain::{
    AppError, ClassName, ConfigDocument, ConfigError, ConfigLiteral, EntryChange, ModuleMetadata,
    PathResolver, SectionPath,
};
