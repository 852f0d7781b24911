pub mod create_factory;
pub mod create_module;
