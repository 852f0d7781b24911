mod config_injector;
mod factory_generator;

pub use config_injector::{ConfigInjector, FACTORIES_SECTION, InjectionOutcome};
pub use factory_generator::{FactoryClassGenerator, GeneratedFactory};
