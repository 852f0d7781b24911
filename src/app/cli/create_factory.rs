use std::path::PathBuf;

use crate::app::api::create_context;
use crate::app::commands::create_factory;
use crate::domain::{AppError, ClassName};

pub(super) fn run_create_factory(
    root: PathBuf,
    class: String,
    no_register: bool,
    force: bool,
) -> Result<(), AppError> {
    let class = ClassName::new(&class)?;
    let ctx = create_context(root)?;

    println!("Creating factory for class {}...", class);
    let factory = create_factory::generate(&ctx, &class, force)?;

    let registration = if no_register {
        None
    } else {
        println!("Registering factory with container");
        Some(create_factory::register(&ctx, &factory)?)
    };

    println!("Success!");
    println!("- Created factory class {}, in file {}", factory.factory, factory.path.display());
    if let Some(outcome) = registration {
        if outcome.written() {
            println!("- Registered factory to container in file {}", outcome.path.display());
        } else {
            println!("- Factory was already registered in file {}", outcome.path.display());
        }
    }
    Ok(())
}
