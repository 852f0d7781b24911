use std::path::PathBuf;

use crate::app::api::{CreateModuleOptions, create_module_at};
use crate::domain::AppError;

pub(super) fn run_create_module(
    root: PathBuf,
    name: String,
    modules_path: String,
) -> Result<(), AppError> {
    println!("Creating module {}...", name);
    let outcome = create_module_at(&CreateModuleOptions { name, modules_path }, root)?;

    println!("Success!");
    println!(
        "- Created module {} in {}",
        outcome.module.name(),
        outcome.module.root_path().display()
    );
    println!("- Add this entry to \"autoload\".\"psr-4\" in composer.json, then run composer dump-autoload:");
    println!("    {}", outcome.composer_autoload_entry()?);
    println!("- Add {}::class to the application's config aggregator", outcome.config_provider_class());
    Ok(())
}
