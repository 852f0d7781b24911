//! CLI Adapter.

mod create_factory;
mod create_module;
mod telemetry;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::commands::create_module::DEFAULT_MODULES_PATH;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "facgen")]
#[command(version)]
#[command(
    about = "Scaffold PHP factory classes and register them with the DI container",
    long_about = None
)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Run as if started in <DIR>
    #[arg(short = 'C', long = "project-dir", value_name = "DIR", global = true)]
    project_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a factory class file for the named class
    ///
    /// The factory is written in the same directory as the class and, unless
    /// --no-register is given, registered under dependencies.factories.
    #[clap(visible_alias = "factory:create")]
    CreateFactory {
        /// Fully qualified class name; quote it so the shell keeps the backslashes
        class: String,
        /// Do not register the factory with the container
        #[arg(long)]
        no_register: bool,
        /// Overwrite an existing factory file
        #[arg(short, long)]
        force: bool,
    },
    /// Create a module with a ConfigProvider and a templates directory
    #[clap(visible_alias = "module:create")]
    CreateModule {
        /// Module name (a single namespace segment)
        name: String,
        /// Directory the module is created in, relative to the project root
        #[arg(long, default_value = DEFAULT_MODULES_PATH)]
        modules_path: String,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let result: Result<(), AppError> =
        project_root(cli.project_dir).and_then(|root| match cli.command {
            Commands::CreateFactory { class, no_register, force } => {
                create_factory::run_create_factory(root, class, no_register, force)
            }
            Commands::CreateModule { name, modules_path } => {
                create_module::run_create_module(root, name, modules_path)
            }
        });

    if let Err(e) = result {
        eprintln!("Error ({}): {}", e.kind_label(), e);
        std::process::exit(1);
    }
}

fn project_root(project_dir: Option<PathBuf>) -> Result<PathBuf, AppError> {
    let cwd = std::env::current_dir()?;
    let root = match project_dir {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    if !root.is_dir() {
        return Err(AppError::NotFound(root));
    }
    Ok(root)
}
