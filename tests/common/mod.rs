//! Shared testing utilities for facgen CLI tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEPENDENCIES_FILE: &str = "config/autoload/dependencies.global.php";

/// Testing harness providing an isolated PHP project for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create an empty project directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Create a project whose composer.json maps `App\` to `src/App/`.
    pub fn with_app_namespace() -> Self {
        let ctx = Self::new();
        ctx.write(
            "composer.json",
            r#"{
    "name": "acme/app",
    "autoload": {
        "psr-4": {
            "App\\": "src/App/"
        }
    }
}
"#,
        );
        ctx
    }

    /// Path to the project root.
    pub fn project(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of a project file.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Build a command for invoking the compiled `facgen` binary in the project.
    pub fn cli(&self) -> Command {
        self.cli_in(self.project())
    }

    /// Build a command for invoking the compiled `facgen` binary within a custom directory.
    pub fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("facgen").expect("Failed to locate facgen binary");
        cmd.current_dir(dir.as_ref()).env_remove("FACGEN_LOG");
        cmd
    }

    pub fn write(&self, relative: &str, content: &str) {
        self.root.child(relative).write_str(content).expect("Failed to write fixture");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Contents of the dependency aggregation file.
    pub fn dependencies(&self) -> String {
        self.read(DEPENDENCIES_FILE)
    }

    pub fn assert_exists(&self, relative: &str) {
        self.root.child(relative).assert(predicates::path::exists());
    }

    pub fn assert_missing(&self, relative: &str) {
        self.root.child(relative).assert(predicates::path::missing());
    }
}
