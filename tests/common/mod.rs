//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Project with `builds.toml` set to `manifest`
    pub fn with_manifest(manifest: &str) -> Self {
        let project = Self::new();
        project.create_file("builds.toml", manifest);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Run feedsmith against this project with a scrubbed environment
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_feedsmith"))
            .current_dir(self.path())
            .env_remove("FEEDSMITH_PROJECT_ROOT")
            .env_remove("FEEDSMITH_MANIFEST")
            .env_remove("FEEDSMITH_SDK_MIRROR")
            .env_remove("FEEDSMITH_IMAGE")
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("Failed to execute feedsmith")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Manifest with two ARM profiles and one x86_64 profile
#[allow(dead_code)]
pub const SAMPLE_MANIFEST: &str = r#"
[package]
name = "demo-services"

[[builds]]
target = "ipq40xx"
subtarget = "mikrotik"
architecture = "arm"
codenames = ["hap-ac2"]
version = "23.05.2"
feedsName = "demo"

[[builds]]
target = "ipq40xx"
subtarget = "generic"
architecture = "arm"
version = "23.05.2"
feedsName = "demo"

[[builds]]
target = "x86"
subtarget = "64"
architecture = "x86_64"
version = "23.05.2"
feedsName = "demo"
"#;

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
