//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{defaults, urls};
use crate::core::selector::Selector;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

/// Feedsmith - cross-compile firmware packages against OpenWrt SDKs
///
/// Resolves a build profile from builds.toml, provisions the matching SDK,
/// stages the package as a feed and compiles it inside a Docker container.
#[derive(Parser, Debug)]
#[command(name = "feedsmith")]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Profile to build: `architecture` or `architecture:subtarget`
    #[arg(value_name = "SELECTOR", required_unless_present = "list")]
    pub selector: Option<Selector>,

    /// Run make single-threaded with verbose output
    #[arg(long)]
    pub debug: bool,

    /// List configured build profiles and exit
    #[arg(long)]
    pub list: bool,

    /// Print the profile list as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Project root holding the manifest, descriptors and sources
    #[arg(long, env = "FEEDSMITH_PROJECT_ROOT", default_value = ".")]
    pub project_root: PathBuf,

    /// Manifest path [default: <PROJECT_ROOT>/builds.toml]
    #[arg(long, env = "FEEDSMITH_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Base URL SDK archives are downloaded from
    #[arg(long, env = "FEEDSMITH_SDK_MIRROR", default_value = urls::OPENWRT_RELEASES)]
    pub sdk_mirror: String,

    /// Builder image [default: <PACKAGE>-package-builder:latest]
    #[arg(long, env = "FEEDSMITH_IMAGE")]
    pub image: Option<String>,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Manifest location after applying the project root default
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| self.project_root.join(defaults::MANIFEST_FILE))
    }

    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let manifest = self.manifest_path();
        if self.list {
            return commands::list::execute(&manifest, self.json);
        }

        let Some(selector) = self.selector else {
            anyhow::bail!("A build selector is required");
        };
        let options = commands::build::BuildOptions {
            selector,
            manifest,
            project_root: self.project_root,
            debug: self.debug,
            sdk_mirror: self.sdk_mirror,
            image: self.image,
        };
        commands::build::execute(options).await
    }
}
