//! Feedsmith - cross-compile firmware packages against OpenWrt SDKs
//!
//! This library resolves a build profile from a project manifest, provisions
//! the matching OpenWrt SDK, stages the project as an SDK feed and compiles
//! the package inside a Docker container.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (no I/O operations)
//! - [`infra`] - Infrastructure layer (network, filesystem, processes, containers)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
