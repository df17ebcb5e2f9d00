//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod list;
