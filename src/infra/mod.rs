//! Infrastructure layer
//!
//! Handles all I/O operations: network, filesystem, external processes and
//! the container engine. This module is the only place where side effects occur.

pub mod docker;
pub mod download;
pub mod executor;
pub mod extract;
pub mod feed;
pub mod filesystem;
pub mod image;
pub mod sandbox;
pub mod toolchain;
