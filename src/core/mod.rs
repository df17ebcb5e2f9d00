//! Core business logic module
//!
//! Everything here is pure: no network, no containers, no file writes.
//! Side effects live in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`manifest`] - Manifest (builds.toml) parsing
//! - [`selector`] - `arch[:subtarget]` selector parsing
//! - [`resolver`] - Profile resolution
//! - [`sdk`] - SDK archive naming, URLs and cache keys
//! - [`recipe`] - In-container build steps
//! - [`plan`] - The resolved, immutable build plan

pub mod manifest;
pub mod plan;
pub mod recipe;
pub mod resolver;
pub mod sdk;
pub mod selector;
