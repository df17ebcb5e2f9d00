//! Configuration and constants
//!
//! - [`defaults`] - Project layout names, SDK naming and container mount points
//! - [`urls`] - Remote endpoints

pub mod defaults;
pub mod urls;
