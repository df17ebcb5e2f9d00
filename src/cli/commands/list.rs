//! `feedsmith --list`
//!
//! Prints the build profiles declared in the manifest.

use anyhow::Result;
use std::path::Path;

use crate::core::manifest::{BuildProfile, Manifest};
use crate::error::FeedsmithError;

/// Execute the list command
pub fn execute(manifest_path: &Path, json: bool) -> Result<()> {
    let manifest = Manifest::load(manifest_path).map_err(FeedsmithError::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest.builds)?);
        return Ok(());
    }

    println!("Available build configurations:");
    for profile in &manifest.builds {
        println!("  - {}", describe(profile));
    }
    println!();
    println!("{} configuration(s) available.", manifest.builds.len());

    Ok(())
}

/// One listing line: summary plus release and codenames
fn describe(profile: &BuildProfile) -> String {
    let mut line = format!("{} [{}]", profile.summary(), profile.version);
    if !profile.codenames.is_empty() {
        line.push_str(&format!(" codenames: {}", profile.codenames.join(", ")));
    }
    line
}
