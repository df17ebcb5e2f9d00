//! Feed staging
//!
//! Rebuilds the feed tree the SDK's `src-link` feed points at. The tree is
//! thrown away and recreated on every run so nothing from an earlier build
//! leaks into the next one.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::manifest;
use crate::core::plan::BuildPlan;
use crate::error::StagingError;
use crate::infra::filesystem;

/// What was staged
#[derive(Debug, Default)]
pub struct StagedFeed {
    /// Directory holding the package inside the feed
    pub package_dir: PathBuf,
    /// Descriptor files copied, by name
    pub descriptors: Vec<String>,
    /// Source trees copied, by name
    pub trees: Vec<String>,
}

/// Stage the plan's package into its feed directory
pub fn stage(plan: &BuildPlan) -> Result<StagedFeed, StagingError> {
    let sources: Vec<&str> = plan.sources().iter().map(String::as_str).collect();
    stage_into(plan.root(), &plan.feed_dir(), &plan.feed_package_dir(), &sources)
}

/// Stage descriptors and `sources` from `root` into `package_dir` below `feed_dir`.
///
/// `feed_dir` is removed entirely first. Every entry of `sources` must be a
/// plain directory name below `root`.
pub fn stage_into(
    root: &Path,
    feed_dir: &Path,
    package_dir: &Path,
    sources: &[&str],
) -> Result<StagedFeed, StagingError> {
    if let Some(tree) = sources
        .iter()
        .find(|tree| manifest::validate_component("sources", tree).is_err())
    {
        return Err(StagingError::InvalidSourceTree {
            name: (*tree).to_string(),
        });
    }

    tracing::debug!("Removing feed tree {}", feed_dir.display());
    filesystem::remove_dir_all(feed_dir)?;
    filesystem::create_dir_all(package_dir)?;

    let mut staged = StagedFeed {
        package_dir: package_dir.to_path_buf(),
        ..StagedFeed::default()
    };

    for name in defaults::REQUIRED_DESCRIPTORS {
        let src = root.join(name);
        if !src.is_file() {
            return Err(StagingError::MissingInput { path: src });
        }
        filesystem::copy_file(&src, &package_dir.join(name))?;
        staged.descriptors.push((*name).to_string());
    }

    for name in defaults::OPTIONAL_DESCRIPTORS {
        let src = root.join(name);
        if src.is_file() {
            filesystem::copy_file(&src, &package_dir.join(name))?;
            staged.descriptors.push((*name).to_string());
        } else {
            tracing::debug!("Optional descriptor {} not present, skipping", src.display());
        }
    }

    for tree in sources {
        let src = root.join(tree);
        if !src.is_dir() {
            return Err(StagingError::MissingInput { path: src });
        }
        filesystem::copy_dir(&src, &package_dir.join(tree))?;
        staged.trees.push((*tree).to_string());
    }

    tracing::info!(
        "Staged {} descriptor(s) and {} source tree(s) into {}",
        staged.descriptors.len(),
        staged.trees.len(),
        package_dir.display()
    );
    Ok(staged)
}
