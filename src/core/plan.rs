//! Build plan
//!
//! The single resolved configuration every pipeline stage reads from. It is
//! built once after profile resolution and never mutated.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::manifest::{self, BuildProfile, PackageConfig};
use crate::core::recipe::BuildRecipe;
use crate::core::sdk::SdkRelease;
use crate::error::ManifestError;

/// Options the user can set on top of the manifest
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Verbose single-job `make`
    pub debug: bool,
    /// SDK download mirror
    pub sdk_mirror: String,
    /// Builder image override
    pub image: Option<String>,
}

/// Everything one build needs, resolved up front
#[derive(Debug, Clone)]
pub struct BuildPlan {
    root: PathBuf,
    profile: BuildProfile,
    package: String,
    category: String,
    sources: Vec<String>,
    sdk: SdkRelease,
    sdk_mirror: String,
    image: String,
    debug: bool,
}

impl BuildPlan {
    /// Resolve a plan for `profile` in the project at `root`.
    ///
    /// The package name falls back to the directory name of `root` and is
    /// held to the same rules as a name given in the manifest.
    pub fn new(
        root: &Path,
        profile: &BuildProfile,
        package: &PackageConfig,
        options: PlanOptions,
    ) -> Result<Self, ManifestError> {
        package.validate()?;
        let name = package.name.clone().unwrap_or_else(|| {
            root.file_name()
                .map_or_else(|| "package".to_string(), |n| n.to_string_lossy().into_owned())
        });
        manifest::validate_package_name(&name)?;
        let image = options
            .image
            .unwrap_or_else(|| format!("{name}{}", defaults::BUILDER_IMAGE_SUFFIX));

        Ok(Self {
            root: root.to_path_buf(),
            profile: profile.clone(),
            category: package.category.clone(),
            sources: package.sources.clone(),
            sdk: SdkRelease::for_profile(profile),
            sdk_mirror: options.sdk_mirror,
            package: name,
            image,
            debug: options.debug,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Package built inside the SDK
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Source trees staged into the feed
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn sdk(&self) -> &SdkRelease {
        &self.sdk
    }

    pub fn sdk_mirror(&self) -> &str {
        &self.sdk_mirror
    }

    /// Builder image name
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Directory holding every extracted SDK and in-flight archives
    pub fn sdk_base_dir(&self) -> PathBuf {
        self.root.join(defaults::SDK_DIR)
    }

    /// Cache slot of this profile's SDK
    pub fn sdk_dir(&self) -> PathBuf {
        self.sdk_base_dir().join(self.sdk.cache_key())
    }

    /// Root of the staged feed
    pub fn feed_dir(&self) -> PathBuf {
        self.root.join(defaults::FEED_DIR)
    }

    /// Where the package lives inside the feed
    pub fn feed_package_dir(&self) -> PathBuf {
        self.feed_dir().join(&self.category).join(&self.package)
    }

    /// Per-profile output directory
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(defaults::OUTPUT_DIR).join(self.profile.slot())
    }

    /// Dockerfile the builder image is built from
    pub fn dockerfile(&self) -> &'static str {
        defaults::BUILDER_DOCKERFILE
    }

    /// Commands run inside the container
    pub fn recipe(&self) -> BuildRecipe {
        BuildRecipe::new(&self.package, &self.profile.feeds_name, self.debug)
    }
}
