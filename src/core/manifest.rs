//! Manifest (builds.toml) parsing
//!
//! The manifest lists the build profiles a project can be compiled for, in
//! declaration order, plus an optional `[package]` table describing what gets
//! staged into the feed.
//!
//! ```toml
//! [package]
//! name = "fry-os-services"
//! sources = ["apps", "lib"]
//!
//! [[builds]]
//! target = "ipq40xx"
//! subtarget = "mikrotik"
//! architecture = "arm"
//! codenames = ["hap-ac2"]
//! version = "23.05.2"
//! feedsName = "fry"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

use crate::config::defaults;
use crate::error::ManifestError;

/// The project manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// What gets staged into the feed
    #[serde(default)]
    pub package: PackageConfig,

    /// Build profiles, in declaration order
    #[serde(default)]
    pub builds: Vec<BuildProfile>,
}

/// One build profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildProfile {
    /// SDK platform family (e.g. `ipq40xx`)
    pub target: String,

    /// Board variant within the family (e.g. `mikrotik`)
    pub subtarget: String,

    /// CPU/ABI identifier used by selectors (e.g. `arm`)
    pub architecture: String,

    /// Product release names this profile supports
    #[serde(default)]
    pub codenames: Vec<String>,

    /// SDK release version (e.g. `23.05.2`)
    pub version: String,

    /// Name the feed is registered under inside the SDK
    #[serde(rename = "feedsName")]
    pub feeds_name: String,
}

impl BuildProfile {
    /// `arch:subtarget (target=...)`, the form listed when resolution fails
    pub fn summary(&self) -> String {
        format!(
            "{}:{} (target={})",
            self.architecture, self.subtarget, self.target
        )
    }

    /// `arch_subtarget`, used to key per-profile directories
    pub fn slot(&self) -> String {
        format!("{}_{}", self.architecture, self.subtarget)
    }
}

/// The package staged into the feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageConfig {
    /// Package name; defaults to the project directory name
    #[serde(default)]
    pub name: Option<String>,

    /// Feed category directory
    #[serde(default = "default_category")]
    pub category: String,

    /// Source trees copied next to the descriptor files
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

fn default_category() -> String {
    defaults::DEFAULT_CATEGORY.to_string()
}

fn default_sources() -> Vec<String> {
    defaults::DEFAULT_SOURCE_TREES
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: None,
            category: default_category(),
            sources: default_sources(),
        }
    }
}

impl PackageConfig {
    /// Check every value is usable as a path component below `feed/`
    pub fn validate(&self) -> Result<(), ManifestError> {
        if let Some(name) = &self.name {
            validate_package_name(name)?;
        }
        validate_component("category", &self.category)?;
        for tree in &self.sources {
            validate_component("sources", tree)?;
        }
        Ok(())
    }
}

/// `value` must be exactly one normal path component
pub fn validate_component(field: &str, value: &str) -> Result<(), ManifestError> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid_field(
            field,
            value,
            "must be a single directory name".to_string(),
        )),
    }
}

/// Package names end up in feed paths, image tags and the build script.
///
/// Only ASCII letters, digits and `-_.+` are accepted.
pub fn validate_package_name(name: &str) -> Result<(), ManifestError> {
    validate_component("name", name)?;
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+')))
    {
        return Err(invalid_field(
            "name",
            name,
            format!("character {c:?} is not allowed"),
        ));
    }
    Ok(())
}

fn invalid_field(field: &str, value: &str, reason: String) -> ManifestError {
    ManifestError::InvalidPackageField {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    }
}

impl Manifest {
    /// Load manifest from file path
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Load manifest from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| ManifestError::ParseError(e.to_string()))?;
        if manifest.builds.is_empty() {
            return Err(ManifestError::NoProfiles);
        }
        manifest.package.validate()?;
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PROFILES: &str = r#"
[[builds]]
target = "ipq40xx"
subtarget = "mikrotik"
architecture = "arm"
codenames = ["hap-ac2", "hap-ac3"]
version = "23.05.2"
feedsName = "fry"

[[builds]]
target = "ramips"
subtarget = "mt7621"
architecture = "mipsel"
version = "23.05.2"
feedsName = "fry"
"#;

    #[test]
    fn test_manifest_preserves_declaration_order() {
        let manifest = Manifest::from_toml(TWO_PROFILES).unwrap();
        assert_eq!(manifest.builds.len(), 2);
        assert_eq!(manifest.builds[0].architecture, "arm");
        assert_eq!(manifest.builds[1].architecture, "mipsel");
        assert_eq!(manifest.builds[0].codenames, vec!["hap-ac2", "hap-ac3"]);
        assert_eq!(manifest.builds[0].feeds_name, "fry");
    }

    #[test]
    fn test_manifest_codenames_default_to_empty() {
        let manifest = Manifest::from_toml(TWO_PROFILES).unwrap();
        assert!(manifest.builds[1].codenames.is_empty());
    }

    #[test]
    fn test_manifest_package_defaults() {
        let manifest = Manifest::from_toml(TWO_PROFILES).unwrap();
        assert_eq!(manifest.package.name, None);
        assert_eq!(manifest.package.category, "admin");
        assert_eq!(manifest.package.sources, vec!["apps", "lib"]);
    }

    #[test]
    fn test_manifest_package_table() {
        let content = format!(
            "[package]\nname = \"fry-os-services\"\nsources = [\"src\"]\n{TWO_PROFILES}"
        );
        let manifest = Manifest::from_toml(&content).unwrap();
        assert_eq!(manifest.package.name.as_deref(), Some("fry-os-services"));
        assert_eq!(manifest.package.sources, vec!["src"]);
        assert_eq!(manifest.package.category, "admin");
    }

    fn with_package(table: &str) -> Result<Manifest, ManifestError> {
        Manifest::from_toml(&format!("[package]\n{table}\n{TWO_PROFILES}"))
    }

    fn rejected_field(table: &str) -> String {
        match with_package(table).unwrap_err() {
            ManifestError::InvalidPackageField { field, .. } => field,
            e => panic!("Expected InvalidPackageField, got: {e:?}"),
        }
    }

    #[test]
    fn test_manifest_rejects_absolute_source_tree() {
        assert_eq!(rejected_field("sources = [\"apps\", \"/srv/shared-src\"]"), "sources");
    }

    #[test]
    fn test_manifest_rejects_parent_paths() {
        assert_eq!(rejected_field("name = \"../../elsewhere\""), "name");
        assert_eq!(rejected_field("sources = [\"..\"]"), "sources");
        assert_eq!(rejected_field("category = \"../admin\""), "category");
    }

    #[test]
    fn test_manifest_rejects_nested_values() {
        assert_eq!(rejected_field("category = \"utils/net\""), "category");
        assert_eq!(rejected_field("sources = [\"./apps\"]"), "sources");
        assert_eq!(rejected_field("sources = [\"\"]"), "sources");
    }

    #[test]
    fn test_manifest_rejects_name_with_whitespace_or_shell_syntax() {
        assert_eq!(rejected_field("name = \"my services\""), "name");
        assert_eq!(rejected_field("name = \"pkg;reboot\""), "name");
        assert_eq!(rejected_field("name = \"$(id)\""), "name");

        let err = with_package("name = \"my services\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid package name 'my services': character ' ' is not allowed"
        );
    }

    #[test]
    fn test_manifest_accepts_openwrt_style_names() {
        let manifest = with_package("name = \"libfry_core-2.0+git\"\ncategory = \"utils\"").unwrap();
        assert_eq!(manifest.package.name.as_deref(), Some("libfry_core-2.0+git"));
        assert_eq!(manifest.package.category, "utils");
    }

    #[test]
    fn test_manifest_requires_feeds_name() {
        let content = r#"
[[builds]]
target = "x86"
subtarget = "64"
architecture = "x86_64"
version = "23.05.2"
"#;
        let err = Manifest::from_toml(content).unwrap_err();
        assert!(matches!(err, ManifestError::ParseError(_)));
        assert!(err.to_string().contains("feedsName"));
    }

    #[test]
    fn test_manifest_without_profiles_is_rejected() {
        let err = Manifest::from_toml("[package]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::NoProfiles));
    }

    #[test]
    fn test_manifest_load_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/builds.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_profile_summary_and_slot() {
        let manifest = Manifest::from_toml(TWO_PROFILES).unwrap();
        let profile = &manifest.builds[0];
        assert_eq!(profile.summary(), "arm:mikrotik (target=ipq40xx)");
        assert_eq!(profile.slot(), "arm_mikrotik");
    }
}
