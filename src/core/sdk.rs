//! SDK release naming
//!
//! Everything about an OpenWrt SDK release that can be derived from a build
//! profile without touching the network or the disk: archive name, download
//! URL, the directory the archive unpacks to, and the local cache slot.

use crate::config::defaults;
use crate::core::manifest::BuildProfile;

/// ABI suffix for a target/subtarget pair.
///
/// `ipq40xx/mikrotik` SDKs are published with the `musl_eabi` suffix, every
/// other pair uses plain `musl`.
pub fn abi_suffix(target: &str, subtarget: &str) -> &'static str {
    match (target, subtarget) {
        ("ipq40xx", "mikrotik") => defaults::EABI_ABI,
        _ => defaults::DEFAULT_ABI,
    }
}

/// SDK release derived from a build profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkRelease {
    version: String,
    target: String,
    subtarget: String,
    architecture: String,
    abi: &'static str,
}

impl SdkRelease {
    /// Describe the SDK a profile builds with
    pub fn for_profile(profile: &BuildProfile) -> Self {
        Self {
            version: profile.version.clone(),
            target: profile.target.clone(),
            subtarget: profile.subtarget.clone(),
            architecture: profile.architecture.clone(),
            abi: abi_suffix(&profile.target, &profile.subtarget),
        }
    }

    /// ABI suffix baked into the names
    pub fn abi(&self) -> &str {
        self.abi
    }

    /// Directory name the archive unpacks to
    pub fn extracted_dir_name(&self) -> String {
        format!(
            "openwrt-sdk-{}-{}-{}_gcc-{}_{}.{}",
            self.version,
            self.target,
            self.subtarget,
            defaults::SDK_GCC_VERSION,
            self.abi,
            defaults::SDK_HOST,
        )
    }

    /// Archive file name
    pub fn archive_name(&self) -> String {
        format!("{}.tar.xz", self.extracted_dir_name())
    }

    /// Download URL below `mirror` (no trailing slash needed)
    pub fn url(&self, mirror: &str) -> String {
        format!(
            "{}/{}/targets/{}/{}/{}",
            mirror.trim_end_matches('/'),
            self.version,
            self.target,
            self.subtarget,
            self.archive_name()
        )
    }

    /// Name of the local cache directory, keyed by architecture and subtarget
    pub fn cache_key(&self) -> String {
        format!("sdk_{}_{}", self.architecture, self.subtarget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::urls;
    use crate::test_utils::generators;
    use proptest::prelude::*;

    fn mikrotik() -> BuildProfile {
        BuildProfile {
            target: "ipq40xx".to_string(),
            subtarget: "mikrotik".to_string(),
            architecture: "arm".to_string(),
            codenames: vec![],
            version: "23.05.2".to_string(),
            feeds_name: "pkg".to_string(),
        }
    }

    #[test]
    fn test_mikrotik_uses_eabi_suffix() {
        assert_eq!(abi_suffix("ipq40xx", "mikrotik"), "musl_eabi");
        assert_eq!(SdkRelease::for_profile(&mikrotik()).abi(), "musl_eabi");
    }

    #[test]
    fn test_other_pairs_use_default_suffix() {
        assert_eq!(abi_suffix("ipq40xx", "generic"), "musl");
        assert_eq!(abi_suffix("ramips", "mikrotik"), "musl");
        assert_eq!(abi_suffix("ramips", "mt7621"), "musl");
    }

    #[test]
    fn test_names_for_mikrotik() {
        let sdk = SdkRelease::for_profile(&mikrotik());
        assert_eq!(
            sdk.extracted_dir_name(),
            "openwrt-sdk-23.05.2-ipq40xx-mikrotik_gcc-12.3.0_musl_eabi.Linux-x86_64"
        );
        assert_eq!(
            sdk.archive_name(),
            "openwrt-sdk-23.05.2-ipq40xx-mikrotik_gcc-12.3.0_musl_eabi.Linux-x86_64.tar.xz"
        );
        assert_eq!(sdk.cache_key(), "sdk_arm_mikrotik");
    }

    #[test]
    fn test_url_layout() {
        let sdk = SdkRelease::for_profile(&mikrotik());
        assert_eq!(
            sdk.url(urls::OPENWRT_RELEASES),
            "https://archive.openwrt.org/releases/23.05.2/targets/ipq40xx/mikrotik/\
             openwrt-sdk-23.05.2-ipq40xx-mikrotik_gcc-12.3.0_musl_eabi.Linux-x86_64.tar.xz"
        );
        assert_eq!(
            sdk.url("http://mirror.local/"),
            sdk.url("http://mirror.local")
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Only ipq40xx/mikrotik gets the alternate suffix
        #[test]
        fn prop_abi_suffix_rule(profile in generators::profile()) {
            let expected = if profile.target == "ipq40xx" && profile.subtarget == "mikrotik" {
                "musl_eabi"
            } else {
                "musl"
            };
            let sdk = SdkRelease::for_profile(&profile);
            prop_assert_eq!(sdk.abi(), expected);
        }

        /// The archive unpacks to a directory named after the archive
        #[test]
        fn prop_archive_matches_extracted_dir(profile in generators::profile()) {
            let sdk = SdkRelease::for_profile(&profile);
            prop_assert_eq!(sdk.archive_name(), format!("{}.tar.xz", sdk.extracted_dir_name()));
            prop_assert!(sdk.url("https://m").ends_with(&sdk.archive_name()));
        }
    }
}
