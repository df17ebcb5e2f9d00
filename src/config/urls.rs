//! Remote endpoints

/// OpenWrt release archive, root of every SDK download URL
pub const OPENWRT_RELEASES: &str = "https://archive.openwrt.org/releases";
