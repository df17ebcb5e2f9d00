//! Default configuration values

/// Manifest file name, relative to the project root
pub const MANIFEST_FILE: &str = "builds.toml";

/// Dockerfile used to build the builder image, relative to the project root
pub const BUILDER_DOCKERFILE: &str = "Dockerfile.build";

/// Suffix appended to the package name to form the builder image name
pub const BUILDER_IMAGE_SUFFIX: &str = "-package-builder:latest";

/// Directory holding extracted SDKs
pub const SDK_DIR: &str = "sdk";

/// Directory the feed tree is staged into
pub const FEED_DIR: &str = "feed";

/// Directory compiled packages are copied to
pub const OUTPUT_DIR: &str = "output";

/// Feed category the package is staged under
pub const DEFAULT_CATEGORY: &str = "admin";

/// Source trees copied into the feed when the manifest names none
pub const DEFAULT_SOURCE_TREES: &[&str] = &["apps", "lib"];

/// Descriptor files that must exist at the project root
pub const REQUIRED_DESCRIPTORS: &[&str] = &["Makefile", "VERSION"];

/// Descriptor files copied only when present
pub const OPTIONAL_DESCRIPTORS: &[&str] = &["CMakeLists.txt"];

/// GCC version baked into SDK archive names
pub const SDK_GCC_VERSION: &str = "12.3.0";

/// Host triple baked into SDK archive names
pub const SDK_HOST: &str = "Linux-x86_64";

/// ABI suffix used by most targets
pub const DEFAULT_ABI: &str = "musl";

/// ABI suffix for targets built with hard-float EABI
pub const EABI_ABI: &str = "musl_eabi";

/// Written into an SDK directory once extraction and rename succeeded
pub const SDK_READY_MARKER: &str = ".feedsmith-ready";

/// Feed categories dropped from the SDK's default feed list
pub const PRUNED_FEEDS: &[&str] = &["luci", "telephony", "routing"];

/// Mount point of the SDK inside the builder container
pub const SDK_MOUNT: &str = "/sdk";

/// Mount point of the output directory inside the builder container
pub const OUTPUT_MOUNT: &str = "/output";

/// Mount point of the feed tree inside the builder container
pub const FEED_MOUNT: &str = "/feed";

/// How long container logs may keep draining after the container exited
pub const LOG_DRAIN_GRACE_MS: u64 = 500;
