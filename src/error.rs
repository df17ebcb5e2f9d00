//! Error types for feedsmith
//!
//! Domain-specific error types using thiserror. Each pipeline stage owns one
//! enum; [`FeedsmithError`] names the stage that failed.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest (builds.toml) errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file missing
    #[error("Manifest not found at '{path}'")]
    NotFound { path: PathBuf },

    /// Manifest could not be read
    #[error("Failed to read manifest '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Manifest is not valid TOML or has the wrong shape
    #[error("Failed to parse manifest: {0}")]
    ParseError(String),

    /// Manifest declares no build profiles
    #[error("Manifest declares no [[builds]] entries")]
    NoProfiles,

    /// A `[package]` value cannot be used as a feed path or package name
    #[error("Invalid package {field} '{value}': {reason}")]
    InvalidPackageField {
        field: String,
        value: String,
        reason: String,
    },
}

/// Profile resolution errors
#[derive(Error, Debug)]
pub enum ResolverError {
    /// No profile matches the selector
    #[error("No build configuration found for architecture: {architecture}")]
    NoMatch {
        architecture: String,
        subtarget: Option<String>,
        /// Every configured profile, formatted as `arch:subtarget (target=...)`
        available: Vec<String>,
    },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// Server answered with anything but 200 OK
    #[error("Failed to download '{url}': HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to remove file
    #[error("Failed to remove file '{path}': {error}")]
    RemoveFile { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to copy a directory tree
    #[error("Failed to copy directory '{from}' to '{to}': {error}")]
    CopyDir {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Toolchain (SDK) provisioning errors
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// SDK archive download failed
    #[error("Failed to download SDK: {0}")]
    Download(#[from] DownloadError),

    /// Extraction tool not available
    #[error("Extraction tool '{tool}' not found in PATH")]
    ExtractorNotFound { tool: String },

    /// Extraction failed
    #[error("Failed to extract SDK archive '{archive}': {error}")]
    Extraction { archive: PathBuf, error: String },

    /// Extracted directory could not be moved into the cache slot
    #[error("Failed to rename SDK directory '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Other filesystem failure
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Feed staging errors
#[derive(Error, Debug)]
pub enum StagingError {
    /// A required descriptor file or source tree is missing
    #[error("Required build input missing: {path}")]
    MissingInput { path: PathBuf },

    /// A source tree name is not a plain directory name
    #[error("Source tree '{name}' must be a directory name inside the project root")]
    InvalidSourceTree { name: String },

    /// Copy or directory setup failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Container engine errors
#[derive(Error, Debug)]
pub enum ContainerError {
    /// Could not connect to the engine
    #[error("Failed to connect to container engine: {error}")]
    Connect { error: String },

    /// Image query failed for a reason other than "not found"
    #[error("Error inspecting image '{image}': {error}")]
    InspectImage { image: String, error: String },

    /// Build context could not be packed
    #[error("Failed to create build context from '{path}': {error}")]
    BuildContext { path: PathBuf, error: String },

    /// Image build failed
    #[error("Failed to build image '{image}': {error}")]
    BuildImage { image: String, error: String },

    /// Container creation failed
    #[error("Error creating container: {error}")]
    Create { error: String },

    /// Container start failed
    #[error("Error starting container '{id}': {error}")]
    Start { id: String, error: String },

    /// Log stream failed
    #[error("Error streaming logs of container '{id}': {error}")]
    Logs { id: String, error: String },

    /// Waiting for the container failed
    #[error("Error while waiting for container '{id}': {error}")]
    Wait { id: String, error: String },

    /// Container finished with a non-zero status
    #[error("Container exited with status code: {code}")]
    NonZeroExit { code: i64 },

    /// Container removal failed
    #[error("Failed to remove container '{id}': {error}")]
    Remove { id: String, error: String },
}

/// Top-level feedsmith error type
#[derive(Error, Debug)]
pub enum FeedsmithError {
    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Resolver error
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Toolchain error
    #[error("Toolchain error: {0}")]
    Toolchain(#[from] ToolchainError),

    /// Staging error
    #[error("Staging error: {0}")]
    Staging(#[from] StagingError),

    /// Container error
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
