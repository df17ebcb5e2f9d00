//! Build isolation using containers
//!
//! Describes the builder container (image, bind mounts, entrypoint) and the
//! engine operations the pipeline needs. [`crate::infra::docker`] talks to a
//! real Docker daemon; tests substitute their own engine.

use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;

use crate::error::ContainerError;

/// Where forwarded container output is written
pub type LogSink = Box<dyn Write + Send>;

/// Bind mount of a host path into the container
#[derive(Debug, Clone, PartialEq)]
pub struct MountConfig {
    /// Host path to mount
    pub host_path: PathBuf,
    /// Container path to mount to
    pub container_path: PathBuf,
    /// Whether the mount is read-only
    pub read_only: bool,
}

impl MountConfig {
    /// Create a new read-only mount
    pub fn read_only(host_path: impl Into<PathBuf>, container_path: impl Into<PathBuf>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
            read_only: true,
        }
    }

    /// Create a new read-write mount
    pub fn read_write(host_path: impl Into<PathBuf>, container_path: impl Into<PathBuf>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
            read_only: false,
        }
    }
}

/// Container to create for one build
#[derive(Debug, Clone, Default)]
pub struct ContainerSpec {
    /// Image to run
    pub image: String,
    /// Bind mounts
    pub mounts: Vec<MountConfig>,
    /// Command to run
    pub command: Vec<String>,
    /// Allocate a TTY so tools keep line-buffered, colored output
    pub tty: bool,
}

impl ContainerSpec {
    /// Spec for `image` with no mounts and the image's default command
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    /// Add a mount configuration
    pub fn with_mount(mut self, mount: MountConfig) -> Self {
        self.mounts.push(mount);
        self
    }

    /// Set the command
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = command;
        self
    }

    /// Allocate a TTY
    pub fn with_tty(mut self) -> Self {
        self.tty = true;
        self
    }
}

/// Image build from a Dockerfile and a context directory
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuildRequest {
    /// Tag of the resulting image
    pub tag: String,
    /// Dockerfile path, relative to the context
    pub dockerfile: String,
    /// Build context directory
    pub context: PathBuf,
    /// Top-level context entries left out of the upload
    pub exclude: Vec<String>,
}

/// Operations the pipeline needs from a container engine
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Whether `image` exists locally; "not found" is `Ok(false)`
    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError>;

    /// Build an image, streaming build output to the terminal
    async fn build_image(&self, request: &ImageBuildRequest) -> Result<(), ContainerError>;

    /// Create a container, returning its id
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, ContainerError>;

    /// Start a created container
    async fn start_container(&self, id: &str) -> Result<(), ContainerError>;

    /// Follow the combined output of a container into `sink` until it closes
    async fn follow_logs(&self, id: &str, sink: LogSink) -> Result<(), ContainerError>;

    /// Block until the container stops running, returning its exit code
    async fn wait_container(&self, id: &str) -> Result<i64, ContainerError>;

    /// Force-remove a container together with its anonymous volumes
    async fn remove_container(&self, id: &str) -> Result<(), ContainerError>;
}
