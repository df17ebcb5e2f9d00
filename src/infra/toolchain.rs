//! Toolchain (SDK) provisioning
//!
//! Makes sure the SDK for a profile is unpacked in its cache slot:
//!
//! ```text
//! Absent -> Downloading -> Extracting -> Ready
//! ```
//!
//! An existing cache slot short-circuits straight to `Ready`. The slot's
//! existence is the only thing checked; its contents are trusted.

use std::fmt;
use std::path::PathBuf;

use crate::config::defaults;
use crate::core::sdk::SdkRelease;
use crate::error::ToolchainError;
use crate::infra::download::{DownloadManager, ProgressCallback};
use crate::infra::{extract, filesystem};

/// Provisioning state of one SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainState {
    /// Nothing in the cache slot
    Absent,
    /// Fetching the archive
    Downloading,
    /// Unpacking the archive
    Extracting,
    /// SDK usable
    Ready,
}

impl fmt::Display for ToolchainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolchainState::Absent => write!(f, "absent"),
            ToolchainState::Downloading => write!(f, "downloading"),
            ToolchainState::Extracting => write!(f, "extracting"),
            ToolchainState::Ready => write!(f, "ready"),
        }
    }
}

/// How a ready SDK came to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Cache slot already existed; nothing was fetched or unpacked
    CacheHit { dir: PathBuf },
    /// SDK was unpacked during this call
    Provisioned {
        dir: PathBuf,
        /// False when a previously downloaded archive was reused
        downloaded: bool,
    },
}

/// Downloads and unpacks SDKs below one base directory
#[derive(Debug, Clone)]
pub struct ToolchainProvisioner {
    downloader: DownloadManager,
    base_dir: PathBuf,
    mirror: String,
}

impl ToolchainProvisioner {
    /// Provisioner storing SDKs in `base_dir`, fetching from `mirror`
    pub fn new(base_dir: impl Into<PathBuf>, mirror: impl Into<String>) -> Self {
        Self {
            downloader: DownloadManager::new(),
            base_dir: base_dir.into(),
            mirror: mirror.into(),
        }
    }

    /// Cache slot for `sdk`
    pub fn cache_dir(&self, sdk: &SdkRelease) -> PathBuf {
        self.base_dir.join(sdk.cache_key())
    }

    /// Make `sdk` available, downloading and unpacking it on a cache miss
    pub async fn provision(
        &self,
        sdk: &SdkRelease,
        progress: Option<&ProgressCallback>,
    ) -> Result<ProvisionOutcome, ToolchainError> {
        let cache_dir = self.cache_dir(sdk);

        if cache_dir.exists() {
            if !cache_dir.join(defaults::SDK_READY_MARKER).exists() {
                tracing::warn!(
                    "SDK directory {} has no completion marker; it may be from an interrupted \
                     extraction. Delete it to force a fresh download.",
                    cache_dir.display()
                );
            }
            trace_state(sdk, ToolchainState::Ready);
            return Ok(ProvisionOutcome::CacheHit { dir: cache_dir });
        }
        trace_state(sdk, ToolchainState::Absent);

        filesystem::create_dir_all(&self.base_dir)?;
        let archive = self.base_dir.join(sdk.archive_name());

        let downloaded = if archive.exists() {
            tracing::info!("SDK archive {} already downloaded", archive.display());
            false
        } else {
            trace_state(sdk, ToolchainState::Downloading);
            let url = sdk.url(&self.mirror);
            tracing::info!("Downloading SDK from {}", url);
            let fetched = self.downloader.download(&url, &archive, progress).await?;
            tracing::debug!("Saved {} bytes to {}", fetched.size, fetched.path.display());
            true
        };

        trace_state(sdk, ToolchainState::Extracting);
        extract::extract_archive(&archive, &self.base_dir).await?;

        let extracted = self.base_dir.join(sdk.extracted_dir_name());
        std::fs::rename(&extracted, &cache_dir).map_err(|e| ToolchainError::Rename {
            from: extracted.clone(),
            to: cache_dir.clone(),
            error: e.to_string(),
        })?;
        filesystem::write_file(&cache_dir.join(defaults::SDK_READY_MARKER), &sdk.archive_name())?;

        if let Err(e) = filesystem::remove_file(&archive) {
            tracing::warn!("Failed to remove SDK archive: {}", e);
        }

        trace_state(sdk, ToolchainState::Ready);
        Ok(ProvisionOutcome::Provisioned {
            dir: cache_dir,
            downloaded,
        })
    }
}

fn trace_state(sdk: &SdkRelease, state: ToolchainState) {
    tracing::debug!(sdk = %sdk.cache_key(), %state, "toolchain state");
}
