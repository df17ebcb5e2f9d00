//! Archive extraction
//!
//! Unpacks archives with the platform `tar`, which picks the compression
//! from the archive itself. Its output goes straight to the terminal.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::ToolchainError;

/// Extraction tool invoked for every archive
pub const EXTRACT_TOOL: &str = "tar";

/// Extract `archive` into `dest`
pub async fn extract_archive(archive: &Path, dest: &Path) -> Result<(), ToolchainError> {
    let tool = which::which(EXTRACT_TOOL).map_err(|_| ToolchainError::ExtractorNotFound {
        tool: EXTRACT_TOOL.to_string(),
    })?;

    tracing::debug!(
        "Running {} -xf {} -C {}",
        tool.display(),
        archive.display(),
        dest.display()
    );

    let status = Command::new(&tool)
        .arg("-xf")
        .arg(archive)
        .arg("-C")
        .arg(dest)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| ToolchainError::Extraction {
            archive: archive.to_path_buf(),
            error: e.to_string(),
        })?;

    if !status.success() {
        return Err(ToolchainError::Extraction {
            archive: archive.to_path_buf(),
            error: format!("{EXTRACT_TOOL} exited with {status}"),
        });
    }

    Ok(())
}
