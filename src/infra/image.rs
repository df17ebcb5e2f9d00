//! Builder image provisioning
//!
//! The builder image is built at most once per host: if the engine already
//! knows the tag it is used as is, otherwise it is built from the project's
//! Dockerfile.

use crate::config::defaults;
use crate::core::plan::BuildPlan;
use crate::error::ContainerError;
use crate::infra::sandbox::{ContainerEngine, ImageBuildRequest};

/// What [`ensure_image`] had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Image was already present
    Present,
    /// Image was built during this call
    Built,
}

/// Build request for the plan's builder image
pub fn build_request(plan: &BuildPlan) -> ImageBuildRequest {
    ImageBuildRequest {
        tag: plan.image().to_string(),
        dockerfile: plan.dockerfile().to_string(),
        context: plan.root().to_path_buf(),
        exclude: [defaults::SDK_DIR, defaults::FEED_DIR, defaults::OUTPUT_DIR, ".git"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Make sure `request.tag` exists, building it when the engine reports it missing
pub async fn ensure_image(
    engine: &dyn ContainerEngine,
    request: &ImageBuildRequest,
) -> Result<ImageOutcome, ContainerError> {
    if engine.image_exists(&request.tag).await? {
        tracing::info!("Image {} already exists", request.tag);
        return Ok(ImageOutcome::Present);
    }

    let dockerfile = request.context.join(&request.dockerfile);
    if !dockerfile.is_file() {
        return Err(ContainerError::BuildContext {
            path: dockerfile,
            error: "Dockerfile not found".to_string(),
        });
    }

    tracing::info!(
        "Image {} not found, building from {}",
        request.tag,
        dockerfile.display()
    );
    engine.build_image(request).await?;
    Ok(ImageOutcome::Built)
}
