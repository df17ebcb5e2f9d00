//! Build command implementation
//!
//! Drives one build from selector to packaged artifact:
//! resolve profile, stage the feed, provision the SDK and builder image,
//! then compile inside a container.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::output::{self, print_detail, print_info, print_success};
use crate::core::manifest::{BuildProfile, Manifest};
use crate::core::plan::{BuildPlan, PlanOptions};
use crate::core::resolver;
use crate::core::selector::Selector;
use crate::error::FeedsmithError;
use crate::infra::docker::DockerEngine;
use crate::infra::download::ProgressCallback;
use crate::infra::executor::{self, BuildExecutor};
use crate::infra::image::{self, ImageOutcome};
use crate::infra::sandbox::ContainerEngine;
use crate::infra::toolchain::{ProvisionOutcome, ToolchainProvisioner};
use crate::infra::{feed, filesystem};

/// Build options
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Profile to build
    pub selector: Selector,
    /// Manifest location
    pub manifest: PathBuf,
    /// Project root
    pub project_root: PathBuf,
    /// Verbose single-job make
    pub debug: bool,
    /// SDK download mirror
    pub sdk_mirror: String,
    /// Builder image override
    pub image: Option<String>,
}

/// Execute the build command
pub async fn execute(options: BuildOptions) -> Result<()> {
    let manifest = Manifest::load(&options.manifest).map_err(FeedsmithError::from)?;
    let profile =
        resolver::resolve(&manifest.builds, &options.selector).map_err(FeedsmithError::from)?;
    print_profile(profile);

    let root = std::fs::canonicalize(&options.project_root).with_context(|| {
        format!(
            "Project root '{}' is not accessible",
            options.project_root.display()
        )
    })?;
    let plan = BuildPlan::new(
        &root,
        profile,
        &manifest.package,
        PlanOptions {
            debug: options.debug,
            sdk_mirror: options.sdk_mirror,
            image: options.image,
        },
    )
    .map_err(FeedsmithError::from)?;
    tracing::info!(
        "Building {} for {} with SDK {}",
        plan.package(),
        options.selector,
        plan.sdk().extracted_dir_name()
    );

    filesystem::recreate_dir(&plan.output_dir()).map_err(FeedsmithError::from)?;

    let spinner = output::create_spinner("Staging feed...");
    let staged = feed::stage(&plan).map_err(FeedsmithError::from);
    spinner.finish_and_clear();
    let staged = staged?;
    print_success(&format!(
        "Staged {} into {}",
        plan.package(),
        staged.package_dir.display()
    ));

    provision_sdk(&plan).await?;

    let engine: Arc<dyn ContainerEngine> =
        Arc::new(DockerEngine::connect().map_err(FeedsmithError::from)?);

    let request = image::build_request(&plan);
    match image::ensure_image(engine.as_ref(), &request)
        .await
        .map_err(FeedsmithError::from)?
    {
        ImageOutcome::Present => print_info(&format!("Using image {}", request.tag)),
        ImageOutcome::Built => print_success(&format!("Built image {}", request.tag)),
    }

    print_info("Starting build container...");
    BuildExecutor::new(engine)
        .run(&executor::container_spec(&plan), Box::new(std::io::stdout()))
        .await
        .map_err(FeedsmithError::from)?;

    print_success(&format!(
        "Package built for architecture: {}",
        profile.architecture
    ));
    print_detail(&format!("Saved to {}", plan.output_dir().display()));
    Ok(())
}

fn print_profile(profile: &BuildProfile) {
    print_info("Build configuration:");
    print_detail(&format!("Target: {}", profile.target));
    print_detail(&format!("Subtarget: {}", profile.subtarget));
    print_detail(&format!("Architecture: {}", profile.architecture));
    if !profile.codenames.is_empty() {
        print_detail(&format!("Codenames: {}", profile.codenames.join(", ")));
    }
}

async fn provision_sdk(plan: &BuildPlan) -> Result<()> {
    let provisioner = ToolchainProvisioner::new(plan.sdk_base_dir(), plan.sdk_mirror());

    let bar = output::create_download_bar();
    let bar_handle = bar.clone();
    let progress: ProgressCallback = Box::new(move |downloaded, total| {
        if total > 0 && bar_handle.length() != Some(total) {
            bar_handle.set_length(total);
        }
        bar_handle.set_position(downloaded);
    });

    let outcome = provisioner.provision(plan.sdk(), Some(&progress)).await;
    bar.finish_and_clear();

    match outcome.map_err(FeedsmithError::from)? {
        ProvisionOutcome::CacheHit { dir } => {
            print_info(&format!("Using cached SDK {}", dir.display()));
        }
        ProvisionOutcome::Provisioned { dir, downloaded } => {
            let how = if downloaded { "Downloaded" } else { "Unpacked" };
            print_success(&format!("{how} SDK into {}", dir.display()));
        }
    }
    Ok(())
}
