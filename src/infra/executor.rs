//! Build execution inside the builder container
//!
//! One build is one container: create, start, forward logs while waiting,
//! then remove. The exit status from the wait decides the outcome; the log
//! task only gets a short grace period to drain once the container stopped.

use std::sync::Arc;
use std::time::Duration;

use crate::config::defaults;
use crate::core::plan::BuildPlan;
use crate::error::ContainerError;
use crate::infra::sandbox::{ContainerEngine, ContainerSpec, LogSink, MountConfig};

/// Container spec for building `plan`
pub fn container_spec(plan: &BuildPlan) -> ContainerSpec {
    ContainerSpec::new(plan.image())
        .with_mount(MountConfig::read_write(plan.sdk_dir(), defaults::SDK_MOUNT))
        .with_mount(MountConfig::read_write(plan.output_dir(), defaults::OUTPUT_MOUNT))
        .with_mount(MountConfig::read_write(plan.feed_dir(), defaults::FEED_MOUNT))
        .with_command(plan.recipe().entrypoint())
        .with_tty()
}

/// Runs build containers on an engine
pub struct BuildExecutor {
    engine: Arc<dyn ContainerEngine>,
    drain_grace: Duration,
}

impl BuildExecutor {
    pub fn new(engine: Arc<dyn ContainerEngine>) -> Self {
        Self {
            engine,
            drain_grace: Duration::from_millis(defaults::LOG_DRAIN_GRACE_MS),
        }
    }

    /// Override how long logs may drain after the container stopped
    pub fn with_drain_grace(mut self, grace: Duration) -> Self {
        self.drain_grace = grace;
        self
    }

    /// Run `spec` to completion, forwarding its output to `sink`.
    ///
    /// The container is removed on every path once it was created.
    pub async fn run(&self, spec: &ContainerSpec, sink: LogSink) -> Result<(), ContainerError> {
        let id = self.engine.create_container(spec).await?;
        tracing::info!("Created container {}", short_id(&id));

        let result = self.run_created(&id, sink).await;

        match self.engine.remove_container(&id).await {
            Ok(()) => tracing::debug!("Removed container {}", short_id(&id)),
            Err(e) => tracing::warn!("{}", e),
        }

        result
    }

    async fn run_created(&self, id: &str, sink: LogSink) -> Result<(), ContainerError> {
        self.engine.start_container(id).await?;
        tracing::debug!("Started container {}", short_id(id));

        let engine = Arc::clone(&self.engine);
        let log_id = id.to_string();
        let mut logs = tokio::spawn(async move { engine.follow_logs(&log_id, sink).await });

        let waited = self.engine.wait_container(id).await;

        let logged = match tokio::time::timeout(self.drain_grace, &mut logs).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(ContainerError::Logs {
                id: id.to_string(),
                error: e.to_string(),
            }),
            Err(_) => {
                tracing::debug!("Log stream still open after container exit, abandoning it");
                logs.abort();
                Ok(())
            }
        };

        let code = waited?;
        tracing::info!("Container {} exited with {}", short_id(id), code);
        if code != 0 {
            if let Err(e) = logged {
                tracing::warn!("{}", e);
            }
            return Err(ContainerError::NonZeroExit { code });
        }
        logged
    }
}

fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}
