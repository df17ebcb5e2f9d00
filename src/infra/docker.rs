//! Docker engine backed by the bollard API client

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, LogsOptions, RemoveContainerOptions, StartContainerOptions,
    WaitContainerOptions,
};
use bollard::errors::Error as BollardError;
use bollard::image::BuildImageOptions;
use bollard::models::{ContainerWaitResponse, HostConfig, Mount, MountTypeEnum};
use bollard::Docker;
use bytes::Bytes;
use futures::StreamExt;
use std::io::Write;
use std::path::Path;

use crate::error::ContainerError;
use crate::infra::sandbox::{ContainerEngine, ContainerSpec, ImageBuildRequest, LogSink};

/// Container engine talking to the local Docker daemon
#[derive(Debug, Clone)]
pub struct DockerEngine {
    docker: Docker,
}

impl DockerEngine {
    /// Connect using `DOCKER_HOST` or the platform's default socket
    pub fn connect() -> Result<Self, ContainerError> {
        let docker = Docker::connect_with_local_defaults().map_err(|e| {
            ContainerError::Connect {
                error: e.to_string(),
            }
        })?;
        Ok(Self { docker })
    }
}

/// Pack `context` into an uncompressed tar, skipping top-level `exclude` entries
pub fn pack_context(context: &Path, exclude: &[String]) -> Result<Vec<u8>, ContainerError> {
    let context_err = |error: String| ContainerError::BuildContext {
        path: context.to_path_buf(),
        error,
    };

    let mut builder = tar::Builder::new(Vec::new());
    builder.follow_symlinks(false);

    let entries = std::fs::read_dir(context).map_err(|e| context_err(e.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|e| context_err(e.to_string()))?;
        let name = entry.file_name();
        if exclude.iter().any(|x| name.to_str() == Some(x.as_str())) {
            continue;
        }
        let path = entry.path();
        let result = if path.is_dir() {
            builder.append_dir_all(&name, &path)
        } else {
            builder.append_path_with_name(&path, &name)
        };
        result.map_err(|e| context_err(format!("{}: {e}", path.display())))?;
    }

    builder.into_inner().map_err(|e| context_err(e.to_string()))
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError> {
        image_presence(self.docker.inspect_image(image).await, image)
    }

    async fn build_image(&self, request: &ImageBuildRequest) -> Result<(), ContainerError> {
        let context = request.context.clone();
        let exclude = request.exclude.clone();
        let body = tokio::task::spawn_blocking(move || pack_context(&context, &exclude))
            .await
            .map_err(|e| ContainerError::BuildContext {
                path: request.context.clone(),
                error: e.to_string(),
            })??;
        tracing::debug!("Build context is {} bytes", body.len());

        let options = BuildImageOptions {
            dockerfile: request.dockerfile.clone(),
            t: request.tag.clone(),
            rm: true,
            ..Default::default()
        };

        let build_err = |error: String| ContainerError::BuildImage {
            image: request.tag.clone(),
            error,
        };

        let mut stream = Box::pin(
            self.docker
                .build_image(options, None, Some(Bytes::from(body))),
        );
        let mut stdout = std::io::stdout();
        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| build_err(e.to_string()))?;
            if let Some(error) = info.error {
                return Err(build_err(error));
            }
            if let Some(text) = info.stream {
                let _ = stdout.write_all(text.as_bytes());
            } else if let Some(status) = info.status {
                let _ = writeln!(stdout, "{status}");
            }
            let _ = stdout.flush();
        }
        Ok(())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        let mounts = spec
            .mounts
            .iter()
            .map(|m| Mount {
                source: Some(m.host_path.to_string_lossy().into_owned()),
                target: Some(m.container_path.to_string_lossy().into_owned()),
                typ: Some(MountTypeEnum::BIND),
                read_only: Some(m.read_only),
                ..Default::default()
            })
            .collect();

        let config = Config {
            image: Some(spec.image.clone()),
            cmd: if spec.command.is_empty() {
                None
            } else {
                Some(spec.command.clone())
            },
            tty: Some(spec.tty),
            host_config: Some(HostConfig {
                mounts: Some(mounts),
                ..Default::default()
            }),
            ..Default::default()
        };

        let response = self
            .docker
            .create_container(None::<CreateContainerOptions<String>>, config)
            .await
            .map_err(|e| ContainerError::Create {
                error: e.to_string(),
            })?;
        for warning in &response.warnings {
            tracing::warn!("Container create: {}", warning);
        }
        Ok(response.id)
    }

    async fn start_container(&self, id: &str) -> Result<(), ContainerError> {
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| ContainerError::Start {
                id: id.to_string(),
                error: e.to_string(),
            })
    }

    async fn follow_logs(&self, id: &str, mut sink: LogSink) -> Result<(), ContainerError> {
        let options = LogsOptions::<String> {
            follow: true,
            stdout: true,
            stderr: true,
            ..Default::default()
        };
        let logs_err = |error: String| ContainerError::Logs {
            id: id.to_string(),
            error,
        };

        let mut stream = Box::pin(self.docker.logs(id, Some(options)));
        while let Some(item) = stream.next().await {
            let output = item.map_err(|e| logs_err(e.to_string()))?;
            sink.write_all(&output.into_bytes())
                .and_then(|()| sink.flush())
                .map_err(|e| logs_err(e.to_string()))?;
        }
        Ok(())
    }

    async fn wait_container(&self, id: &str) -> Result<i64, ContainerError> {
        let options = WaitContainerOptions {
            condition: "not-running",
        };
        let mut stream = Box::pin(self.docker.wait_container(id, Some(options)));
        exit_code(stream.next().await, id)
    }

    async fn remove_container(&self, id: &str) -> Result<(), ContainerError> {
        let options = RemoveContainerOptions {
            v: true,
            force: true,
            ..Default::default()
        };
        self.docker
            .remove_container(id, Some(options))
            .await
            .map_err(|e| ContainerError::Remove {
                id: id.to_string(),
                error: e.to_string(),
            })
    }
}

/// Map an image inspect result to presence; a 404 means absent
fn image_presence<T>(
    result: Result<T, BollardError>,
    image: &str,
) -> Result<bool, ContainerError> {
    match result {
        Ok(_) => Ok(true),
        Err(BollardError::DockerResponseServerError {
            status_code: 404, ..
        }) => Ok(false),
        Err(e) => Err(ContainerError::InspectImage {
            image: image.to_string(),
            error: e.to_string(),
        }),
    }
}

/// Exit code from the first item of a wait stream
fn exit_code(
    item: Option<Result<ContainerWaitResponse, BollardError>>,
    id: &str,
) -> Result<i64, ContainerError> {
    let wait_err = |error: String| ContainerError::Wait {
        id: id.to_string(),
        error,
    };
    match item {
        Some(Ok(response)) => Ok(response.status_code),
        // bollard reports a non-zero exit as an error carrying the code
        Some(Err(BollardError::DockerContainerWaitError { code, .. })) => Ok(code),
        Some(Err(e)) => Err(wait_err(e.to_string())),
        None => Err(wait_err("wait stream ended without a status".to_string())),
    }
}
