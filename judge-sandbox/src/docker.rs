use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bollard::container::{
    AttachContainerOptions, AttachContainerResults, Config, CreateContainerOptions,
    RemoveContainerOptions, StopContainerOptions,
};
use bollard::models::{HostConfig, PortBinding};
use bollard::volume::{CreateVolumeOptions, RemoveVolumeOptions};
use bollard::Docker;
use futures::io::AsyncWriteExt;
use futures::StreamExt;
use log::{info, trace, warn};
use tokio::time::{timeout, Duration};
use uuid::Uuid;

use crate::error::SandboxError;
use crate::monitor::ResourceMonitor;
use crate::task::{Task, TaskResult};
use crate::volume::Volume;
use crate::Sandbox;

/// Image used for the transient helper container that backs [`Volume`]
/// clone/copy/remove operations (spec §4.1: "a transient helper
/// container"); chosen for being tiny and always present locally after the
/// first pull.
const HELPER_IMAGE: &str = "alpine:3.20";

/// Fixed in-container mountpoint for the volume a helper operates on.
const HELPER_SRC_MOUNT: &str = "/src";
const HELPER_DST_MOUNT: &str = "/dst";

/// [`Sandbox`] implementation driving the local Docker daemon over the
/// Engine API (spec §4.1/§4.2). Owns no state of its own beyond the client
/// handle; every [`Volume`]/[`Task`] is self-describing.
pub struct DockerSandbox {
    docker: Docker,
}

impl DockerSandbox {
    /// Connect to the local Docker daemon using its default socket.
    pub fn connect() -> Result<DockerSandbox, SandboxError> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(DockerSandbox { docker })
    }

    /// Run a short-lived helper container executing `cmd`, bind-mounting
    /// `mounts`, and wait for it to exit. Used for every [`Volume`]
    /// operation that needs filesystem access outside of a judged [`Task`].
    async fn run_helper(&self, cmd: Vec<String>, mounts: Vec<(&Volume, &str, bool)>) -> Result<(), SandboxError> {
        let name = format!("judge-helper-{}", Uuid::new_v4());
        let binds = mounts
            .iter()
            .map(|(volume, path, read_only)| {
                let suffix = if *read_only { ":ro" } else { "" };
                format!("{}:{}{}", volume.name(), path, suffix)
            })
            .collect();

        let config = Config {
            image: Some(HELPER_IMAGE.to_string()),
            cmd: Some(cmd),
            host_config: Some(HostConfig {
                binds: Some(binds),
                network_mode: Some("none".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let options = CreateContainerOptions {
            name: name.clone(),
            platform: None,
        };
        self.docker.create_container(Some(options), config).await?;
        self.docker
            .start_container::<String>(&name, None)
            .await?;
        self.docker
            .wait_container::<String>(&name, None)
            .collect::<Vec<_>>()
            .await;

        if let Err(e) = self
            .docker
            .remove_container(&name, Some(RemoveContainerOptions { force: true, ..Default::default() }))
            .await
        {
            warn!("failed to remove helper container {name}: {e}");
        }
        Ok(())
    }
}

#[async_trait]
impl Sandbox for DockerSandbox {
    async fn create_volume(&self) -> Result<Volume, SandboxError> {
        let name = format!("judge-volume-{}", Uuid::new_v4());
        self.docker
            .create_volume(CreateVolumeOptions {
                name: name.clone(),
                ..Default::default()
            })
            .await?;
        trace!("created volume {name}");
        Ok(Volume::named(name))
    }

    async fn remove_volume(&self, volume: &Volume) -> Result<(), SandboxError> {
        self.docker
            .remove_volume(volume.name(), Some(RemoveVolumeOptions { force: true }))
            .await?;
        Ok(())
    }

    async fn clone_volume(&self, volume: &Volume) -> Result<Volume, SandboxError> {
        let dest = self.create_volume().await?;
        self.run_helper(
            vec![
                "sh".to_string(),
                "-c".to_string(),
                format!("cp -a {HELPER_SRC_MOUNT}/. {HELPER_DST_MOUNT}/"),
            ],
            vec![(volume, HELPER_SRC_MOUNT, true), (&dest, HELPER_DST_MOUNT, false)],
        )
        .await?;
        Ok(dest)
    }

    async fn copy_file(&self, volume: &Volume, host_path: &Path, volume_path: &Path) -> Result<(), SandboxError> {
        self.copy_files(volume, &[host_path.to_path_buf()], volume_path.parent().unwrap_or(Path::new("/")))
            .await
    }

    async fn copy_files(&self, volume: &Volume, host_paths: &[PathBuf], dir_in_volume: &Path) -> Result<(), SandboxError> {
        let name = format!("judge-helper-{}", Uuid::new_v4());
        let config = Config {
            image: Some(HELPER_IMAGE.to_string()),
            cmd: Some(vec!["sleep".to_string(), "3600".to_string()]),
            host_config: Some(HostConfig {
                binds: Some(vec![format!("{}:{HELPER_DST_MOUNT}", volume.name())]),
                network_mode: Some("none".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        self.docker
            .create_container(Some(CreateContainerOptions { name: name.clone(), platform: None }), config)
            .await?;

        let mut archive = tar::Builder::new(Vec::new());
        for host_path in host_paths {
            let file_name = host_path
                .file_name()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "missing file name"))?;
            archive.append_path_with_name(host_path, file_name)?;
        }
        let tar_bytes = archive.into_inner()?;

        self.docker
            .upload_to_container(
                &name,
                Some(bollard::container::UploadToContainerOptions {
                    path: dir_in_volume.to_string_lossy().to_string(),
                    ..Default::default()
                }),
                tar_bytes.into(),
            )
            .await?;

        if let Err(e) = self
            .docker
            .remove_container(&name, Some(RemoveContainerOptions { force: true, ..Default::default() }))
            .await
        {
            warn!("failed to remove upload helper container {name}: {e}");
        }
        Ok(())
    }

    async fn remove_files(&self, volume: &Volume, paths: &[PathBuf]) -> Result<(), SandboxError> {
        let mut cmd = vec!["rm".to_string(), "-rf".to_string()];
        cmd.extend(paths.iter().map(|p| format!("{HELPER_DST_MOUNT}{}", p.display())));
        self.run_helper(cmd, vec![(volume, HELPER_DST_MOUNT, false)]).await
    }

    async fn run_task(&self, task: Task) -> Result<TaskResult, SandboxError> {
        let name = format!("judge-task-{}", Uuid::new_v4());
        let binds = task
            .mounts
            .iter()
            .map(|m| {
                let suffix = if m.read_only { ":ro" } else { "" };
                format!("{}:{}{}", m.volume.name(), m.path.display(), suffix)
            })
            .collect();

        let host_config = HostConfig {
            binds: Some(binds),
            nano_cpus: task.limits.cpus.map(|c| (c * 1_000_000_000.0) as i64),
            memory: Some((task.limits.memory_mb * 1024 * 1024) as i64),
            memory_swap: Some((task.limits.memory_mb * 1024 * 1024) as i64),
            pids_limit: Some(task.limits.pids_limit as i64),
            network_mode: Some(if task.limits.network { "bridge".to_string() } else { "none".to_string() }),
            port_bindings: Some(HashMap::<String, Option<Vec<PortBinding>>>::new()),
            log_config: if task.limits.logging {
                None
            } else {
                Some(bollard::models::HostConfigLogConfig { typ: Some("none".to_string()), config: None })
            },
            ulimits: task.limits.stack_kb.map(|kb| {
                vec![bollard::models::ResourcesUlimits {
                    name: Some("stack".to_string()),
                    soft: Some((kb * 1024) as i64),
                    hard: Some((kb * 1024) as i64),
                }]
            }),
            ..Default::default()
        };

        let config = Config {
            image: Some(task.image.clone()),
            cmd: Some(task.args.clone()),
            working_dir: Some(task.workdir.to_string_lossy().to_string()),
            attach_stdin: Some(true),
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            open_stdin: Some(true),
            host_config: Some(host_config),
            ..Default::default()
        };

        let created = self
            .docker
            .create_container(Some(CreateContainerOptions { name: name.clone(), platform: None }), config)
            .await?;

        let AttachContainerResults { mut output, mut input } = self
            .docker
            .attach_container(
                &name,
                Some(AttachContainerOptions::<String> {
                    stdin: Some(true),
                    stdout: Some(true),
                    stderr: Some(true),
                    stream: Some(true),
                    ..Default::default()
                }),
            )
            .await?;

        self.docker.start_container::<String>(&name, None).await?;

        if !task.stdin.is_empty() {
            if let Err(e) = input.write_all(&task.stdin).await {
                warn!("failed to write stdin to container {name}: {e}");
            }
        }
        let _ = input.close().await;

        let cgroup_path = cgroup_memory_path(&created.id);
        let monitor = ResourceMonitor::start(self.docker.clone(), created.id.clone(), cgroup_path);

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let collect = async {
            while let Some(chunk) = output.next().await {
                match chunk {
                    Ok(bollard::container::LogOutput::StdOut { message }) => stdout.extend_from_slice(&message),
                    Ok(bollard::container::LogOutput::StdErr { message }) => stderr.extend_from_slice(&message),
                    Ok(_) => {}
                    Err(e) => {
                        warn!("error reading task output for {name}: {e}");
                        break;
                    }
                }
            }
        };

        let wall_timeout = Duration::from_millis(task.limits.timeout_ms());
        let mut tle = false;
        if timeout(wall_timeout, collect).await.is_err() {
            tle = true;
            info!("task {name} exceeded {wall_timeout:?}, stopping");
            if let Err(e) = self
                .docker
                .stop_container(&name, Some(StopContainerOptions { t: 0 }))
                .await
            {
                warn!("failed to stop timed-out container {name}: {e}");
            }
        }

        let time_ms = monitor.elapsed_ms();
        let memory_bytes = monitor.end().await;
        tle = tle || time_ms > task.limits.time_ms;

        let exit_code = match self.docker.inspect_container(&name, None).await {
            Ok(inspect) => inspect
                .state
                .and_then(|s| s.exit_code)
                .map(|c| c as i32)
                .unwrap_or(-1),
            Err(e) => {
                warn!("failed to inspect exit code of {name}: {e}");
                -1
            }
        };

        if let Err(e) = self
            .docker
            .remove_container(&name, Some(RemoveContainerOptions { force: true, ..Default::default() }))
            .await
        {
            warn!("failed to remove task container {name}: {e}");
        }

        Ok(TaskResult {
            exit_code,
            stdout,
            stderr,
            time_ms,
            memory_bytes,
            tle,
        })
    }
}

/// Best-effort path to the container's cgroup v2 memory counter. `None`
/// falls back to the Docker stats API (spec §4.2).
fn cgroup_memory_path(container_id: &str) -> Option<PathBuf> {
    let path = PathBuf::from(format!("/sys/fs/cgroup/system.slice/docker-{container_id}.scope/memory.current"));
    if path.exists() {
        Some(path)
    } else {
        None
    }
}
