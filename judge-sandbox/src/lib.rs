//! Container-backed sandbox driver (spec §4.1/§4.2): volumes, tasks and the
//! resource monitor that meters them while they run.
#![deny(missing_docs)]

mod docker;
mod error;
mod monitor;
mod task;
mod volume;

pub use docker::DockerSandbox;
pub use error::SandboxError;
pub use monitor::ResourceMonitor;
pub use task::{Mount, Task, TaskResult};
pub use volume::Volume;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// The three capabilities a container runtime driver provides (spec §4.1):
/// volume lifecycle, and running a [`Task`] to completion. `Container` is
/// an implementation detail of a driver and has no trait-level surface of
/// its own — callers only ever see the `Task` that wraps it.
///
/// Implementations must reclaim every volume and container they create on
/// every exit path, including error returns (spec §3 "Ownership &
/// lifecycle").
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Create a fresh, empty volume.
    async fn create_volume(&self) -> Result<Volume, SandboxError>;

    /// Destroy a volume and its contents.
    async fn remove_volume(&self, volume: &Volume) -> Result<(), SandboxError>;

    /// Byte-exact copy of `volume`'s contents into a freshly created volume.
    async fn clone_volume(&self, volume: &Volume) -> Result<Volume, SandboxError>;

    /// Copy a single host file into `volume` at `volume_path`.
    async fn copy_file(&self, volume: &Volume, host_path: &Path, volume_path: &Path) -> Result<(), SandboxError>;

    /// Copy several host files into `dir_in_volume` inside `volume`.
    async fn copy_files(
        &self,
        volume: &Volume,
        host_paths: &[PathBuf],
        dir_in_volume: &Path,
    ) -> Result<(), SandboxError>;

    /// Remove `paths` from inside `volume`.
    async fn remove_files(&self, volume: &Volume, paths: &[PathBuf]) -> Result<(), SandboxError>;

    /// Run `task` to completion: create its container, start it while the
    /// resource monitor samples, inspect its exit code, and remove it,
    /// following the `limit + 500ms` timeout policy of spec §4.1.
    async fn run_task(&self, task: Task) -> Result<TaskResult, SandboxError>;
}
