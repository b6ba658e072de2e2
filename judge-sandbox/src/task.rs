use std::path::PathBuf;

use judge_model::ExecutionLimits;

use crate::Volume;

/// A volume bind-mounted into a container at `path`.
#[derive(Debug, Clone)]
pub struct Mount {
    /// The volume being mounted.
    pub volume: Volume,
    /// Mountpoint inside the container.
    pub path: PathBuf,
    /// Whether the mount is read-only.
    pub read_only: bool,
}

/// `{image, args, stdin, limits, workdir, mounts, monitor}` (spec §4.1): a
/// single container execution, from create through remove.
#[derive(Debug, Clone)]
pub struct Task {
    /// Container image to run.
    pub image: String,
    /// `argv`, including `argv[0]`.
    pub args: Vec<String>,
    /// Bytes fed to the process's stdin.
    pub stdin: Vec<u8>,
    /// Resource limits enforced at container-create time.
    pub limits: ExecutionLimits,
    /// Fixed working directory mountpoint inside the container.
    pub workdir: PathBuf,
    /// Volumes bind-mounted for the lifetime of the container.
    pub mounts: Vec<Mount>,
}

/// Outcome of running one [`Task`] (spec §4.1 "TaskResult fields").
#[derive(Debug, Clone)]
pub struct TaskResult {
    /// Process exit code; `-1` if it could not be inspected.
    pub exit_code: i32,
    /// Captured stdout.
    pub stdout: Vec<u8>,
    /// Captured stderr.
    pub stderr: Vec<u8>,
    /// Wall-clock time the container ran for.
    pub time_ms: u64,
    /// Peak resident memory observed by the [`crate::ResourceMonitor`].
    pub memory_bytes: u64,
    /// Set if the container was killed for exceeding its time limit, or if
    /// the monitor observed elapsed time past the limit even without the
    /// wall timer firing.
    pub tle: bool,
}

impl TaskResult {
    /// A result standing in for a task that could never be inspected
    /// (spec §4.1 "exitCode (−1 on failure to inspect)").
    pub fn uninspectable() -> TaskResult {
        TaskResult {
            exit_code: -1,
            stdout: Vec::new(),
            stderr: Vec::new(),
            time_ms: 0,
            memory_bytes: 0,
            tle: false,
        }
    }
}
