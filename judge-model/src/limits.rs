use serde::{Deserialize, Serialize};

/// Resource limits enforced on a single sandboxed [`Task`](../judge_sandbox/struct.Task.html).
///
/// Mirrors the knobs the sandbox driver sets at container-create time
/// (spec §4.1): cpu, memory with equal swap to disable ballooning, a stack
/// ulimit, a pid cap, and whether the container gets network access or a
/// logging driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLimits {
    /// Wall-clock time limit, milliseconds. The driver adds a 500ms grace
    /// period on top of this before forcing a stop (spec §4.1 timeout
    /// policy); this field is the *limit*, not the grace-inclusive timeout.
    pub time_ms: u64,
    /// Memory limit, megabytes. `--memory` and `--memory-swap` are both set
    /// to this value so swap can't be used to exceed it.
    pub memory_mb: u64,
    /// Stack ulimit, kilobytes. `None` leaves the container default.
    pub stack_kb: Option<u64>,
    /// Maximum number of processes/threads the container may create.
    pub pids_limit: u32,
    /// Number of CPUs to allocate (`--cpus`). `None` leaves the container
    /// default.
    pub cpus: Option<f64>,
    /// Whether the container gets network access. Defaults to `false`.
    pub network: bool,
    /// Whether the container gets a logging driver. Defaults to `false` so
    /// stray output from a runaway submission doesn't fill the host's log
    /// storage.
    pub logging: bool,
}

impl ExecutionLimits {
    /// Default pids/network/logging used for every phase (spec §4.5 step 2
    /// `runCase`): 100 pids, no network, no logging driver.
    const DEFAULT_PIDS_LIMIT: u32 = 100;

    /// Limits for the pre-build and post-build phases: 2s / 512MB, fixed
    /// regardless of the problem (spec §4.5 steps 3 and 5, Open Question
    /// §9-i).
    pub fn fixed_build_phase() -> ExecutionLimits {
        ExecutionLimits {
            time_ms: 2_000,
            memory_mb: 512,
            stack_kb: None,
            pids_limit: Self::DEFAULT_PIDS_LIMIT,
            cpus: Some(1.0),
            network: false,
            logging: false,
        }
    }

    /// Limits for the judge phase, taken from the problem (spec §4.5 step 6,
    /// Open Question §9-i).
    pub fn for_judge_phase(time_ms: u64, memory_mb: u64) -> ExecutionLimits {
        ExecutionLimits {
            time_ms,
            memory_mb,
            stack_kb: None,
            pids_limit: Self::DEFAULT_PIDS_LIMIT,
            cpus: Some(1.0),
            network: false,
            logging: false,
        }
    }

    /// The wall-clock timeout to pass to the sandbox driver: `limit + 500ms`
    /// (spec §4.1).
    pub fn timeout_ms(&self) -> u64 {
        self.time_ms + 500
    }

    /// The memory ceiling used for MLE classification: the limit plus 1 MiB
    /// of slack (spec §4.5.1 step 2).
    pub fn mle_threshold_bytes(&self) -> u64 {
        self.memory_mb * 1024 * 1024 + 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_adds_grace_period() {
        let limits = ExecutionLimits::for_judge_phase(1000, 256);
        assert_eq!(limits.timeout_ms(), 1500);
    }

    #[test]
    fn mle_threshold_has_one_mib_slack() {
        let limits = ExecutionLimits::for_judge_phase(1000, 500);
        assert_eq!(limits.mle_threshold_bytes(), 500 * 1024 * 1024 + 1024 * 1024);
    }
}
