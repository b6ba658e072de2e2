//! Sandbox test double shared by this crate's pipeline and dispatcher
//! tests, in the spirit of the teacher's `ErrorSandboxRunner`: a fake
//! implementing the same trait as the real driver, configurable to fail on
//! demand.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use judge_sandbox::{Sandbox, SandboxError, Task, TaskResult, Volume};

/// Canned response for [`FakeSandbox::run_task`], set per test.
#[derive(Clone)]
pub struct FakeTaskOutcome {
    /// The `TaskResult` to hand back.
    pub result: TaskResult,
}

impl Default for FakeTaskOutcome {
    fn default() -> FakeTaskOutcome {
        FakeTaskOutcome {
            result: TaskResult { exit_code: 0, stdout: Vec::new(), stderr: Vec::new(), time_ms: 1, memory_bytes: 0, tle: false },
        }
    }
}

/// An in-memory [`Sandbox`] that never touches Docker. Volume operations
/// always succeed; [`FakeSandbox::next_task_result`] queues canned
/// `run_task` outcomes consumed in order, falling back to an `AC`-shaped
/// default once the queue is empty.
#[derive(Default)]
pub struct FakeSandbox {
    counter: AtomicU64,
    queued_results: Mutex<VecDeque<Result<TaskResult, String>>>,
}

impl FakeSandbox {
    /// Push a `run_task` outcome to be returned on the next call, in FIFO
    /// order.
    pub fn queue_result(&self, outcome: Result<TaskResult, String>) {
        self.queued_results.lock().unwrap().push_back(outcome);
    }

    fn next_volume(&self) -> Volume {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        Volume::named(format!("fake-volume-{id}"))
    }
}

#[async_trait]
impl Sandbox for FakeSandbox {
    async fn create_volume(&self) -> Result<Volume, SandboxError> {
        Ok(self.next_volume())
    }

    async fn remove_volume(&self, _volume: &Volume) -> Result<(), SandboxError> {
        Ok(())
    }

    async fn clone_volume(&self, _volume: &Volume) -> Result<Volume, SandboxError> {
        Ok(self.next_volume())
    }

    async fn copy_file(&self, _volume: &Volume, _host_path: &Path, _volume_path: &Path) -> Result<(), SandboxError> {
        Ok(())
    }

    async fn copy_files(&self, _volume: &Volume, _host_paths: &[PathBuf], _dir_in_volume: &Path) -> Result<(), SandboxError> {
        Ok(())
    }

    async fn remove_files(&self, _volume: &Volume, _paths: &[PathBuf]) -> Result<(), SandboxError> {
        Ok(())
    }

    async fn run_task(&self, _task: Task) -> Result<TaskResult, SandboxError> {
        let queued = self.queued_results.lock().unwrap().pop_front();
        match queued {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(SandboxError::InspectFailed { container_id: message }),
            None => Ok(FakeTaskOutcome::default().result),
        }
    }
}
