use std::sync::Arc;
use std::time::Duration;

use judge_store::Store;
use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::time::interval;

use crate::pipeline::Pipeline;
use crate::worker_pool::WorkerPool;

/// The cooperative claim loop (spec §4.7): every `period`, drain finished
/// jobs, claim `min(available_slots, claim_batch)` queued submissions, and
/// hand each to the pool. On cancellation, drains the pool and runs the
/// store's shutdown undo.
pub struct Dispatcher {
    store: Arc<dyn Store>,
    pool: WorkerPool,
    pipeline: Pipeline,
    period: Duration,
    claim_batch: usize,
}

impl Dispatcher {
    /// Default claim batch ceiling (spec §6).
    pub const DEFAULT_CLAIM_BATCH: usize = 10;
    /// Default dispatcher period (spec §4.7).
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5);
    /// Default worker pool size (spec §6).
    pub const DEFAULT_POOL_SIZE: usize = 50;

    /// Build a dispatcher over a store, a worker pool and the pipeline
    /// template each claimed submission is run through.
    pub fn new(store: Arc<dyn Store>, pool: WorkerPool, pipeline: Pipeline, period: Duration, claim_batch: usize) -> Dispatcher {
        Dispatcher { store, pool, pipeline, period, claim_batch }
    }

    /// Run the loop until `cancel` is signalled, then drain and undo.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                res = cancel.changed() => {
                    if res.is_err() || *cancel.borrow() {
                        break;
                    }
                }
            }
        }

        info!("dispatcher cancelled, draining worker pool");
        self.pool.shutdown(true).await;

        match self.store.undo_running().await {
            Ok(n) => info!("undo: restored {n} submission(s) to queued"),
            Err(e) => warn!("undo failed: {e}"),
        }
    }

    /// One iteration: drain completed jobs, claim up to the available
    /// slots, submit each claimed submission.
    async fn tick(&self) {
        for job in self.pool.collect_completed().await {
            match job.result {
                Ok(()) => debug!("submission {} finished", job.job_id),
                Err(e) => warn!("submission {} pipeline error: {e}", job.job_id),
            }
        }

        let available = self.pool.available_slots();
        if available == 0 {
            return;
        }
        let batch = available.min(self.claim_batch);

        let claimed = match self.store.claim_queued(batch as i64).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("claim failed, skipping this tick: {e}");
                return;
            }
        };

        for submission in claimed {
            let job_id = submission.id;
            let pipeline = self.pipeline.clone();
            let submitted = self.pool.submit(job_id, async move { pipeline.run_submission(submission).await });
            if !submitted {
                warn!("submission {job_id} claimed but pool rejected it (should be unreachable)");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use judge_model::{ProblemKey, Submission, SubmissionStatus, Verdict};
    use judge_store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn submission(id: i64) -> Submission {
        Submission {
            id,
            ts: Utc::now(),
            batch_id: None,
            student_id: "s1".into(),
            problem: ProblemKey { lecture_id: 1, assignment_id: 1, for_evaluation: false },
            status: SubmissionStatus::Queued,
            prebuilt_result: Verdict::Unprocessed,
            postbuilt_result: Verdict::Unprocessed,
            judge_result: Verdict::Unprocessed,
            message: String::new(),
        }
    }

    #[tokio::test]
    async fn a_tick_claims_no_more_than_available_slots() {
        let store = Arc::new(MemoryStore::new());
        for id in 1..=5 {
            store.seed_submission(submission(id));
        }
        let sandbox = Arc::new(crate::testing::FakeSandbox::default());
        let pipeline = Pipeline::new(store.clone(), sandbox, std::path::PathBuf::from("/tmp"), crate::Images {
            binary_runner: "binary-runner".into(),
            compiler: "compiler".into(),
        });
        let pool = WorkerPool::new(2);
        let dispatcher = Dispatcher::new(store.clone(), pool, pipeline, Duration::from_secs(5), 10);

        dispatcher.tick().await;

        let running = (1..=5).filter(|id| store.submission(*id).unwrap().status == SubmissionStatus::Running).count();
        assert_eq!(running, 2);
    }
}
