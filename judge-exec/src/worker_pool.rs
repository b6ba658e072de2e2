use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use log::warn;
use tokio::task::JoinHandle;

/// One finished job, as returned by [`WorkerPool::collect_completed`].
pub struct CompletedJob {
    /// The id it was submitted with.
    pub job_id: i64,
    /// When it was submitted.
    pub submitted_at: Instant,
    /// Its outcome: `Err` only for a submission pipeline that itself
    /// returned an error (a failed final `update_submission`) or panicked.
    pub result: anyhow::Result<()>,
}

struct ActiveJob {
    submitted_at: Instant,
    handle: JoinHandle<anyhow::Result<()>>,
}

/// A bounded pool of concurrent job slots (spec §4.6). Jobs are independent
/// `tokio` tasks; the pool tracks them only well enough to report
/// `available_slots`, collect finished ones, and drain on shutdown.
pub struct WorkerPool {
    capacity: usize,
    active: Mutex<HashMap<i64, ActiveJob>>,
    closed: AtomicBool,
}

impl WorkerPool {
    /// A pool that runs at most `capacity` jobs at once.
    pub fn new(capacity: usize) -> WorkerPool {
        WorkerPool { capacity, active: Mutex::new(HashMap::new()), closed: AtomicBool::new(false) }
    }

    /// `N - active count`.
    pub fn available_slots(&self) -> usize {
        let active = self.active.lock().unwrap();
        self.capacity.saturating_sub(active.len())
    }

    /// Accept `fut` under `job_id` iff a slot is free and the pool hasn't
    /// been shut down. Never blocks; spawns onto the `tokio` runtime.
    pub fn submit<F>(&self, job_id: i64, fut: F) -> bool
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }
        let mut active = self.active.lock().unwrap();
        if active.len() >= self.capacity {
            return false;
        }
        let handle = tokio::spawn(fut);
        active.insert(job_id, ActiveJob { submitted_at: Instant::now(), handle });
        true
    }

    /// Remove every finished job and return its outcome.
    pub async fn collect_completed(&self) -> Vec<CompletedJob> {
        let finished_ids: Vec<i64> = {
            let active = self.active.lock().unwrap();
            active.iter().filter(|(_, job)| job.handle.is_finished()).map(|(id, _)| *id).collect()
        };

        let mut completed = Vec::with_capacity(finished_ids.len());
        for id in finished_ids {
            let job = self.active.lock().unwrap().remove(&id);
            if let Some(job) = job {
                let submitted_at = job.submitted_at;
                let result = match job.handle.await {
                    Ok(r) => r,
                    Err(e) => Err(anyhow::anyhow!("job {id} panicked: {e}")),
                };
                completed.push(CompletedJob { job_id: id, submitted_at, result });
            }
        }
        completed
    }

    /// Prevent new submissions. If `drain`, wait for every active job to
    /// finish before returning; otherwise return immediately, leaving them
    /// to run to completion in the background.
    pub async fn shutdown(&self, drain: bool) {
        self.closed.store(true, Ordering::SeqCst);
        if !drain {
            return;
        }
        let jobs: Vec<(i64, ActiveJob)> = self.active.lock().unwrap().drain().collect();
        for (id, job) in jobs {
            if let Err(e) = job.handle.await {
                warn!("job {id} panicked during shutdown: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn submit_is_rejected_once_capacity_is_reached() {
        let pool = WorkerPool::new(1);
        let (tx, rx) = oneshot::channel::<()>();
        assert!(pool.submit(1, async move {
            rx.await.ok();
            Ok(())
        }));
        assert_eq!(pool.available_slots(), 0);
        assert!(!pool.submit(2, async { Ok(()) }));

        tx.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let completed = pool.collect_completed().await;
        assert_eq!(completed.len(), 1);
        assert_eq!(pool.available_slots(), 1);
    }

    #[tokio::test]
    async fn collect_completed_only_returns_finished_jobs() {
        let pool = WorkerPool::new(2);
        pool.submit(1, async { Ok(()) });
        let (tx, rx) = oneshot::channel::<()>();
        pool.submit(2, async move {
            rx.await.ok();
            Ok(())
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        let completed = pool.collect_completed().await;
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].job_id, 1);
        assert_eq!(pool.available_slots(), 1);

        tx.send(()).unwrap();
    }

    #[tokio::test]
    async fn shutdown_drain_waits_for_active_jobs_and_blocks_new_submissions() {
        let pool = WorkerPool::new(1);
        let (tx, rx) = oneshot::channel::<()>();
        pool.submit(1, async move {
            rx.await.ok();
            Ok(())
        });

        tx.send(()).unwrap();
        pool.shutdown(true).await;
        assert!(!pool.submit(2, async { Ok(()) }));
    }
}
