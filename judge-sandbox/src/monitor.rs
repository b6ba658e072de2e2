use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bollard::container::StatsOptions;
use bollard::Docker;
use futures::StreamExt;
use log::{trace, warn};
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Where a sample of a container's current memory usage comes from
/// (spec §4.2: "preferred source is the kernel counter; a fallback may
/// parse a runtime stats command").
#[derive(Debug, Clone)]
enum MemorySource {
    /// Read `memory.current` out of the container's cgroup directly.
    CgroupFile(PathBuf),
    /// Ask the Docker daemon for a stats snapshot instead.
    DockerStats { docker: Docker, container_id: String },
}

/// Samples a container's peak memory usage at 1 ms resolution while it runs
/// (spec §4.2). Never fails the task it is monitoring: a missing counter
/// reads as zero.
pub struct ResourceMonitor {
    start: Instant,
    peak_bytes: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    sampler: Option<JoinHandle<()>>,
}

impl ResourceMonitor {
    /// Record the start timestamp and launch the concurrent sampler.
    pub fn start(docker: Docker, container_id: String, cgroup_path: Option<PathBuf>) -> ResourceMonitor {
        let peak_bytes = Arc::new(AtomicU64::new(0));
        let stop = Arc::new(AtomicBool::new(false));
        let source = match cgroup_path {
            Some(path) => MemorySource::CgroupFile(path),
            None => MemorySource::DockerStats { docker, container_id },
        };

        let sampler = tokio::spawn(sample_loop(source, peak_bytes.clone(), stop.clone()));

        ResourceMonitor {
            start: Instant::now(),
            peak_bytes,
            stop,
            sampler: Some(sampler),
        }
    }

    /// Elapsed wall-clock time since [`ResourceMonitor::start`], in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Signal the sampler to stop and join it; guaranteed to return only
    /// after the sampler has terminated (spec §4.2 contract).
    pub async fn end(mut self) -> u64 {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.sampler.take() {
            if let Err(e) = handle.await {
                warn!("resource monitor sampler task panicked: {e}");
            }
        }
        self.peak_bytes.load(Ordering::SeqCst)
    }
}

async fn sample_loop(source: MemorySource, peak_bytes: Arc<AtomicU64>, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::SeqCst) {
        let sample = match &source {
            MemorySource::CgroupFile(path) => read_cgroup_memory(path).await,
            MemorySource::DockerStats { docker, container_id } => {
                read_docker_stats_memory(docker, container_id).await
            }
        };
        if let Some(bytes) = sample {
            peak_bytes.fetch_max(bytes, Ordering::SeqCst);
        }
        sleep(Duration::from_millis(1)).await;
    }
}

async fn read_cgroup_memory(path: &PathBuf) -> Option<u64> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents.trim().parse::<u64>().ok(),
        Err(e) => {
            trace!("memory counter {} unreadable: {e}", path.display());
            None
        }
    }
}

async fn read_docker_stats_memory(docker: &Docker, container_id: &str) -> Option<u64> {
    let options = StatsOptions {
        stream: false,
        one_shot: true,
    };
    let mut stream = docker.stats(container_id, Some(options));
    let stats = stream.next().await?.ok()?;
    stats.memory_stats.usage
}
