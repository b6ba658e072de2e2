use thiserror::Error;

/// Failure modes the sandbox driver can report (spec §4.1 "Failure modes").
#[derive(Debug, Error)]
pub enum SandboxError {
    /// A Docker Engine API call failed outright (connection, daemon error).
    #[error("docker engine error: {0}")]
    Engine(#[from] bollard::errors::Error),
    /// A container exited but its exit code could not be inspected.
    #[error("failed to inspect exit code of container {container_id}")]
    InspectFailed {
        /// The container whose inspection failed.
        container_id: String,
    },
    /// Issuing `stop` on a timed-out container itself failed.
    #[error("failed to stop timed-out container {container_id}: {source}")]
    StopFailed {
        /// The container that could not be stopped.
        container_id: String,
        /// The underlying engine error.
        #[source]
        source: bollard::errors::Error,
    },
    /// Packing host files into a tar stream for upload failed.
    #[error("failed to archive files for upload: {0}")]
    Archive(#[from] std::io::Error),
}
