use thiserror::Error;

/// Failures the `Store` contract can surface (spec §7: `StoreFailure`).
///
/// Callers at the dispatcher level treat every variant the same way: log
/// and skip this iteration, never poison other submissions.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database call failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// `update_submission` was called for a row that doesn't exist.
    #[error("submission {0} not found")]
    SubmissionNotFound(i64),
    /// Running the bundled migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
