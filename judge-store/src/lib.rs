//! The backing store contract (spec §4.8) and its implementations: a
//! `sqlx`-backed Postgres store for production, an in-memory store for
//! tests that don't want a live database.
#![deny(missing_docs)]

mod error;
mod memory;
mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use std::path::PathBuf;

use async_trait::async_trait;
use judge_model::{JudgeResult, Problem, ProblemKey, Submission, TestCase};

/// Everything the dispatcher and pipeline need from the backing store
/// (spec §4.8). Implementations must make `claim_queued` atomic: the
/// selected rows transition `Queued -> Running` in the same transaction
/// that reads them, so two callers racing on the same rows never both
/// claim one (spec §8 scenario 7).
#[async_trait]
pub trait Store: Send + Sync {
    /// Atomically claim up to `n` queued submissions, flipping them to
    /// `Running` and returning the rows as claimed.
    async fn claim_queued(&self, n: i64) -> Result<Vec<Submission>, StoreError>;

    /// Look up a problem by key, if it exists.
    async fn fetch_problem(&self, key: ProblemKey) -> Result<Option<Problem>, StoreError>;

    /// Paths of every file the student uploaded with a submission.
    async fn fetch_uploaded_paths(&self, submission_id: i64) -> Result<Vec<PathBuf>, StoreError>;

    /// Paths of every instructor-arranged file for a problem.
    async fn fetch_arranged_paths(&self, key: ProblemKey) -> Result<Vec<PathBuf>, StoreError>;

    /// Filenames a student is required to supply for a problem.
    async fn fetch_required_files(&self, key: ProblemKey) -> Result<Vec<String>, StoreError>;

    /// Every test case attached to a problem, across all phases.
    async fn fetch_test_cases(&self, key: ProblemKey) -> Result<Vec<TestCase>, StoreError>;

    /// Persist one case's outcome.
    async fn insert_judge_result(&self, result: JudgeResult) -> Result<(), StoreError>;

    /// Patch a submission's status, phase verdicts and message.
    async fn update_submission(&self, submission: &Submission) -> Result<(), StoreError>;

    /// Shutdown-time repair (spec §4.7): move every `Running` submission
    /// back to `Queued` and delete the `JudgeResult` rows that belong to
    /// them. Returns the number of submissions restored.
    async fn undo_running(&self) -> Result<usize, StoreError>;

    /// All recorded results for a submission, newest-last. Not exercised by
    /// the dispatcher itself; exposed for the `judge status` CLI
    /// subcommand (spec.md's ingress is out of scope, but this one
    /// read-only accessor costs nothing once the schema exists).
    async fn fetch_judge_results(&self, submission_id: i64) -> Result<Vec<JudgeResult>, StoreError>;
}
