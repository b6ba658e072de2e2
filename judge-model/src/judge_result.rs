use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Verdict;

/// The observed outcome of running one [`TestCase`](crate::TestCase) for one
/// [`Submission`](crate::Submission) (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeResult {
    /// Row id, assigned by the store on insert; `None` before insertion.
    pub id: Option<i64>,
    /// When this result was recorded.
    pub ts: DateTime<Utc>,
    /// The submission this result belongs to.
    pub submission_id: i64,
    /// The test case this result belongs to.
    pub testcase_id: i64,
    /// Observed wall time, milliseconds.
    pub time_ms: u64,
    /// Observed peak memory, kilobytes.
    pub memory_kb: u64,
    /// Observed process exit code. `-1` if it could not be inspected.
    pub exit_code: i32,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// The verdict this case was classified with.
    pub verdict: Verdict,
}

impl JudgeResult {
    /// Build a not-yet-inserted result for `(submission_id, testcase_id)`
    /// with the given verdict and zeroed observations, used for the `IE`
    /// rows recorded when a case can't even be attempted (spec §4.5.1,
    /// "a driver error ... yields IE for that case").
    pub fn internal_error(submission_id: i64, testcase_id: i64, ts: DateTime<Utc>) -> JudgeResult {
        JudgeResult {
            id: None,
            ts,
            submission_id,
            testcase_id,
            time_ms: 0,
            memory_kb: 0,
            exit_code: -1,
            stdout: String::new(),
            stderr: String::new(),
            verdict: Verdict::IE,
        }
    }
}
