use serde::{Deserialize, Serialize};

/// Progress state of a [`Submission`](crate::Submission).
///
/// Advances monotonically `Pending -> Queued -> Running -> Done`; once
/// `Done` a submission's verdicts are immutable. `Ord` follows declaration
/// order so the monotonicity invariant can be checked with a plain `<=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Uploaded but not yet handed to the judge (e.g. still awaiting other
    /// files in a batch).
    Pending,
    /// Enqueued, waiting to be claimed by a dispatcher.
    Queued,
    /// Claimed by a dispatcher and being worked on by the pool.
    Running,
    /// Finished; `prebuilt`/`postbuilt`/`judge` verdicts won't change again.
    Done,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Queued => "queued",
            SubmissionStatus::Running => "running",
            SubmissionStatus::Done => "done",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "pending" => SubmissionStatus::Pending,
            "queued" => SubmissionStatus::Queued,
            "running" => SubmissionStatus::Running,
            "done" => SubmissionStatus::Done,
            other => return Err(format!("unknown submission status: {other}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progresses_monotonically() {
        assert!(SubmissionStatus::Pending < SubmissionStatus::Queued);
        assert!(SubmissionStatus::Queued < SubmissionStatus::Running);
        assert!(SubmissionStatus::Running < SubmissionStatus::Done);
    }
}
