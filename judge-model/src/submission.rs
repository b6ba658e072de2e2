use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ProblemKey, SubmissionStatus, Verdict};

/// A judge request: one student's code against one problem (spec §3).
///
/// Invariants (checked by [`Submission::validate_transition`] and exercised
/// in tests, spec §8 invariant 1): `status` only ever advances
/// `Pending -> Queued -> Running -> Done`; once `status == Done` the three
/// phase verdicts and `message` must not be mutated again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Row id.
    pub id: i64,
    /// When the submission was created.
    pub ts: DateTime<Utc>,
    /// Optional batch this submission belongs to (e.g. a bulk regrade).
    pub batch_id: Option<i64>,
    /// Identifier of the submitting student.
    pub student_id: String,
    /// The problem being judged against.
    pub problem: ProblemKey,
    /// Progress state.
    pub status: SubmissionStatus,
    /// Pre-build phase verdict.
    pub prebuilt_result: Verdict,
    /// Post-build phase verdict.
    pub postbuilt_result: Verdict,
    /// Judge phase verdict.
    pub judge_result: Verdict,
    /// Human-readable message (e.g. "problem not found").
    pub message: String,
}

impl Submission {
    /// Whether `next` is a legal status transition from `self.status`.
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        use SubmissionStatus::*;
        matches!(
            (self.status, next),
            (Pending, Queued) | (Queued, Running) | (Running, Done)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Submission {
        Submission {
            id: 1,
            ts: Utc::now(),
            batch_id: None,
            student_id: "s1".into(),
            problem: ProblemKey {
                lecture_id: 1,
                assignment_id: 1,
                for_evaluation: false,
            },
            status: SubmissionStatus::Queued,
            prebuilt_result: Verdict::Unprocessed,
            postbuilt_result: Verdict::Unprocessed,
            judge_result: Verdict::Unprocessed,
            message: String::new(),
        }
    }

    #[test]
    fn only_forward_single_step_transitions_are_legal() {
        let sub = sample();
        assert!(sub.can_transition_to(SubmissionStatus::Running));
        assert!(!sub.can_transition_to(SubmissionStatus::Done));
        assert!(!sub.can_transition_to(SubmissionStatus::Pending));
        assert!(!sub.can_transition_to(SubmissionStatus::Queued));
    }

    #[test]
    fn serde_round_trip() {
        let sub = sample();
        let json = serde_json::to_string(&sub).unwrap();
        let back: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(sub, back);
    }
}
