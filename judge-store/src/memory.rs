use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use judge_model::{JudgeResult, Problem, ProblemKey, Submission, SubmissionStatus, TestCase, Verdict};

use crate::{Store, StoreError};

/// Fixture data for one problem, keyed the same way the Postgres schema is.
#[derive(Debug, Clone, Default)]
struct ProblemFixture {
    problem: Option<Problem>,
    arranged_paths: Vec<PathBuf>,
    required_files: Vec<String>,
    test_cases: Vec<TestCase>,
}

#[derive(Debug, Default)]
struct MemoryStoreState {
    submissions: HashMap<i64, Submission>,
    uploaded_paths: HashMap<i64, Vec<PathBuf>>,
    problems: HashMap<ProblemKey, ProblemFixture>,
    judge_results: Vec<JudgeResult>,
    next_result_id: i64,
}

/// In-memory `Store` test double (the pipeline/dispatcher tests' stand-in
/// for a live Postgres instance). Seed it directly via
/// [`MemoryStore::seed_submission`]/[`MemoryStore::seed_problem`] and
/// inspect its contents with [`MemoryStore::submission`].
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryStoreState>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Insert or replace a submission row.
    pub fn seed_submission(&self, submission: Submission) {
        self.state.lock().unwrap().submissions.insert(submission.id, submission);
    }

    /// Register the uploaded file paths for a submission.
    pub fn seed_uploaded_paths(&self, submission_id: i64, paths: Vec<PathBuf>) {
        self.state.lock().unwrap().uploaded_paths.insert(submission_id, paths);
    }

    /// Register a problem plus its arranged files, required files and test
    /// cases in one call.
    pub fn seed_problem(
        &self,
        problem: Problem,
        arranged_paths: Vec<PathBuf>,
        required_files: Vec<String>,
        test_cases: Vec<TestCase>,
    ) {
        let key = problem.key;
        self.state.lock().unwrap().problems.insert(
            key,
            ProblemFixture { problem: Some(problem), arranged_paths, required_files, test_cases },
        );
    }

    /// Read back a submission's current row, for assertions.
    pub fn submission(&self, id: i64) -> Option<Submission> {
        self.state.lock().unwrap().submissions.get(&id).cloned()
    }

    /// Read back every recorded judge result, for assertions.
    pub fn all_judge_results(&self) -> Vec<JudgeResult> {
        self.state.lock().unwrap().judge_results.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn claim_queued(&self, n: i64) -> Result<Vec<Submission>, StoreError> {
        let mut state = self.state.lock().unwrap();
        let mut ids: Vec<i64> = state
            .submissions
            .values()
            .filter(|s| s.status == SubmissionStatus::Queued)
            .map(|s| s.id)
            .collect();
        ids.sort_unstable();
        ids.truncate(n.max(0) as usize);

        let mut claimed = Vec::with_capacity(ids.len());
        for id in ids {
            let submission = state.submissions.get_mut(&id).unwrap();
            submission.status = SubmissionStatus::Running;
            claimed.push(submission.clone());
        }
        Ok(claimed)
    }

    async fn fetch_problem(&self, key: ProblemKey) -> Result<Option<Problem>, StoreError> {
        Ok(self.state.lock().unwrap().problems.get(&key).and_then(|f| f.problem.clone()))
    }

    async fn fetch_uploaded_paths(&self, submission_id: i64) -> Result<Vec<PathBuf>, StoreError> {
        Ok(self.state.lock().unwrap().uploaded_paths.get(&submission_id).cloned().unwrap_or_default())
    }

    async fn fetch_arranged_paths(&self, key: ProblemKey) -> Result<Vec<PathBuf>, StoreError> {
        Ok(self.state.lock().unwrap().problems.get(&key).map(|f| f.arranged_paths.clone()).unwrap_or_default())
    }

    async fn fetch_required_files(&self, key: ProblemKey) -> Result<Vec<String>, StoreError> {
        Ok(self.state.lock().unwrap().problems.get(&key).map(|f| f.required_files.clone()).unwrap_or_default())
    }

    async fn fetch_test_cases(&self, key: ProblemKey) -> Result<Vec<TestCase>, StoreError> {
        Ok(self.state.lock().unwrap().problems.get(&key).map(|f| f.test_cases.clone()).unwrap_or_default())
    }

    async fn insert_judge_result(&self, mut result: JudgeResult) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.next_result_id += 1;
        result.id = Some(state.next_result_id);
        state.judge_results.push(result);
        Ok(())
    }

    async fn update_submission(&self, submission: &Submission) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if !state.submissions.contains_key(&submission.id) {
            return Err(StoreError::SubmissionNotFound(submission.id));
        }
        state.submissions.insert(submission.id, submission.clone());
        Ok(())
    }

    async fn undo_running(&self) -> Result<usize, StoreError> {
        let mut state = self.state.lock().unwrap();
        let running_ids: Vec<i64> = state
            .submissions
            .values()
            .filter(|s| s.status == SubmissionStatus::Running)
            .map(|s| s.id)
            .collect();

        for id in &running_ids {
            if let Some(submission) = state.submissions.get_mut(id) {
                submission.status = SubmissionStatus::Queued;
                submission.prebuilt_result = Verdict::Unprocessed;
                submission.postbuilt_result = Verdict::Unprocessed;
                submission.judge_result = Verdict::Unprocessed;
            }
        }
        state.judge_results.retain(|r| !running_ids.contains(&r.submission_id));
        Ok(running_ids.len())
    }

    async fn fetch_judge_results(&self, submission_id: i64) -> Result<Vec<JudgeResult>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .judge_results
            .iter()
            .filter(|r| r.submission_id == submission_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn submission(id: i64, status: SubmissionStatus) -> Submission {
        Submission {
            id,
            ts: Utc::now(),
            batch_id: None,
            student_id: "s1".into(),
            problem: ProblemKey { lecture_id: 1, assignment_id: 1, for_evaluation: false },
            status,
            prebuilt_result: Verdict::Unprocessed,
            postbuilt_result: Verdict::Unprocessed,
            judge_result: Verdict::Unprocessed,
            message: String::new(),
        }
    }

    #[tokio::test]
    async fn claim_queued_flips_status_and_is_exhaustible() {
        let store = MemoryStore::new();
        store.seed_submission(submission(1, SubmissionStatus::Queued));
        store.seed_submission(submission(2, SubmissionStatus::Queued));

        let claimed = store.claim_queued(10).await.unwrap();
        assert_eq!(claimed.len(), 2);
        assert!(claimed.iter().all(|s| s.status == SubmissionStatus::Running));

        let claimed_again = store.claim_queued(10).await.unwrap();
        assert!(claimed_again.is_empty());
    }

    #[tokio::test]
    async fn claim_queued_respects_the_requested_batch_size() {
        let store = MemoryStore::new();
        for id in 1..=5 {
            store.seed_submission(submission(id, SubmissionStatus::Queued));
        }
        let claimed = store.claim_queued(3).await.unwrap();
        assert_eq!(claimed.len(), 3);
    }

    #[tokio::test]
    async fn undo_running_restores_queued_and_drops_results() {
        let store = MemoryStore::new();
        store.seed_submission(submission(1, SubmissionStatus::Running));
        store
            .insert_judge_result(JudgeResult::internal_error(1, 1, Utc::now()))
            .await
            .unwrap();

        let restored = store.undo_running().await.unwrap();
        assert_eq!(restored, 1);
        assert_eq!(store.submission(1).unwrap().status, SubmissionStatus::Queued);
        assert!(store.fetch_judge_results(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_submission_rejects_unknown_id() {
        let store = MemoryStore::new();
        let err = store.update_submission(&submission(42, SubmissionStatus::Done)).await;
        assert!(matches!(err, Err(StoreError::SubmissionNotFound(42))));
    }
}
