use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use judge_model::{ExecutionLimits, JudgeResult, Phase, Problem, ProblemKey, Submission, SubmissionStatus, TestCase, Verdict};
use judge_sandbox::{Mount, Sandbox, Task, TaskResult, Volume};
use judge_store::Store;
use log::{info, warn};

use crate::aggregator::Aggregator;
use crate::comparator::Comparator;

/// Container images the pipeline runs cases under (spec §6 "Container
/// images required").
#[derive(Debug, Clone)]
pub struct Images {
    /// Runs problem executables and script-override test cases.
    pub binary_runner: String,
    /// Runs the problem's build script.
    pub compiler: String,
}

/// Fixed mountpoint every task's working directory is bound to (spec §4.1).
const WORKDIR: &str = "/workdir";

/// Drives one claimed [`Submission`] through pre-build, compile,
/// post-build and judge (spec §4.5). Holds its collaborators behind `Arc`
/// (rather than borrowing them) so a pipeline run can be handed to
/// [`crate::WorkerPool::submit`] as a `'static` future; tests inject fakes
/// through the same trait objects.
#[derive(Clone)]
pub struct Pipeline {
    store: Arc<dyn Store>,
    sandbox: Arc<dyn Sandbox>,
    resource_path: PathBuf,
    images: Images,
}

impl Pipeline {
    /// Build a pipeline over a store, a sandbox driver, the root every
    /// problem-relative path is resolved against, and the images to run
    /// cases under.
    pub fn new(store: Arc<dyn Store>, sandbox: Arc<dyn Sandbox>, resource_path: PathBuf, images: Images) -> Pipeline {
        Pipeline { store, sandbox, resource_path, images }
    }

    /// Run `submission` (already claimed, `status = Running`) through the
    /// full pipeline and persist its final state. The only error this can
    /// return is a failure to persist the final `update_submission` call;
    /// every other failure is absorbed into a verdict (spec §7).
    pub async fn run_submission(&self, mut submission: Submission) -> anyhow::Result<()> {
        let volume = self.run_phases(&mut submission).await;

        if let Some(volume) = volume {
            if let Err(e) = self.sandbox.remove_volume(&volume).await {
                warn!("failed to remove working volume {}: {e}", volume.name());
            }
        }

        submission.status = SubmissionStatus::Done;
        self.store.update_submission(&submission).await?;
        info!(
            "submission {} done: pre={} post={} judge={}",
            submission.id, submission.prebuilt_result, submission.postbuilt_result, submission.judge_result
        );
        Ok(())
    }

    /// Runs every phase, mutating `submission`'s verdicts/message in place.
    /// Returns the working volume if one was created, so the caller can
    /// remove it regardless of which path returned.
    async fn run_phases(&self, submission: &mut Submission) -> Option<Volume> {
        let problem = match self.store.fetch_problem(submission.problem).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                submission.message = "problem not found".to_string();
                return None;
            }
            Err(e) => {
                warn!("submission {}: failed to fetch problem: {e}", submission.id);
                submission.message = format!("store error: {e}");
                return None;
            }
        };

        let (uploaded, arranged, required, test_cases) = match self.load_file_lists(submission.id, submission.problem).await {
            Ok(lists) => lists,
            Err(e) => {
                warn!("submission {}: failed to load context: {e}", submission.id);
                submission.message = format!("store error: {e}");
                return None;
            }
        };

        let missing = missing_required_files(&required, &uploaded);
        if !missing.is_empty() {
            warn!("submission {}: missing required file(s): {}", submission.id, missing.join(", "));
            submission.message = format!("missing required file(s): {}", missing.join(", "));
            self.mark_all_cases_ie(submission.id, &test_cases).await;
            return None;
        }

        let working_volume = match self.materialize_working_volume(&uploaded, &arranged).await {
            Ok(v) => v,
            Err(e) => {
                warn!("submission {}: failed to materialize working volume: {e}", submission.id);
                submission.message = "failed to set up working volume".to_string();
                self.mark_all_cases_ie(submission.id, &test_cases).await;
                return None;
            }
        };

        let pre_build: Vec<&TestCase> = test_cases.iter().filter(|c| c.phase == Phase::PreBuild).collect();
        let post_build: Vec<&TestCase> = test_cases.iter().filter(|c| c.phase == Phase::PostBuild).collect();
        let judge_cases: Vec<&TestCase> = test_cases.iter().filter(|c| c.phase == Phase::Judge).collect();

        let pre_build_limits = ExecutionLimits::fixed_build_phase();
        let prebuilt_result = self
            .run_phase_cases(submission.id, &working_volume, &pre_build, &self.images.binary_runner, &problem, pre_build_limits.clone())
            .await;
        submission.prebuilt_result = prebuilt_result;
        if prebuilt_result != Verdict::AC {
            return Some(working_volume);
        }

        if let Err(()) = self.compile(submission.id, &working_volume, &problem).await {
            submission.postbuilt_result = Verdict::CE;
            return Some(working_volume);
        }

        let post_build_limits = ExecutionLimits::fixed_build_phase();
        let postbuilt_result = self
            .run_phase_cases(submission.id, &working_volume, &post_build, &self.images.compiler, &problem, post_build_limits)
            .await;
        submission.postbuilt_result = postbuilt_result;
        if postbuilt_result != Verdict::AC {
            return Some(working_volume);
        }

        let judge_limits = ExecutionLimits::for_judge_phase(problem.time_ms, problem.memory_mb);
        let judge_result = self
            .run_phase_cases(submission.id, &working_volume, &judge_cases, &self.images.binary_runner, &problem, judge_limits)
            .await;
        submission.judge_result = judge_result;

        Some(working_volume)
    }

    async fn load_file_lists(
        &self,
        submission_id: i64,
        key: ProblemKey,
    ) -> Result<(Vec<PathBuf>, Vec<PathBuf>, Vec<String>, Vec<TestCase>), judge_store::StoreError> {
        let uploaded = self.store.fetch_uploaded_paths(submission_id).await?;
        let arranged = self.store.fetch_arranged_paths(key).await?;
        let required = self.store.fetch_required_files(key).await?;
        let test_cases = self.store.fetch_test_cases(key).await?;
        Ok((uploaded, arranged, required, test_cases))
    }

    async fn materialize_working_volume(&self, uploaded: &[PathBuf], arranged: &[PathBuf]) -> anyhow::Result<Volume> {
        let volume = self.sandbox.create_volume().await?;
        let mut all_files = Vec::with_capacity(uploaded.len() + arranged.len());
        all_files.extend(uploaded.iter().map(|p| self.resource_path.join(p)));
        all_files.extend(arranged.iter().map(|p| self.resource_path.join(p)));
        if !all_files.is_empty() {
            self.sandbox.copy_files(&volume, &all_files, Path::new(WORKDIR)).await?;
        }
        Ok(volume)
    }

    async fn mark_all_cases_ie(&self, submission_id: i64, test_cases: &[TestCase]) {
        let now = Utc::now();
        for case in test_cases {
            let result = JudgeResult::internal_error(submission_id, case.id, now);
            if let Err(e) = self.store.insert_judge_result(result).await {
                warn!("submission {submission_id}: failed to record IE for case {}: {e}", case.id);
            }
        }
    }

    /// Run every case in a phase, returning the aggregated verdict (spec
    /// §4.5 steps 3/5/6). Zero cases aggregates to `AC` (spec §8).
    async fn run_phase_cases(
        &self,
        submission_id: i64,
        working_volume: &Volume,
        cases: &[&TestCase],
        image: &str,
        problem: &Problem,
        limits: ExecutionLimits,
    ) -> Verdict {
        let mut aggregator = Aggregator::new();
        for case in cases {
            let verdict = self.run_case(submission_id, working_volume, case, image, problem, limits.clone()).await;
            aggregator.update(verdict);
        }
        aggregator.result()
    }

    /// `runCase` (spec §4.5): clone the working volume, run the case, record
    /// its result, clean up the clone regardless of outcome.
    async fn run_case(
        &self,
        submission_id: i64,
        working_volume: &Volume,
        case: &TestCase,
        image: &str,
        problem: &Problem,
        limits: ExecutionLimits,
    ) -> Verdict {
        let clone = match self.sandbox.clone_volume(working_volume).await {
            Ok(v) => v,
            Err(e) => {
                warn!("submission {submission_id}: case {}: clone failed: {e}", case.id);
                self.record_case_result(submission_id, case.id, JudgeResult::internal_error(submission_id, case.id, Utc::now())).await;
                return Verdict::IE;
            }
        };

        let verdict = self.run_case_in_clone(submission_id, &clone, case, image, problem, limits).await;

        if let Err(e) = self.sandbox.remove_volume(&clone).await {
            warn!("submission {submission_id}: case {}: failed to remove clone: {e}", case.id);
        }
        verdict
    }

    async fn run_case_in_clone(
        &self,
        submission_id: i64,
        clone: &Volume,
        case: &TestCase,
        image: &str,
        problem: &Problem,
        limits: ExecutionLimits,
    ) -> Verdict {
        let argv0 = if let Some(script_path) = &case.script_path {
            let in_volume_path = Path::new(WORKDIR).join(script_path.file_name().unwrap_or_default());
            let host_path = self.resource_path.join(script_path);
            if let Err(e) = self.sandbox.copy_file(clone, &host_path, &in_volume_path).await {
                warn!("submission {submission_id}: case {}: failed to copy script override: {e}", case.id);
                self.record_ie(submission_id, case.id).await;
                return Verdict::IE;
            }
            in_volume_path.to_string_lossy().to_string()
        } else {
            Path::new(WORKDIR).join(&problem.executable).to_string_lossy().to_string()
        };

        let fixtures = match self.read_case_fixtures(case).await {
            Ok(f) => f,
            Err(e) => {
                warn!("submission {submission_id}: case {}: missing fixture: {e}", case.id);
                self.record_ie(submission_id, case.id).await;
                return Verdict::IE;
            }
        };

        let mut args = vec![argv0];
        args.extend(fixtures.argument_tokens);

        let task = Task {
            image: image.to_string(),
            args,
            stdin: fixtures.stdin,
            limits: limits.clone(),
            workdir: PathBuf::from(WORKDIR),
            mounts: vec![Mount { volume: clone.clone(), path: PathBuf::from(WORKDIR), read_only: false }],
        };

        let task_result = match self.sandbox.run_task(task).await {
            Ok(r) => r,
            Err(e) => {
                warn!("submission {submission_id}: case {}: task failed: {e}", case.id);
                self.record_ie(submission_id, case.id).await;
                return Verdict::IE;
            }
        };

        let verdict = classify(&task_result, case, &limits, &fixtures);
        let result = JudgeResult {
            id: None,
            ts: Utc::now(),
            submission_id,
            testcase_id: case.id,
            time_ms: task_result.time_ms,
            memory_kb: task_result.memory_bytes / 1024,
            exit_code: task_result.exit_code,
            stdout: String::from_utf8_lossy(&task_result.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&task_result.stderr).into_owned(),
            verdict,
        };
        self.record_case_result(submission_id, case.id, result).await;
        verdict
    }

    async fn read_case_fixtures(&self, case: &TestCase) -> anyhow::Result<CaseFixtures> {
        let argument_tokens: Vec<String> = tokio::fs::read_to_string(self.resource_path.join(&case.argument_path))
            .await
            .map(|s| s.split_whitespace().map(str::to_string).collect())?;

        let stdin = match &case.stdin_path {
            Some(path) => tokio::fs::read(self.resource_path.join(path)).await?,
            None => Vec::new(),
        };
        let expected_stdout = tokio::fs::read(self.resource_path.join(&case.stdout_path)).await?;
        let expected_stderr = tokio::fs::read(self.resource_path.join(&case.stderr_path)).await?;

        Ok(CaseFixtures { argument_tokens, stdin, expected_stdout, expected_stderr })
    }

    async fn record_ie(&self, submission_id: i64, testcase_id: i64) {
        self.record_case_result(submission_id, testcase_id, JudgeResult::internal_error(submission_id, testcase_id, Utc::now())).await;
    }

    async fn record_case_result(&self, submission_id: i64, testcase_id: i64, result: JudgeResult) {
        if let Err(e) = self.store.insert_judge_result(result).await {
            warn!("submission {submission_id}: failed to record result for case {testcase_id}: {e}");
        }
    }

    /// Read the build script's tokens and run it as a compile `Task` (spec
    /// §4.5 step 4). `Err(())` signals a non-silent compile failure, which
    /// callers turn into `CE`.
    async fn compile(&self, submission_id: i64, working_volume: &Volume, problem: &Problem) -> Result<(), ()> {
        let tokens = match tokio::fs::read_to_string(self.resource_path.join(&problem.build_script_path)).await {
            Ok(contents) => contents.split_whitespace().map(str::to_string).collect::<Vec<_>>(),
            Err(e) => {
                warn!("submission {submission_id}: failed to read build script: {e}");
                return Err(());
            }
        };
        if tokens.is_empty() {
            warn!("submission {submission_id}: build script is empty");
            return Err(());
        }

        let task = Task {
            image: self.images.compiler.clone(),
            args: tokens,
            stdin: Vec::new(),
            limits: ExecutionLimits::fixed_build_phase(),
            workdir: PathBuf::from(WORKDIR),
            mounts: vec![Mount { volume: working_volume.clone(), path: PathBuf::from(WORKDIR), read_only: false }],
        };

        match self.sandbox.run_task(task).await {
            Ok(result) if result.exit_code == 0 && !result.tle => Ok(()),
            Ok(result) => {
                warn!("submission {submission_id}: compile exited {} (tle={})", result.exit_code, result.tle);
                Err(())
            }
            Err(e) => {
                warn!("submission {submission_id}: compile task failed: {e}");
                Err(())
            }
        }
    }
}

/// Names declared required (spec §4.5 step 1) that aren't among the
/// student's uploaded files, by filename.
fn missing_required_files(required: &[String], uploaded: &[PathBuf]) -> Vec<String> {
    let uploaded_names: std::collections::HashSet<_> =
        uploaded.iter().filter_map(|p| p.file_name()).map(|n| n.to_string_lossy().into_owned()).collect();
    required.iter().filter(|name| !uploaded_names.contains(name.as_str())).cloned().collect()
}

struct CaseFixtures {
    argument_tokens: Vec<String>,
    stdin: Vec<u8>,
    expected_stdout: Vec<u8>,
    expected_stderr: Vec<u8>,
}

/// Classification order from spec §4.5.1.
fn classify(result: &TaskResult, case: &TestCase, limits: &ExecutionLimits, fixtures: &CaseFixtures) -> Verdict {
    if result.tle {
        return Verdict::TLE;
    }
    if result.memory_bytes > limits.mle_threshold_bytes() {
        return Verdict::MLE;
    }
    if result.exit_code != case.expected_exit_code {
        return Verdict::RE;
    }
    let output_matches =
        Comparator::matches(&fixtures.expected_stdout, &result.stdout) && Comparator::matches(&fixtures.expected_stderr, &result.stderr);
    if output_matches {
        Verdict::AC
    } else {
        Verdict::WA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use judge_store::MemoryStore;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::testing::FakeSandbox;

    fn base_submission(id: i64) -> Submission {
        Submission {
            id,
            ts: Utc::now(),
            batch_id: None,
            student_id: "student-1".into(),
            problem: ProblemKey { lecture_id: 1, assignment_id: 1, for_evaluation: false },
            status: SubmissionStatus::Running,
            prebuilt_result: Verdict::Unprocessed,
            postbuilt_result: Verdict::Unprocessed,
            judge_result: Verdict::Unprocessed,
            message: String::new(),
        }
    }

    fn single_judge_case(id: i64) -> TestCase {
        TestCase {
            id,
            phase: Phase::Judge,
            script_path: None,
            argument_path: "args.txt".into(),
            stdin_path: None,
            stdout_path: "expected.stdout".into(),
            stderr_path: "expected.stderr".into(),
            expected_exit_code: 0,
            score: None,
            description: None,
        }
    }

    /// A problem plus a fixed resource directory with the fixture files an
    /// all-default single judge case needs (empty args, empty stderr, a
    /// given expected stdout), and the build script.
    fn setup(expected_stdout: &str) -> (tempfile::TempDir, Problem) {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("args.txt"), "").unwrap();
        std::fs::write(dir.path().join("expected.stdout"), expected_stdout).unwrap();
        std::fs::write(dir.path().join("expected.stderr"), "").unwrap();
        std::fs::write(dir.path().join("build.sh"), "cc main.c -o hello").unwrap();

        let problem = Problem {
            key: ProblemKey { lecture_id: 1, assignment_id: 1, for_evaluation: false },
            title: "hello world".into(),
            description_path: "description.md".into(),
            time_ms: 1000,
            memory_mb: 256,
            build_script_path: "build.sh".into(),
            executable: "hello".into(),
        };
        (dir, problem)
    }

    fn ok_task_result(stdout: &[u8]) -> TaskResult {
        TaskResult { exit_code: 0, stdout: stdout.to_vec(), stderr: Vec::new(), time_ms: 50, memory_bytes: 1024, tle: false }
    }

    #[tokio::test]
    async fn hello_world_submission_is_accepted() {
        let (dir, problem) = setup("Hello, World!\n");
        let store = Arc::new(MemoryStore::new());
        store.seed_problem(problem.clone(), Vec::new(), Vec::new(), vec![single_judge_case(1)]);
        store.seed_submission(base_submission(10));

        let sandbox = Arc::new(FakeSandbox::default());
        sandbox.queue_result(Ok(ok_task_result(b""))); // compile
        sandbox.queue_result(Ok(ok_task_result(b"Hello, World!\n"))); // judge case

        let pipeline = Pipeline::new(
            store.clone(),
            sandbox,
            dir.path().to_path_buf(),
            Images { binary_runner: "binary-runner".into(), compiler: "compiler".into() },
        );
        pipeline.run_submission(store.submission(10).unwrap()).await.unwrap();

        let submission = store.submission(10).unwrap();
        assert_eq!(submission.status, SubmissionStatus::Done);
        assert_eq!(submission.prebuilt_result, Verdict::AC);
        assert_eq!(submission.postbuilt_result, Verdict::AC);
        assert_eq!(submission.judge_result, Verdict::AC);

        let results = store.all_judge_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].verdict, Verdict::AC);
        assert_eq!(results[0].exit_code, 0);
    }

    #[tokio::test]
    async fn timeout_is_classified_as_tle() {
        let (dir, problem) = setup("irrelevant\n");
        let store = Arc::new(MemoryStore::new());
        store.seed_problem(problem.clone(), Vec::new(), Vec::new(), vec![single_judge_case(1)]);
        store.seed_submission(base_submission(11));

        let sandbox = Arc::new(FakeSandbox::default());
        sandbox.queue_result(Ok(ok_task_result(b"")));
        sandbox.queue_result(Ok(TaskResult { exit_code: -1, stdout: Vec::new(), stderr: Vec::new(), time_ms: 3500, memory_bytes: 0, tle: true }));

        let pipeline = Pipeline::new(
            store.clone(),
            sandbox,
            dir.path().to_path_buf(),
            Images { binary_runner: "binary-runner".into(), compiler: "compiler".into() },
        );
        pipeline.run_submission(store.submission(11).unwrap()).await.unwrap();

        assert_eq!(store.submission(11).unwrap().judge_result, Verdict::TLE);
    }

    #[tokio::test]
    async fn memory_above_limit_plus_slack_is_classified_as_mle() {
        let (dir, problem) = setup("irrelevant\n");
        let store = Arc::new(MemoryStore::new());
        store.seed_problem(problem.clone(), Vec::new(), Vec::new(), vec![single_judge_case(1)]);
        store.seed_submission(base_submission(12));

        let sandbox = Arc::new(FakeSandbox::default());
        sandbox.queue_result(Ok(ok_task_result(b"")));
        let over_limit = problem.memory_mb * 1024 * 1024 + 2 * 1024 * 1024;
        sandbox.queue_result(Ok(TaskResult { exit_code: 0, stdout: Vec::new(), stderr: Vec::new(), time_ms: 100, memory_bytes: over_limit, tle: false }));

        let pipeline = Pipeline::new(
            store.clone(),
            sandbox,
            dir.path().to_path_buf(),
            Images { binary_runner: "binary-runner".into(), compiler: "compiler".into() },
        );
        pipeline.run_submission(store.submission(12).unwrap()).await.unwrap();

        assert_eq!(store.submission(12).unwrap().judge_result, Verdict::MLE);
    }

    #[tokio::test]
    async fn unexpected_exit_code_is_classified_as_re() {
        let (dir, problem) = setup("irrelevant\n");
        let store = Arc::new(MemoryStore::new());
        store.seed_problem(problem.clone(), Vec::new(), Vec::new(), vec![single_judge_case(1)]);
        store.seed_submission(base_submission(13));

        let sandbox = Arc::new(FakeSandbox::default());
        sandbox.queue_result(Ok(ok_task_result(b"")));
        sandbox.queue_result(Ok(TaskResult { exit_code: 123, stdout: Vec::new(), stderr: Vec::new(), time_ms: 10, memory_bytes: 0, tle: false }));

        let pipeline = Pipeline::new(
            store.clone(),
            sandbox,
            dir.path().to_path_buf(),
            Images { binary_runner: "binary-runner".into(), compiler: "compiler".into() },
        );
        pipeline.run_submission(store.submission(13).unwrap()).await.unwrap();

        assert_eq!(store.submission(13).unwrap().judge_result, Verdict::RE);
    }

    #[tokio::test]
    async fn mismatched_output_is_classified_as_wa() {
        let (dir, problem) = setup("expected\n");
        let store = Arc::new(MemoryStore::new());
        store.seed_problem(problem.clone(), Vec::new(), Vec::new(), vec![single_judge_case(1)]);
        store.seed_submission(base_submission(14));

        let sandbox = Arc::new(FakeSandbox::default());
        sandbox.queue_result(Ok(ok_task_result(b"")));
        sandbox.queue_result(Ok(ok_task_result(b"something else\n")));

        let pipeline = Pipeline::new(
            store.clone(),
            sandbox,
            dir.path().to_path_buf(),
            Images { binary_runner: "binary-runner".into(), compiler: "compiler".into() },
        );
        pipeline.run_submission(store.submission(14).unwrap()).await.unwrap();

        assert_eq!(store.submission(14).unwrap().judge_result, Verdict::WA);
    }

    #[tokio::test]
    async fn failing_build_script_short_circuits_with_ce_and_runs_no_judge_cases() {
        let (dir, problem) = setup("irrelevant\n");
        let store = Arc::new(MemoryStore::new());
        store.seed_problem(problem.clone(), Vec::new(), Vec::new(), vec![single_judge_case(1)]);
        store.seed_submission(base_submission(15));

        let sandbox = Arc::new(FakeSandbox::default());
        sandbox.queue_result(Ok(TaskResult { exit_code: 1, stdout: Vec::new(), stderr: b"compile error".to_vec(), time_ms: 5, memory_bytes: 0, tle: false }));

        let pipeline = Pipeline::new(
            store.clone(),
            sandbox,
            dir.path().to_path_buf(),
            Images { binary_runner: "binary-runner".into(), compiler: "compiler".into() },
        );
        pipeline.run_submission(store.submission(15).unwrap()).await.unwrap();

        let submission = store.submission(15).unwrap();
        assert_eq!(submission.prebuilt_result, Verdict::AC);
        assert_eq!(submission.postbuilt_result, Verdict::CE);
        assert_eq!(submission.judge_result, Verdict::Unprocessed);
        assert!(store.all_judge_results().is_empty());
    }

    #[tokio::test]
    async fn zero_cases_in_a_phase_aggregate_to_ac() {
        let (dir, problem) = setup("irrelevant\n");
        let store = Arc::new(MemoryStore::new());
        store.seed_problem(problem.clone(), Vec::new(), Vec::new(), Vec::new());
        store.seed_submission(base_submission(16));

        let sandbox = Arc::new(FakeSandbox::default());
        sandbox.queue_result(Ok(ok_task_result(b"")));

        let pipeline = Pipeline::new(
            store.clone(),
            sandbox,
            dir.path().to_path_buf(),
            Images { binary_runner: "binary-runner".into(), compiler: "compiler".into() },
        );
        pipeline.run_submission(store.submission(16).unwrap()).await.unwrap();

        let submission = store.submission(16).unwrap();
        assert_eq!(submission.status, SubmissionStatus::Done);
        assert_eq!(submission.prebuilt_result, Verdict::AC);
        assert_eq!(submission.postbuilt_result, Verdict::AC);
        assert_eq!(submission.judge_result, Verdict::AC);
    }
}
