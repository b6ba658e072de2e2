use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use judge_model::{JudgeResult, Phase, Problem, ProblemKey, Submission, SubmissionStatus, TestCase, Verdict};
use log::{debug, info};
use sqlx::{FromRow, PgPool, Row};

use crate::{Store, StoreError};

/// `Store` backed by a Postgres connection pool (spec §4.8), claiming rows
/// with `SELECT ... FOR UPDATE SKIP LOCKED` rather than a literal `NOWAIT`
/// translation of the source's locking (see the project's design notes).
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an already-connected pool. Callers are expected to have run the
    /// crate's `migrations/` against it beforehand.
    pub fn new(pool: PgPool) -> PostgresStore {
        PostgresStore { pool }
    }

    /// Run the bundled migrations against the pool's database.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn parse_field<T: FromStr>(value: &str, field: &'static str) -> Result<T, StoreError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| StoreError::Database(sqlx::Error::Decode(format!("{field}: {e}").into())))
}

#[derive(FromRow)]
struct SubmissionRow {
    id: i64,
    ts: DateTime<Utc>,
    batch_id: Option<i64>,
    student_id: String,
    lecture_id: i64,
    assignment_id: i64,
    for_evaluation: bool,
    status: String,
    prebuilt_result: String,
    postbuilt_result: String,
    judge_result: String,
    message: String,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = StoreError;

    fn try_from(row: SubmissionRow) -> Result<Submission, StoreError> {
        Ok(Submission {
            id: row.id,
            ts: row.ts,
            batch_id: row.batch_id,
            student_id: row.student_id,
            problem: ProblemKey {
                lecture_id: row.lecture_id,
                assignment_id: row.assignment_id,
                for_evaluation: row.for_evaluation,
            },
            status: parse_field::<SubmissionStatus>(&row.status, "status")?,
            prebuilt_result: parse_field::<Verdict>(&row.prebuilt_result, "prebuilt_result")?,
            postbuilt_result: parse_field::<Verdict>(&row.postbuilt_result, "postbuilt_result")?,
            judge_result: parse_field::<Verdict>(&row.judge_result, "judge_result")?,
            message: row.message,
        })
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn claim_queued(&self, n: i64) -> Result<Vec<Submission>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let rows: Vec<SubmissionRow> = sqlx::query_as(
            "SELECT id, ts, batch_id, student_id, lecture_id, assignment_id, for_evaluation, \
             status, prebuilt_result, postbuilt_result, judge_result, message \
             FROM submissions WHERE status = 'queued' \
             ORDER BY ts FOR UPDATE SKIP LOCKED LIMIT $1",
        )
        .bind(n)
        .fetch_all(&mut *tx)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        if !ids.is_empty() {
            sqlx::query("UPDATE submissions SET status = 'running' WHERE id = ANY($1)")
                .bind(&ids)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        debug!("claimed {} submission(s)", ids.len());
        rows.into_iter()
            .map(|mut row| {
                row.status = "running".to_string();
                row.try_into()
            })
            .collect()
    }

    async fn fetch_problem(&self, key: ProblemKey) -> Result<Option<Problem>, StoreError> {
        let row = sqlx::query(
            "SELECT title, description_path, time_ms, memory_mb, build_script_path, executable \
             FROM problems WHERE lecture_id = $1 AND assignment_id = $2 AND for_evaluation = $3",
        )
        .bind(key.lecture_id)
        .bind(key.assignment_id)
        .bind(key.for_evaluation)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Problem {
            key,
            title: row.get("title"),
            description_path: PathBuf::from(row.get::<String, _>("description_path")),
            time_ms: row.get::<i64, _>("time_ms") as u64,
            memory_mb: row.get::<i64, _>("memory_mb") as u64,
            build_script_path: PathBuf::from(row.get::<String, _>("build_script_path")),
            executable: row.get("executable"),
        }))
    }

    async fn fetch_uploaded_paths(&self, submission_id: i64) -> Result<Vec<PathBuf>, StoreError> {
        let rows = sqlx::query("SELECT path FROM uploaded_files WHERE submission_id = $1")
            .bind(submission_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| PathBuf::from(r.get::<String, _>("path"))).collect())
    }

    async fn fetch_arranged_paths(&self, key: ProblemKey) -> Result<Vec<PathBuf>, StoreError> {
        let rows = sqlx::query(
            "SELECT path FROM arranged_files WHERE lecture_id = $1 AND assignment_id = $2 AND for_evaluation = $3",
        )
        .bind(key.lecture_id)
        .bind(key.assignment_id)
        .bind(key.for_evaluation)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| PathBuf::from(r.get::<String, _>("path"))).collect())
    }

    async fn fetch_required_files(&self, key: ProblemKey) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query(
            "SELECT name FROM required_files WHERE lecture_id = $1 AND assignment_id = $2 AND for_evaluation = $3",
        )
        .bind(key.lecture_id)
        .bind(key.assignment_id)
        .bind(key.for_evaluation)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.get("name")).collect())
    }

    async fn fetch_test_cases(&self, key: ProblemKey) -> Result<Vec<TestCase>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, phase, script_path, argument_path, stdin_path, stdout_path, stderr_path, \
             expected_exit_code, score, description FROM test_cases \
             WHERE lecture_id = $1 AND assignment_id = $2 AND for_evaluation = $3 ORDER BY id",
        )
        .bind(key.lecture_id)
        .bind(key.assignment_id)
        .bind(key.for_evaluation)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(TestCase {
                    id: row.get("id"),
                    phase: parse_field::<Phase>(&row.get::<String, _>("phase"), "phase")?,
                    script_path: row.get::<Option<String>, _>("script_path").map(PathBuf::from),
                    argument_path: PathBuf::from(row.get::<String, _>("argument_path")),
                    stdin_path: row.get::<Option<String>, _>("stdin_path").map(PathBuf::from),
                    stdout_path: PathBuf::from(row.get::<String, _>("stdout_path")),
                    stderr_path: PathBuf::from(row.get::<String, _>("stderr_path")),
                    expected_exit_code: row.get("expected_exit_code"),
                    score: row.get("score"),
                    description: row.get("description"),
                })
            })
            .collect()
    }

    async fn insert_judge_result(&self, result: JudgeResult) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO judge_results (submission_id, testcase_id, time_ms, memory_kb, exit_code, \
             stdout, stderr, verdict) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(result.submission_id)
        .bind(result.testcase_id)
        .bind(result.time_ms as i64)
        .bind(result.memory_kb as i64)
        .bind(result.exit_code)
        .bind(result.stdout)
        .bind(result.stderr)
        .bind(result.verdict.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_submission(&self, submission: &Submission) -> Result<(), StoreError> {
        let affected = sqlx::query(
            "UPDATE submissions SET status = $1, prebuilt_result = $2, postbuilt_result = $3, \
             judge_result = $4, message = $5 WHERE id = $6",
        )
        .bind(submission.status.to_string())
        .bind(submission.prebuilt_result.to_string())
        .bind(submission.postbuilt_result.to_string())
        .bind(submission.judge_result.to_string())
        .bind(&submission.message)
        .bind(submission.id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(StoreError::SubmissionNotFound(submission.id));
        }
        Ok(())
    }

    async fn undo_running(&self) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;
        let running_ids: Vec<i64> = sqlx::query("SELECT id FROM submissions WHERE status = 'running'")
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(|r| r.get("id"))
            .collect();

        if running_ids.is_empty() {
            tx.commit().await?;
            return Ok(0);
        }

        sqlx::query(
            "UPDATE submissions SET status = 'queued', prebuilt_result = 'Unprocessed', \
             postbuilt_result = 'Unprocessed', judge_result = 'Unprocessed' WHERE id = ANY($1)",
        )
        .bind(&running_ids)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM judge_results WHERE submission_id = ANY($1)")
            .bind(&running_ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("undo: restored {} running submission(s) to queued", running_ids.len());
        Ok(running_ids.len())
    }

    async fn fetch_judge_results(&self, submission_id: i64) -> Result<Vec<JudgeResult>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, ts, submission_id, testcase_id, time_ms, memory_kb, exit_code, stdout, \
             stderr, verdict FROM judge_results WHERE submission_id = $1 ORDER BY ts",
        )
        .bind(submission_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(JudgeResult {
                    id: Some(row.get("id")),
                    ts: row.get("ts"),
                    submission_id: row.get("submission_id"),
                    testcase_id: row.get("testcase_id"),
                    time_ms: row.get::<i64, _>("time_ms") as u64,
                    memory_kb: row.get::<i64, _>("memory_kb") as u64,
                    exit_code: row.get("exit_code"),
                    stdout: row.get("stdout"),
                    stderr: row.get("stderr"),
                    verdict: parse_field::<Verdict>(&row.get::<String, _>("verdict"), "verdict")?,
                })
            })
            .collect()
    }
}
