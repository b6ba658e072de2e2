use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifies a problem: a lecture, an assignment within it, and whether
/// this is the evaluation (graded) variant or the practice one.
///
/// `Copy + Eq + Hash` so it can be used directly as a lookup key (the store
/// uses the same triple as the primary key of the `problems` table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProblemKey {
    /// Identifier of the lecture the problem belongs to.
    pub lecture_id: i64,
    /// Identifier of the assignment within the lecture.
    pub assignment_id: i64,
    /// Whether this is the for-evaluation (graded) variant.
    pub for_evaluation: bool,
}

/// A problem: the build/run/limits configuration a submission is judged
/// against (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Identifying key.
    pub key: ProblemKey,
    /// Human-readable title.
    pub title: String,
    /// Path (relative to `RESOURCE_PATH`) to the problem's description.
    pub description_path: PathBuf,
    /// Judge-phase time limit, milliseconds.
    pub time_ms: u64,
    /// Judge-phase memory limit, megabytes.
    pub memory_mb: u64,
    /// Path (relative to `RESOURCE_PATH`) to the build script, a
    /// whitespace-tokenized command line.
    pub build_script_path: PathBuf,
    /// Filename of the executable the build script is expected to produce.
    pub executable: String,
}
