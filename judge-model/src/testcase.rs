use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Phase;

/// A single test case attached to a problem (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique identifier, used as the foreign key on `JudgeResult`.
    pub id: i64,
    /// Which phase this case runs in.
    pub phase: Phase,
    /// If set, this script is copied into the sandbox and used as argv[0]
    /// instead of the problem's compiled executable.
    pub script_path: Option<PathBuf>,
    /// Path to a file of whitespace-separated argv tokens (appended after
    /// argv[0]).
    pub argument_path: PathBuf,
    /// Optional path to the stdin fixture; missing means empty stdin.
    pub stdin_path: Option<PathBuf>,
    /// Path to the expected stdout fixture.
    pub stdout_path: PathBuf,
    /// Path to the expected stderr fixture.
    pub stderr_path: PathBuf,
    /// Expected process exit code, defaulting to 0.
    pub expected_exit_code: i32,
    /// Optional score weight, opaque to the orchestration engine.
    pub score: Option<f64>,
    /// Optional human-readable description.
    pub description: Option<String>,
}

impl TestCase {
    /// `true` if this case overrides the problem's compiled executable with
    /// its own script (spec §8 boundary case).
    pub fn has_script_override(&self) -> bool {
        self.script_path.is_some()
    }
}
