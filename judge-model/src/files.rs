use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file the student uploaded with their submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// The submission this file belongs to.
    pub submission_id: i64,
    /// Path to the file on disk.
    pub path: PathBuf,
}

/// A file the instructor provided for a problem (e.g. a `Makefile`),
/// materialized into every submission's working volume alongside the
/// student's uploads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangedFile {
    /// The problem this file belongs to.
    pub lecture_id: i64,
    /// The assignment within the lecture.
    pub assignment_id: i64,
    /// Whether this is the for-evaluation variant.
    pub for_evaluation: bool,
    /// Path to the file on disk.
    pub path: PathBuf,
}

/// The declared filename a student must supply for a given problem. Used to
/// validate uploads before judging (out of scope for the orchestration
/// engine itself, but the name list is part of the store's contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredFile {
    /// The problem this requirement belongs to.
    pub lecture_id: i64,
    /// The assignment within the lecture.
    pub assignment_id: i64,
    /// Whether this is the for-evaluation variant.
    pub for_evaluation: bool,
    /// The required filename.
    pub name: String,
}
