//! Data model of the judge orchestration engine.
//!
//! This crate only defines the shapes that flow between the
//! [`Store`](../judge_store/trait.Store.html), the sandbox driver and the
//! submission pipeline; it performs no I/O. Every other crate in the
//! workspace depends on this one, never the other way around.

#![deny(missing_docs)]

mod files;
mod judge_result;
mod limits;
mod phase;
mod problem;
mod status;
mod submission;
mod testcase;
mod verdict;

pub use files::{ArrangedFile, RequiredFile, UploadedFile};
pub use judge_result::JudgeResult;
pub use limits::ExecutionLimits;
pub use phase::Phase;
pub use problem::{Problem, ProblemKey};
pub use status::SubmissionStatus;
pub use submission::Submission;
pub use testcase::TestCase;
pub use verdict::Verdict;
