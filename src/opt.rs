use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Claims queued submissions from the store and drives them through the
/// sandboxed compile/test pipeline (spec §4.5-§4.7).
#[derive(Parser, Debug)]
#[command(name = "judge", version)]
pub struct Opt {
    /// Maximum number of submissions judged concurrently.
    #[arg(long, default_value_t = 50)]
    pub pool_size: usize,

    /// Maximum submissions claimed from the store per dispatcher tick.
    #[arg(long, default_value_t = 10)]
    pub claim_batch: usize,

    /// Dispatcher poll period, seconds.
    #[arg(long, default_value_t = 5)]
    pub dispatcher_period_secs: u64,

    /// Root every problem/submission-relative path is resolved against.
    #[arg(long, env = "RESOURCE_PATH")]
    pub resource_path: PathBuf,

    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Image run for problem executables and script-override test cases.
    #[arg(long, env = "BINARY_RUNNER_IMAGE", default_value = "judge/binary-runner")]
    pub binary_runner_image: String,

    /// Image run for the problem's build script.
    #[arg(long, env = "COMPILER_IMAGE", default_value = "judge/compiler")]
    pub compiler_image: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-off operator commands that don't run the dispatcher loop.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the recorded judge results for one submission and exit.
    Status {
        /// The submission id to look up.
        submission_id: i64,
    },
}
