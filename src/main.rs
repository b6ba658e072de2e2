#[macro_use]
extern crate log;

mod opt;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use judge_exec::{Dispatcher, Images, Pipeline, WorkerPool};
use judge_sandbox::DockerSandbox;
use judge_store::{PostgresStore, Store};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;

use opt::{Command, Opt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env().init();

    let opt = Opt::parse();

    let pool = PgPoolOptions::new()
        .connect(&opt.database_url)
        .await
        .context("failed to connect to the database")?;
    let store = Arc::new(PostgresStore::new(pool));
    store.migrate().await.context("failed to run migrations")?;

    if let Some(Command::Status { submission_id }) = opt.command {
        return print_status(&*store, submission_id).await;
    }

    let sandbox = Arc::new(DockerSandbox::connect().context("failed to connect to the Docker daemon")?);
    let images = Images { binary_runner: opt.binary_runner_image, compiler: opt.compiler_image };
    let pipeline = Pipeline::new(store.clone(), sandbox, opt.resource_path, images);
    let pool_workers = WorkerPool::new(opt.pool_size);
    let period = Duration::from_secs(opt.dispatcher_period_secs);
    let dispatcher = Dispatcher::new(store.clone(), pool_workers, pipeline, period, opt.claim_batch);

    let (tx, rx) = watch::channel(false);
    if let Err(e) = ctrlc::set_handler(move || {
        info!("received interrupt, shutting down");
        if tx.send(true).is_err() {
            warn!("dispatcher already gone, nothing to signal");
        }
    }) {
        warn!("cannot bind control-C handler: {e}");
    }

    info!("dispatcher starting, pool_size={} claim_batch={}", opt.pool_size, opt.claim_batch);
    dispatcher.run(rx).await;
    info!("dispatcher stopped");
    Ok(())
}

async fn print_status(store: &dyn Store, submission_id: i64) -> anyhow::Result<()> {
    let results = store.fetch_judge_results(submission_id).await.context("failed to fetch judge results")?;
    if results.is_empty() {
        println!("no judge results recorded for submission {submission_id}");
        return Ok(());
    }
    for result in results {
        println!(
            "case {:>4}  {:<4}  exit={:<4}  time={:>6}ms  mem={:>8}kB",
            result.testcase_id, result.verdict, result.exit_code, result.time_ms, result.memory_kb
        );
    }
    Ok(())
}
