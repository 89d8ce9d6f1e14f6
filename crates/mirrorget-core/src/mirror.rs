//! End-to-end run: resolve, prepare, download, report.

use anyhow::Result;
use std::path::Path;

use crate::fetch::FetchOptions;
use crate::plan::{plan, prepare_dirs};
use crate::pool::run_pool;
use crate::report::RunReport;

/// Mirrors `urls` into `download_root`, staging through `staging_dir` with up
/// to `workers` concurrent downloads.
///
/// Only setup failures (directories cannot be created) return `Err`; every
/// per-URL problem is recorded in the report.
pub fn mirror_urls<I, S>(
    urls: I,
    download_root: &Path,
    staging_dir: &Path,
    workers: usize,
    opts: &FetchOptions,
) -> Result<RunReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (root, staging) = prepare_dirs(download_root, staging_dir)?;
    let plan = plan(urls, &root, &staging);
    tracing::info!(
        tasks = plan.tasks.len(),
        rejected = plan.rejected.len(),
        workers,
        "starting downloads"
    );
    let outcomes = run_pool(plan.tasks, workers, opts);
    let report = RunReport::new(plan.rejected, plan.failed, outcomes);
    tracing::info!("run finished: {}", report);
    Ok(report)
}
