//! Resolution phase: turns URLs into an owned list of download tasks.
//!
//! Runs single-threaded before any download starts, so directory creation and
//! stale staging cleanup never race with each other.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::resolver::{resolve, Rejection};
use crate::task::{DownloadTask, TaskFailure};

/// Everything the resolution phase decided, owned by the caller.
#[derive(Debug, Default)]
pub struct Plan {
    pub tasks: Vec<DownloadTask>,
    pub rejected: Vec<(String, Rejection)>,
    /// Accepted URLs whose destination directory could not be prepared.
    pub failed: Vec<(String, TaskFailure)>,
}

/// Creates the download root and staging directory and returns both in
/// canonical form. Failure here is a setup error for the whole run.
pub fn prepare_dirs(download_root: &Path, staging_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(download_root)
        .with_context(|| format!("create download dir {}", download_root.display()))?;
    std::fs::create_dir_all(staging_dir)
        .with_context(|| format!("create staging dir {}", staging_dir.display()))?;
    let root = std::fs::canonicalize(download_root)
        .with_context(|| format!("resolve download dir {}", download_root.display()))?;
    let staging = std::fs::canonicalize(staging_dir)
        .with_context(|| format!("resolve staging dir {}", staging_dir.display()))?;
    Ok((root, staging))
}

/// Resolves each URL against `download_root`, creates destination parent
/// directories, and removes staging files left behind by an interrupted run.
///
/// Both directories are expected in canonical form (see [`prepare_dirs`]).
/// URLs whose destination would fall inside `staging_dir` are rejected.
pub fn plan<I, S>(urls: I, download_root: &Path, staging_dir: &Path) -> Plan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut plan = Plan::default();
    for url in urls {
        let url = url.as_ref();
        let target = match resolve(url, download_root) {
            Ok(t) => t,
            Err(rejection) => {
                tracing::warn!(url, reason = rejection.code(), "rejected url: {}", rejection);
                plan.rejected.push((url.to_string(), rejection));
                continue;
            }
        };

        // A host named like the staging directory would land on staging files.
        if target.destination_path().starts_with(staging_dir) {
            let rejection = Rejection::InsideStaging(target.destination_path().to_path_buf());
            tracing::warn!(url, reason = rejection.code(), "rejected url: {}", rejection);
            plan.rejected.push((url.to_string(), rejection));
            continue;
        }

        if let Some(parent) = target.destination_path().parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                let failure = TaskFailure::io(format!("create {}", parent.display()), e);
                tracing::warn!(url, "cannot prepare destination: {}", failure);
                plan.failed.push((url.to_string(), failure));
                continue;
            }
        }

        let task = DownloadTask::new(target, staging_dir);
        let stale = task.staging_path();
        if stale.is_file() {
            match std::fs::remove_file(&stale) {
                Ok(()) => tracing::debug!(url, path = %stale.display(), "removed stale staging file"),
                Err(e) => tracing::warn!(url, path = %stale.display(), "could not remove stale staging file: {}", e),
            }
        }

        tracing::info!(url, dest = %task.target().destination_path().display(), "created task");
        plan.tasks.push(task);
    }
    plan
}
