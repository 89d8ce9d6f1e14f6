//! The download task: fetch one URL and publish it atomically.
//!
//! Sequence: pre-check destination, GET the (path-encoded) URL into memory,
//! write the body to an exclusively-created staging file named after the
//! URL's SHA-512, sync, then rename onto the destination. The destination
//! either stays absent or receives the complete body, never a prefix of it.

mod outcome;

pub use outcome::{Outcome, TaskFailure};

use std::io;
use std::path::{Path, PathBuf};

use crate::fetch::{fetch_bytes, FetchOptions};
use crate::resolver::ResolvedTarget;
use crate::staging::{staging_path, StagingFile};
use crate::url_model::{request_url, split_url};

/// A resolved URL bound to the staging directory it will be staged in.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    target: ResolvedTarget,
    staging_dir: PathBuf,
}

impl DownloadTask {
    pub fn new(target: ResolvedTarget, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            target,
            staging_dir: staging_dir.into(),
        }
    }

    pub fn target(&self) -> &ResolvedTarget {
        &self.target
    }

    pub fn url(&self) -> &str {
        self.target.source_url()
    }

    /// Where this task stages its body.
    pub fn staging_path(&self) -> PathBuf {
        staging_path(&self.staging_dir, self.target.source_url())
    }

    pub fn run(&self, opts: &FetchOptions) -> Outcome {
        download(&self.target, &self.staging_dir, opts)
    }
}

/// Downloads `target` through `staging_dir`. `staging_dir` must exist and be
/// on the same filesystem as the destination, and the destination's parent
/// directory must already exist.
pub fn download(target: &ResolvedTarget, staging_dir: &Path, opts: &FetchOptions) -> Outcome {
    match try_download(target, staging_dir, opts) {
        Ok(outcome) => outcome,
        Err(failure) => Outcome::Failed(failure),
    }
}

fn try_download(
    target: &ResolvedTarget,
    staging_dir: &Path,
    opts: &FetchOptions,
) -> Result<Outcome, TaskFailure> {
    let destination = target.destination_path();
    if destination.is_dir() {
        return Err(TaskFailure::DestinationIsDirectory);
    }
    if destination.exists() {
        tracing::debug!(url = target.source_url(), "destination exists, skipping");
        return Ok(Outcome::Skipped);
    }

    let url = request_url(&split_url(target.source_url()));
    let body = fetch_bytes(&url, opts)?;

    let staged_path = staging_path(staging_dir, target.source_url());
    let mut staged = match StagingFile::create_exclusive(&staged_path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(TaskFailure::StagingCollision(staged_path));
        }
        Err(e) => return Err(TaskFailure::io("create staging file", e)),
    };
    if let Err(e) = staged.write_and_sync(&body) {
        staged.discard();
        return Err(TaskFailure::io("write staging file", e));
    }
    if let Err(e) = staged.publish(destination) {
        if let Err(rm) = std::fs::remove_file(&staged_path) {
            tracing::debug!(path = %staged_path.display(), "could not remove staging file: {}", rm);
        }
        return Err(TaskFailure::io(
            format!("rename into {}", destination.display()),
            e,
        ));
    }

    Ok(Outcome::Succeeded {
        bytes: body.len() as u64,
    })
}
