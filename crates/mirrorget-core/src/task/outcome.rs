//! Outcome taxonomy of a download task.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::fetch::FetchError;

/// Result of running one download task.
#[derive(Debug)]
pub enum Outcome {
    /// Body fully written and renamed into place.
    Succeeded { bytes: u64 },
    /// Destination already present; no request was made.
    Skipped,
    Failed(TaskFailure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }

    pub fn failure(&self) -> Option<&TaskFailure> {
        match self {
            Outcome::Failed(f) => Some(f),
            _ => None,
        }
    }
}

/// `succeeded`, `skipped` or `failed:<code>`.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded { .. } => write!(f, "succeeded"),
            Outcome::Skipped => write!(f, "skipped"),
            Outcome::Failed(e) => write!(f, "failed:{}", e.code()),
        }
    }
}

/// Runtime failure of a download task. Terminal for the URL in this run.
#[derive(Debug, thiserror::Error)]
pub enum TaskFailure {
    #[error("destination is a directory")]
    DestinationIsDirectory,
    #[error("network error: {0}")]
    Network(#[from] FetchError),
    /// Exclusive create found the staging name already taken.
    #[error("staging file {} already exists", .0.display())]
    StagingCollision(PathBuf),
    /// Disk full, permission denied, write/sync/rename failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl TaskFailure {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        TaskFailure::Io {
            context: context.into(),
            source,
        }
    }

    /// Stable identifier for logs and reports.
    pub fn code(&self) -> &'static str {
        match self {
            TaskFailure::DestinationIsDirectory => "destination_is_directory",
            TaskFailure::Network(_) => "network_error",
            TaskFailure::StagingCollision(_) => "staging_collision",
            TaskFailure::Io { .. } => "io_error",
        }
    }
}
