//! Per-URL results of a run.

use std::fmt;

use crate::resolver::Rejection;
use crate::task::{Outcome, TaskFailure};

/// What happened to one input URL.
#[derive(Debug)]
pub enum UrlStatus {
    /// Refused by the resolver; no task was created.
    Rejected(Rejection),
    Finished(Outcome),
}

/// `rejected:<code>`, or the outcome's own form.
impl fmt::Display for UrlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlStatus::Rejected(r) => write!(f, "rejected:{}", r.code()),
            UrlStatus::Finished(o) => write!(f, "{}", o),
        }
    }
}

#[derive(Debug)]
pub struct ReportEntry {
    pub url: String,
    pub status: UrlStatus,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    pub fn new(
        rejected: Vec<(String, Rejection)>,
        failed: Vec<(String, TaskFailure)>,
        outcomes: Vec<(String, Outcome)>,
    ) -> Self {
        let rejected = rejected
            .into_iter()
            .map(|(url, r)| ReportEntry {
                url,
                status: UrlStatus::Rejected(r),
            });
        let failed = failed.into_iter().map(|(url, f)| ReportEntry {
            url,
            status: UrlStatus::Finished(Outcome::Failed(f)),
        });
        let finished = outcomes.into_iter().map(|(url, o)| ReportEntry {
            url,
            status: UrlStatus::Finished(o),
        });
        Self {
            entries: rejected.chain(failed).chain(finished).collect(),
        }
    }

    fn count(&self, pred: impl Fn(&UrlStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.status)).count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, UrlStatus::Finished(o) if o.is_success()))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, UrlStatus::Finished(o) if o.is_skipped()))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, UrlStatus::Finished(Outcome::Failed(_))))
    }

    pub fn rejected(&self) -> usize {
        self.count(|s| matches!(s, UrlStatus::Rejected(_)))
    }

    /// Total bytes published in this run.
    pub fn bytes_downloaded(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| match e.status {
                UrlStatus::Finished(Outcome::Succeeded { bytes }) => bytes,
                _ => 0,
            })
            .sum()
    }

    pub fn entry(&self, url: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.url == url)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} skipped, {} failed, {} rejected ({} bytes)",
            self.succeeded(),
            self.skipped(),
            self.failed(),
            self.rejected(),
            self.bytes_downloaded()
        )
    }
}
