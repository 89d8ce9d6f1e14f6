//! Bounded worker pool over a shared task queue.
//!
//! A fixed number of OS threads pop tasks from one queue until it is empty;
//! outcomes come back over a channel. Tasks are independent, so completion
//! order is arbitrary and one failure never stops the others.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::Mutex;

use crate::fetch::FetchOptions;
use crate::task::{DownloadTask, Outcome};

/// Runs every task with at most `workers` downloads in flight (at least one).
/// Returns `(url, outcome)` per task in completion order.
pub fn run_pool(
    tasks: Vec<DownloadTask>,
    workers: usize,
    opts: &FetchOptions,
) -> Vec<(String, Outcome)> {
    let count = tasks.len();
    if count == 0 {
        return Vec::new();
    }
    let num_workers = workers.max(1).min(count);
    let queue = Mutex::new(VecDeque::from(tasks));
    let (tx, rx) = mpsc::channel();

    std::thread::scope(|s| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let queue = &queue;
            s.spawn(move || loop {
                let next = match queue.lock() {
                    Ok(mut q) => q.pop_front(),
                    Err(poisoned) => poisoned.into_inner().pop_front(),
                };
                let Some(task) = next else {
                    break;
                };
                let outcome = task.run(opts);
                log_outcome(task.url(), &outcome);
                if tx.send((task.url().to_string(), outcome)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    rx.into_iter().collect()
}

fn log_outcome(url: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Succeeded { bytes } => tracing::info!(url, bytes, "downloaded"),
        Outcome::Skipped => tracing::info!(url, "file already exists, skipped"),
        Outcome::Failed(f) => tracing::warn!(url, reason = f.code(), "download failed: {}", f),
    }
}
