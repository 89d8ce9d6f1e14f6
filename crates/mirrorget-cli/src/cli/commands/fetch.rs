//! `mirrorget fetch <url-file>` – resolve, stage and publish every listed URL.

use anyhow::{Context, Result};
use mirrorget_core::config::MirrorConfig;
use mirrorget_core::fetch::FetchOptions;
use mirrorget_core::report::{RunReport, UrlStatus};
use mirrorget_core::{mirror_urls, url_list};
use std::path::PathBuf;

#[derive(Debug)]
pub struct FetchArgs {
    pub url_file: PathBuf,
    pub download_dir: PathBuf,
    /// Overrides the configured staging directory.
    pub staging_dir: Option<PathBuf>,
    /// Overrides the configured number of jobs.
    pub jobs: Option<usize>,
}

pub async fn run_fetch(cfg: &MirrorConfig, args: FetchArgs) -> Result<()> {
    let urls = url_list::read_url_list(&args.url_file)?;
    if urls.is_empty() {
        println!("No URLs in {}.", args.url_file.display());
        return Ok(());
    }

    let staging_dir = args
        .staging_dir
        .unwrap_or_else(|| cfg.staging_dir_for(&args.download_dir));
    let jobs = args.jobs.unwrap_or(cfg.jobs);
    let opts = FetchOptions::from_config(cfg);
    let download_dir = args.download_dir;

    tracing::info!(
        urls = urls.len(),
        jobs,
        root = %download_dir.display(),
        staging = %staging_dir.display(),
        "fetch started"
    );

    let report = tokio::task::spawn_blocking(move || {
        mirror_urls(&urls, &download_dir, &staging_dir, jobs, &opts)
    })
    .await
    .context("download pool join")??;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    for entry in &report.entries {
        let status = entry.status.to_string();
        match &entry.status {
            UrlStatus::Rejected(r) => println!("{:<32} {}  ({})", status, entry.url, r),
            UrlStatus::Finished(o) => {
                if let Some(f) = o.failure() {
                    println!("{:<32} {}  ({})", status, entry.url, f);
                }
            }
        }
    }
    println!("{}", report);
}
