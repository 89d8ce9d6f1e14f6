//! `mirrorget resolve <url>...` – dry run of the path resolver.

use anyhow::{Context, Result};
use mirrorget_core::resolve;
use mirrorget_core::resolver::canonicalize_lenient;
use std::path::Path;

/// Prints the destination for each URL, or its rejection code. Creates nothing.
pub fn run_resolve(urls: &[String], download_dir: &Path) -> Result<()> {
    let cwd = std::env::current_dir().context("current dir")?;
    let root = canonicalize_lenient(&cwd.join(download_dir));
    for url in urls {
        match resolve(url, &root) {
            Ok(target) => println!("{}\t{}", url, target.destination_path().display()),
            Err(rejection) => println!("{}\trejected:{}\t{}", url, rejection.code(), rejection),
        }
    }
    Ok(())
}
