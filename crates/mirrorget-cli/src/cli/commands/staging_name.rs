//! `mirrorget staging-name <url>` – show the staging file name for a URL.

use mirrorget_core::staging;

pub fn run_staging_name(url: &str) {
    println!("{}", staging::staging_name(url));
}
