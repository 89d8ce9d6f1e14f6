//! Staging area for in-flight downloads.
//!
//! Each URL is staged under a deterministic name (lowercase hex SHA-512 of the
//! raw URL bytes) so a re-run reuses the same file instead of accumulating new
//! ones. The staged file is created exclusively, fully written, synced, and then
//! published with a single rename onto the destination.

mod file;

pub use file::StagingFile;

use sha2::{Digest, Sha512};
use std::path::{Path, PathBuf};

/// Lowercase hex SHA-512 of `url`'s UTF-8 bytes (128 characters).
pub fn staging_name(url: &str) -> String {
    hex::encode(Sha512::digest(url.as_bytes()))
}

/// Full staging path for `url` inside `staging_dir`.
pub fn staging_path(staging_dir: &Path, url: &str) -> PathBuf {
    staging_dir.join(staging_name(url))
}
