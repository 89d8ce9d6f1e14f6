//! Maps a URL onto a confined destination path below the download root.
//!
//! The destination is `<root>/<host[:port]>/<url path>`. Every URL passes a
//! fixed sequence of gates; the first failing gate decides the [`Rejection`].
//! `..` segments are folded *before* the confinement check, so a path such as
//! `/a/../1.jpg` stays accepted while `/../../a/b/1.jpg` is refused.
//!
//! Resolution never mutates the filesystem. Creating parent directories is
//! left to the planner, which runs single-threaded ahead of the downloads.

mod error;
mod normalize;

use std::path::{Path, PathBuf};

use crate::url_model::{is_supported_scheme, split_url};

pub use error::Rejection;
pub use normalize::{canonicalize_lenient, has_parent_segment, normalize_lexically};

/// A URL that passed every gate, paired with where its bytes must end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    source_url: String,
    destination_path: PathBuf,
}

impl ResolvedTarget {
    /// Original URL string, used unmodified for the request and the staging name.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Canonical destination, always a strict descendant of the download root.
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }
}

/// Resolves `url` to a destination below `download_root`, or says why not.
///
/// `download_root` should be absolute; the planner canonicalizes it first.
/// The destination must lie below `<root>/<host>` as spelled, so a symlink
/// anywhere from the host directory down that leads out of it is refused.
pub fn resolve(url: &str, download_root: &Path) -> Result<ResolvedTarget, Rejection> {
    let parts = split_url(url);
    if !is_supported_scheme(&parts.scheme) {
        return Err(Rejection::UnsupportedScheme(parts.scheme));
    }

    // `https://example.com/` is root-only and reported as missing_path below.
    let root_only = path_part_count(parts.path) <= 1;
    if url.ends_with('/') && !root_only {
        return Err(Rejection::TrailingSlash);
    }
    if root_only {
        return Err(Rejection::MissingPath);
    }

    if !parts.path.starts_with('/') || parts.path.contains('\0') || !is_usable_host(parts.netloc)
    {
        return Err(Rejection::UnresolvablePath);
    }

    let host_dir = download_root.join(parts.netloc);
    let candidate = canonicalize_lenient(&host_dir.join(parts.path.trim_start_matches('/')));
    if has_parent_segment(&candidate) {
        return Err(Rejection::TraversalAttempt(candidate));
    }

    // The host directory itself is not followed: a symlinked `<root>/<host>`
    // must not move the confinement base out of the root.
    let base = normalize_lexically(&canonicalize_lenient(download_root).join(parts.netloc));
    if candidate == base {
        return Err(Rejection::MissingPath);
    }
    if !candidate.starts_with(&base) {
        return Err(Rejection::EscapesRoot {
            path: candidate,
            base,
        });
    }

    Ok(ResolvedTarget {
        source_url: url.to_string(),
        destination_path: candidate,
    })
}

/// Counts path parts the way a path library does: the leading `/` is one part,
/// plus each segment that is neither empty nor `.`.
fn path_part_count(path: &str) -> usize {
    let root = usize::from(path.starts_with('/'));
    root + path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .count()
}

/// The netloc becomes a single directory name, taken verbatim (colons allowed).
fn is_usable_host(netloc: &str) -> bool {
    !netloc.is_empty()
        && netloc != "."
        && netloc != ".."
        && !netloc.contains(['/', '\\', '\0'])
}
