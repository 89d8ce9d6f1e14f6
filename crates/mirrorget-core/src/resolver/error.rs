//! Reasons a URL is refused before any download is attempted.

use std::path::PathBuf;

/// Why the resolver refused a URL. Every variant is terminal for that URL:
/// no task is created and no request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Scheme missing or not http/https.
    #[error("unsupported scheme {0:?}")]
    UnsupportedScheme(String),
    /// URL ends with `/`, i.e. names a directory-like resource.
    #[error("url ends with a trailing slash")]
    TrailingSlash,
    /// No path, or a path that names nothing below the host directory.
    #[error("url has no file path")]
    MissingPath,
    /// Path is not absolute, or the host part cannot be used as a directory name.
    #[error("cannot map url onto a filesystem path")]
    UnresolvablePath,
    /// A `..` component survived canonicalization.
    #[error("path {0} still contains a parent-directory segment")]
    TraversalAttempt(PathBuf),
    /// Canonical path is not below `<root>/<host>`.
    #[error("path {path} escapes {base}")]
    EscapesRoot { path: PathBuf, base: PathBuf },
    /// Destination falls inside the staging directory, where it could clobber
    /// or block another URL's staging file.
    #[error("path {0} is inside the staging directory")]
    InsideStaging(PathBuf),
}

impl Rejection {
    /// Stable identifier for logs and reports.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::UnsupportedScheme(_) => "unsupported_scheme",
            Rejection::TrailingSlash => "trailing_slash",
            Rejection::MissingPath => "missing_path",
            Rejection::UnresolvablePath => "unresolvable_path",
            Rejection::TraversalAttempt(_) => "traversal_attempt",
            Rejection::EscapesRoot { .. } => "escapes_root",
            Rejection::InsideStaging(_) => "inside_staging",
        }
    }
}
