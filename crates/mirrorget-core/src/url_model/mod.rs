//! URL modeling for mirroring.
//!
//! Splits a URL into its raw components without any normalization (dot
//! segments, host case and default ports are all kept verbatim) and
//! percent-encodes the path for the request line.

mod encode;
mod split;

pub use encode::{encode_path, request_url};
pub use split::{split_url, UrlParts};

/// Schemes the downloader accepts.
pub const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// True if `scheme` (already lower-cased by [`split_url`]) is one we download.
pub fn is_supported_scheme(scheme: &str) -> bool {
    SUPPORTED_SCHEMES.contains(&scheme)
}
