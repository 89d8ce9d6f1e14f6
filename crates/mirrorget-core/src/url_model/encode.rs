//! Percent-encoding of the URL path for the request line.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::split::UrlParts;

/// Everything except unreserved characters and `/` is encoded, including `%`.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a raw URL path.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ENCODE_SET).to_string()
}

/// Reassembles `parts` into the URL that is actually requested: only the path
/// is encoded, scheme, netloc, query and fragment are left untouched.
pub fn request_url(parts: &UrlParts<'_>) -> String {
    let mut out = String::with_capacity(parts.netloc.len() + parts.path.len() + 16);
    out.push_str(&parts.scheme);
    out.push_str("://");
    out.push_str(parts.netloc);
    out.push_str(&encode_path(parts.path));
    if let Some(q) = parts.query.filter(|q| !q.is_empty()) {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = parts.fragment.filter(|f| !f.is_empty()) {
        out.push('#');
        out.push_str(f);
    }
    out
}
