//! Raw URL splitting (scheme, netloc, path, query, fragment).

/// Components of a URL, borrowed from the input string.
///
/// `scheme` is lower-cased; every other part is kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub scheme: String,
    /// `[userinfo@]host[:port]`, empty when the URL has no `//` authority.
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

/// Splits `url` into its components.
///
/// A scheme is recognized only if the text before the first `:` starts with an
/// ASCII letter and contains only letters, digits, `+`, `-` or `.`; otherwise
/// the scheme is empty and the whole input is treated as a relative reference.
pub fn split_url(url: &str) -> UrlParts<'_> {
    let (scheme, rest) = match url.split_once(':') {
        Some((s, rest)) if is_scheme(s) => (s.to_ascii_lowercase(), rest),
        _ => (String::new(), url),
    };

    let (rest, fragment) = match rest.split_once('#') {
        Some((r, f)) => (r, Some(f)),
        None => (rest, None),
    };

    let (netloc, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?']).unwrap_or(after.len());
            (&after[..end], &after[end..])
        }
        None => ("", rest),
    };

    let (path, query) = match rest.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (rest, None),
    };

    UrlParts {
        scheme,
        netloc,
        path,
        query,
        fragment,
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}
