//! Fetch error type.

/// Why a GET did not produce a body.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Final response status was not 2xx.
    #[error("HTTP {0}")]
    Http(u32),
}
