//! Blocking HTTP GET into memory.
//!
//! Uses the curl crate (libcurl easy interface), one handle per call. The whole
//! body is buffered; nothing is written to disk here so a failed transfer never
//! leaves bytes behind.

mod error;

pub use error::FetchError;

use std::time::Duration;

use crate::config::MirrorConfig;

/// Per-request options, derived from [`MirrorConfig`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    /// Whole-transfer timeout.
    pub timeout: Option<Duration>,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
}

impl FetchOptions {
    pub fn from_config(cfg: &MirrorConfig) -> Self {
        let secs = |s: u64| (s > 0).then(|| Duration::from_secs(s));
        Self {
            connect_timeout: secs(cfg.connect_timeout_secs),
            timeout: secs(cfg.timeout_secs),
            max_redirections: cfg.max_redirections,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// GETs `url` and returns the full response body. Any transport error or a
/// final status outside 2xx is an error.
///
/// The path is sent as given: callers encode it first and dot segments are not
/// squashed on the client side.
pub fn fetch_bytes(url: &str, opts: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.path_as_is(true)?;
    easy.follow_location(opts.max_redirections > 0)?;
    easy.max_redirections(opts.max_redirections)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(body)
}
