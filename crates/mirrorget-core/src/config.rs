use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the staging directory created under the download root when no
/// explicit staging directory is configured.
pub const DEFAULT_STAGING_DIR_NAME: &str = ".mirrorget-staging";

/// Global configuration loaded from `~/.config/mirrorget/config.toml`.
/// Command-line flags take precedence over these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Number of downloads running at once.
    pub jobs: usize,
    /// Staging directory; must be on the same filesystem as the download root.
    /// `None` means `<download root>/.mirrorget-staging`.
    pub staging_dir: Option<PathBuf>,
    /// Connect timeout in seconds (0 = libcurl default).
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (0 = no limit).
    pub timeout_secs: u64,
    /// Maximum redirects followed per request (0 = do not follow).
    pub max_redirections: u32,
    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            jobs: 4,
            staging_dir: None,
            connect_timeout_secs: 30,
            timeout_secs: 3600,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

impl MirrorConfig {
    /// Staging directory for `download_root`, honoring the configured override.
    pub fn staging_dir_for(&self, download_root: &Path) -> PathBuf {
        self.staging_dir
            .clone()
            .unwrap_or_else(|| download_root.join(DEFAULT_STAGING_DIR_NAME))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mirrorget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MirrorConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<MirrorConfig> {
    if !path.exists() {
        let default_cfg = MirrorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MirrorConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
