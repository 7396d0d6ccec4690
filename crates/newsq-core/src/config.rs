use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::history::DEFAULT_MAX_HISTORY;
use crate::recents::DEFAULT_MAX_RECENTS;

/// Global configuration loaded from `~/.config/newsq/config.toml`.
///
/// Every key is optional in the file; missing keys take the documented
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsqConfig {
    /// Send strict-eligible editions to the news vertical of web search
    /// (default true). Turning this off routes every search to the news
    /// surface.
    pub strict_local: bool,
    /// Request an AI summary before printing the URL when an API key is set
    /// (default true).
    pub ai_summaries: bool,
    /// Gemini API key; summaries are skipped without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    /// Number of searches kept in history (default 50).
    pub max_history: usize,
    /// Number of recently used countries kept (default 5).
    pub max_recents: usize,
}

impl Default for NewsqConfig {
    fn default() -> Self {
        Self {
            strict_local: true,
            ai_summaries: true,
            gemini_api_key: None,
            max_history: DEFAULT_MAX_HISTORY,
            max_recents: DEFAULT_MAX_RECENTS,
        }
    }
}

impl NewsqConfig {
    /// API key to use for summaries, if summaries are enabled and a
    /// non-blank key is configured.
    pub fn summary_api_key(&self) -> Option<&str> {
        if !self.ai_summaries {
            return None;
        }
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("newsq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NewsqConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<NewsqConfig> {
    if !path.exists() {
        let default_cfg = NewsqConfig::default();
        save_at(path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: NewsqConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Configuration for commands that only read it. Any problem (unreadable or
/// malformed file, unusable config directory) is logged and the defaults are
/// used, so searches keep working.
pub fn load_or_default() -> NewsqConfig {
    match config_path() {
        Ok(path) => load_or_default_at(&path),
        Err(e) => {
            tracing::warn!("config directory unavailable, using defaults: {:#}", e);
            NewsqConfig::default()
        }
    }
}

pub fn load_or_default_at(path: &Path) -> NewsqConfig {
    load_or_init_at(path).unwrap_or_else(|e| {
        tracing::warn!(
            path = %path.display(),
            "config unavailable, using defaults: {:#}",
            e
        );
        NewsqConfig::default()
    })
}

/// Write configuration back to the default location.
pub fn save(cfg: &NewsqConfig) -> Result<()> {
    save_at(&config_path()?, cfg)
}

pub fn save_at(path: &Path, cfg: &NewsqConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
