//! Client configuration.
//!
//! Reads/writes `~/.picfeed/config.toml`. `PICFEED_BACKEND_URL` overrides
//! the stored backend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use picfeed_client::{media, MediaResolver, DEFAULT_BACKEND_URL};
use serde::{Deserialize, Serialize};

pub const BACKEND_URL_ENV: &str = "PICFEED_BACKEND_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("encode: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClientConfig {
    /// API base, e.g. `http://localhost:8080/api/v1.0`.
    pub backend_url: String,

    /// Idle time before a search query is sent.
    pub search_debounce_ms: u64,

    /// Shorter (trimmed) queries are never sent.
    pub search_min_chars: usize,

    /// Remembered login email (set by `picfeed login`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            search_debounce_ms: 300,
            search_min_chars: 2,
            email: None,
        }
    }
}

impl ClientConfig {
    /// Default config file path: `~/.picfeed/config.toml`.
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from disk; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)
    }

    /// Apply `PICFEED_BACKEND_URL` if set.
    pub fn with_env(self) -> Self {
        self.with_backend_override(std::env::var(BACKEND_URL_ENV).ok())
    }

    pub fn with_backend_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Where image and avatar references resolve.
    pub fn media_origin(&self) -> String {
        media::origin_of(&self.backend_url)
    }

    pub fn media(&self) -> MediaResolver {
        MediaResolver::new(self.media_origin())
    }
}

fn config_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".picfeed")
}
