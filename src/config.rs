//! Application configuration file support.
//!
//! Configuration is read from a TOML file (with a default-location search)
//! and held in an immutable structure for the lifetime of the process. Every
//! field has a serde default so a partial file, or no file at all, still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::services::recent_images::ScanConfig;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("No config file found in standard locations")]
    NotFound,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub archive: ArchiveSettings,
    #[serde(default)]
    pub query: QuerySettings,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Capture database settings. The database is owned by the capture daemon
/// and opened read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

/// Filesystem image archive settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSettings {
    /// Root of the date/session/hour capture tree.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    /// Accepted file extensions, without the leading dot. Matched
    /// case-sensitively against filename suffixes.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Path prefix stored in the database / archive.
    #[serde(default)]
    pub rewrite_from: String,
    /// Web-visible prefix substituted for `rewrite_from` in responses.
    #[serde(default)]
    pub rewrite_to: String,
    /// Optional cap on the recent-image list. When set, only the newest
    /// `max_recent_images` entries are returned.
    #[serde(default)]
    pub max_recent_images: Option<usize>,
}

/// Query parameter defaults for the capture-metadata endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Row limit applied when the caller omits or mangles `limit`.
    #[serde(default = "default_limit")]
    pub default_limit: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_path() -> PathBuf {
    PathBuf::from("captures.db")
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("/var/lib/skycam/images")
}

fn default_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "png".to_string()]
}

fn default_limit() -> i64 {
    50
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            extensions: default_extensions(),
            rewrite_from: String::new(),
            rewrite_to: String::new(),
            max_recent_images: None,
        }
    }
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl ArchiveSettings {
    /// Build the immutable scan parameters for the recent-image finder.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            base_dir: self.base_dir.clone(),
            extensions: self.extensions.clone(),
            max_images: self.max_recent_images,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `skycam.toml` in the current directory, a `config/`
    /// subdirectory, and the parent directory, in that order.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("skycam.toml"),
            PathBuf::from("config/skycam.toml"),
            PathBuf::from("../skycam.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }
}
