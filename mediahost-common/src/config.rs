//! Configuration file loading, compiled defaults and storage folder setup
//!
//! Settings resolve in this priority order (highest first):
//! 1. Command-line argument or environment variable (handled by the binary)
//! 2. TOML config file
//! 3. OS-dependent compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default upload size limit in MiB
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 512;

/// Contents of `config.toml`
///
/// Every key is optional; absent keys fall through to [`CompiledDefaults`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TomlConfig {
    /// Folder holding audio files and their `.json` metadata
    pub storage_dir: Option<PathBuf>,
    /// Folder of client application assets served under `/static`
    pub static_dir: Option<PathBuf>,
    /// Listen address, e.g. `127.0.0.1:8000`
    pub bind_addr: Option<String>,
    /// Upload body limit in MiB (0 disables the limit)
    pub max_upload_mb: Option<u64>,
}

impl TomlConfig {
    /// Parse config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load config from `path`, or from [`default_config_path`] when `None`
    ///
    /// A missing file is not an error: returns `Ok(None)` so the caller can
    /// continue with defaults.
    pub fn load(path: Option<&Path>) -> Result<Option<Self>> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => {
                    debug!("No platform config directory, skipping config file");
                    return Ok(None);
                }
            },
        };

        if !path.exists() {
            info!("Config file not found at {}, using defaults", path.display());
            return Ok(None);
        }

        let text = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config file {}", path.display());
        Ok(Some(config))
    }
}

/// Default location of `config.toml` for the platform
///
/// - Linux: `~/.config/mediahost/config.toml`
/// - macOS: `~/Library/Application Support/mediahost/config.toml`
/// - Windows: `%APPDATA%\mediahost\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mediahost").join("config.toml"))
}

/// OS-dependent fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub storage_dir: PathBuf,
    pub bind_addr: String,
    pub max_upload_mb: u64,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

/// Get OS-dependent default storage folder
fn default_storage_dir() -> PathBuf {
    // ~/.local/share/mediahost/media, ~/Library/Application Support/mediahost/media,
    // %LOCALAPPDATA%\mediahost\media
    dirs::data_local_dir()
        .map(|d| d.join("mediahost").join("media"))
        .unwrap_or_else(|| PathBuf::from("./mediahost_data/media"))
}

/// Creates the storage folder at startup
pub struct StorageInitializer {
    storage_dir: PathBuf,
}

impl StorageInitializer {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// Create the folder (and parents) if missing
    ///
    /// Returns `true` when the folder was created by this call.
    pub fn ensure_directory_exists(&self) -> Result<bool> {
        if self.storage_dir.is_dir() {
            return Ok(false);
        }
        if self.storage_dir.exists() {
            return Err(Error::Config(format!(
                "Storage path exists but is not a directory: {}",
                self.storage_dir.display()
            )));
        }

        std::fs::create_dir_all(&self.storage_dir)?;
        info!("Created storage directory: {}", self.storage_dir.display());
        Ok(true)
    }
}
