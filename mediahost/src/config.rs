//! mediahost configuration
//!
//! Flags (or their environment variables) override `config.toml`, which
//! overrides the compiled defaults from `mediahost-common`.

use std::path::PathBuf;

use clap::Parser;
use mediahost_common::config::{CompiledDefaults, TomlConfig};

/// Command-line arguments for mediahost
#[derive(Parser, Debug, Default)]
#[command(name = "mediahost")]
#[command(about = "Audio upload and catalog service")]
#[command(version)]
pub struct Args {
    /// Folder holding audio files and their metadata
    #[arg(short, long, env = "MEDIAHOST_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Folder of client assets served under /static
    #[arg(long, env = "MEDIAHOST_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "MEDIAHOST_BIND")]
    pub bind: Option<String>,

    /// Largest accepted upload in MiB (0 = unlimited)
    #[arg(long, env = "MEDIAHOST_MAX_UPLOAD_MB")]
    pub max_upload_mb: Option<u64>,

    /// Path of config.toml (defaults to the platform config directory)
    #[arg(short, long, env = "MEDIAHOST_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub bind_addr: String,
    /// Upload body limit in bytes; `None` means unlimited
    pub max_upload_bytes: Option<usize>,
}

impl Config {
    /// Defaults for everything except the storage folder
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        let defaults = CompiledDefaults::for_current_platform();
        Self {
            storage_dir: storage_dir.into(),
            static_dir: None,
            bind_addr: defaults.bind_addr,
            max_upload_bytes: mib_to_bytes(defaults.max_upload_mb),
        }
    }

    /// Layer arguments over the config file over compiled defaults
    pub fn resolve(args: &Args, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = CompiledDefaults::for_current_platform();

        let storage_dir = args
            .storage_dir
            .clone()
            .or(file.storage_dir)
            .unwrap_or(defaults.storage_dir);
        let static_dir = args.static_dir.clone().or(file.static_dir);
        let bind_addr = args
            .bind
            .clone()
            .or(file.bind_addr)
            .unwrap_or(defaults.bind_addr);
        let max_upload_mb = args
            .max_upload_mb
            .or(file.max_upload_mb)
            .unwrap_or(defaults.max_upload_mb);

        Self {
            storage_dir,
            static_dir,
            bind_addr,
            max_upload_bytes: mib_to_bytes(max_upload_mb),
        }
    }
}

fn mib_to_bytes(mib: u64) -> Option<usize> {
    if mib == 0 {
        return None;
    }
    let bytes = mib.saturating_mul(1024 * 1024);
    Some(usize::try_from(bytes).unwrap_or(usize::MAX))
}
