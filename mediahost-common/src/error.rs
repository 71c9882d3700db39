//! Common error types for mediahost

use thiserror::Error;

/// Common result type for mediahost operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by mediahost crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file is not valid TOML or has wrongly typed keys
    #[error("Config file parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
