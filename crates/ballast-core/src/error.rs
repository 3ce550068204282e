//! Error types for ballast-core

use thiserror::Error;

/// Result type alias for ballast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the ballast server
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid listen address
    #[error("Invalid listen address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    /// Invalid configuration value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Config file could not be read
    #[error("Config read error: {0}")]
    ConfigRead(String),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
