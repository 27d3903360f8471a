//! Application-level error types.
//!
//! Library failures arrive as [`crate::toolchain::Error`]; this module wraps
//! them together with CLI and configuration errors for the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, ApkChainError>;

/// Main error type for the `apkchain` binary
#[derive(Error, Debug)]
pub enum ApkChainError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Toolchain errors (tool resolution)
    #[error("{0}")]
    Toolchain(#[from] crate::toolchain::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Config file named on the command line does not exist
    #[error("Config file not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was given
        path: PathBuf,
    },
}
