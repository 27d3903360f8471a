//! Orchestration of the Android package toolchain
//!
//! This library drives three external tools:
//! - `apktool` to decode packages and rebuild them
//! - `apksigner` to sign rebuilt packages
//! - `zipalign` to align signed packages
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod toolchain;

// Re-export commonly used types
pub use error::{ApkChainError, CliError, Result};
pub use toolchain::{Settings, SettingsBuilder, Toolchain};
