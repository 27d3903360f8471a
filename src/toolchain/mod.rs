//! apktool / apksigner / zipalign orchestration.
//!
//! This module provides the [`Toolchain`] orchestrator, which resolves the
//! three external tools once at startup and exposes the operations built on
//! them:
//!
//! - [`Toolchain::decompile`] - `apktool d`
//! - [`Toolchain::build`] - `apktool b`, then [`Toolchain::sign`], then [`Toolchain::align`]
//! - [`Toolchain::install_framework`] - `apktool if`
//! - [`Toolchain::empty_framework_dir`] - `apktool empty-framework-dir`
//!
//! # Module Organization
//!
//! - [`artifact`] - locating the package a build produced
//! - [`error`] - error taxonomy and `fs_context`
//! - [`message`] - short/detailed status messages
//! - `orchestrator` - the [`Toolchain`] struct and public operations
//! - [`process`] - process spawning, prompt suppression, log relay
//! - [`reporter`] - output sink trait and log line classification
//! - [`settings`] - resolved configuration and its builder
//! - `signing` / `alignment` - the two steps chained after a build
//! - [`tool_detection`] - PATH lookup and path normalization

pub mod alignment;
pub mod artifact;
pub mod error;
pub mod message;
mod orchestrator;
pub mod process;
pub mod reporter;
pub mod settings;
mod signing;
pub mod tool_detection;

pub use error::{Error, ErrorExt, Result};
pub use message::StatusMessage;
pub use orchestrator::Toolchain;
pub use reporter::{Level, NullReporter, Reporter};
pub use settings::{Settings, SettingsBuilder};
