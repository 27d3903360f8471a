//! Error types for toolchain operations.
//!
//! Only [`Error::ToolNotFound`] ever escapes to callers of the public
//! operations (from construction). The remaining variants describe failures
//! that are reported through a [`Reporter`](super::Reporter) and swallowed
//! at the point where they occur.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for toolchain operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or driving the external tools.
#[derive(Error, Debug)]
pub enum Error {
    /// A required executable could not be located.
    #[error("{tool} not found: {reason}")]
    ToolNotFound {
        /// Tool name (e.g. `apktool`)
        tool: String,
        /// Why resolution failed
        reason: String,
    },

    /// An external process exited with a non-zero status.
    #[error("Command failed with return code {code}")]
    CommandFailed {
        /// Program that was run
        command: String,
        /// Exit code, `-1` when terminated by a signal
        code: i32,
    },

    /// An external process could not be spawned or awaited.
    #[error("Error during command execution: {command}: {error}")]
    LaunchFailed {
        /// Program that was run
        command: String,
        /// Underlying OS error
        #[source]
        error: std::io::Error,
    },

    /// Signing was requested but the keystore file is absent.
    #[error("Keystore not found at {}", path.display())]
    MissingKeystore {
        /// Configured keystore path
        path: PathBuf,
    },

    /// The build step finished without leaving a package behind.
    #[error("No APK file found in {} after build", dist_dir.display())]
    NoArtifactProduced {
        /// Directory that was scanned
        dist_dir: PathBuf,
    },

    /// Filesystem error with the path and operation that caused it.
    #[error("{context} '{}': {source}", path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid glob pattern while scanning for artifacts.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Catch-all for conditions without a dedicated variant
    #[error("{0}")]
    GenericError(String),
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] naming `context` and `path`.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::toolchain::Error::GenericError(format!($($arg)*)))
    };
}
