//! External tool resolution and path normalization.
//!
//! Tools given explicitly are normalized against the working directory and
//! must exist. Tools left unset are looked up on the executable search path
//! the same way `which`/`where` would, honoring `PATHEXT` on Windows.

use path_absolutize::Absolutize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};

/// Decompiler/builder executable name.
pub const APKTOOL: &str = "apktool";
/// Signer executable name.
pub const APKSIGNER: &str = "apksigner";
/// Aligner executable name.
pub const ZIPALIGN: &str = "zipalign";

/// Makes `path` absolute relative to `working_dir`.
///
/// Absolute paths are returned unchanged apart from `.`/`..` cleanup.
pub fn normalize_path(path: &Path, working_dir: &Path) -> PathBuf {
    match path.absolutize_from(working_dir) {
        Ok(absolute) => absolute.into_owned(),
        Err(e) => {
            log::debug!(
                "Could not absolutize {}: {}; joining onto {}",
                path.display(),
                e,
                working_dir.display()
            );
            working_dir.join(path)
        }
    }
}

/// Resolves the executable for `tool`.
///
/// # Arguments
///
/// * `tool` - Executable name searched for when `explicit` is `None`
/// * `explicit` - Caller-supplied path, possibly relative
/// * `working_dir` - Base for relative paths
/// * `search_path` - PATH-style list to search instead of the process `PATH`
///
/// # Errors
///
/// [`Error::ToolNotFound`] if the explicit path is not a file or the lookup
/// yields nothing.
pub fn resolve_tool(
    tool: &str,
    explicit: Option<&Path>,
    working_dir: &Path,
    search_path: Option<&OsStr>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let path = normalize_path(path, working_dir);
        if !path.is_file() {
            return Err(Error::ToolNotFound {
                tool: tool.to_string(),
                reason: format!("configured path {} does not exist", path.display()),
            });
        }
        log::debug!("Using configured {} at: {}", tool, path.display());
        return Ok(path);
    }

    let found = match search_path {
        Some(paths) => which::which_in(tool, Some(paths), working_dir),
        None => which::which(tool),
    };

    match found {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => Err(Error::ToolNotFound {
            tool: tool.to_string(),
            reason: format!("no executable on PATH ({})", e),
        }),
    }
}
