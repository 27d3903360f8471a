//! Discovery of the package produced by `apktool b`.

use crate::bail;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};

/// Directory inside a decoded folder where apktool writes rebuilt packages.
pub const DIST_DIR: &str = "dist";

/// Suffix appended to the folder path to name the default build output.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_Signed.apk";

/// Returns `<folder>_Signed.apk`, the output used when none is requested.
pub fn default_output_path(folder: &Path) -> Result<PathBuf> {
    if folder.file_name().is_none() {
        bail!("Cannot derive an output name from {}", folder.display());
    }
    let mut output = OsString::from(folder.as_os_str());
    output.push(DEFAULT_OUTPUT_SUFFIX);
    Ok(PathBuf::from(output))
}

/// Finds the package a build of `folder` produced.
///
/// `output` wins when it exists on disk. Otherwise the first `*.apk` in
/// `<folder>/dist`, in lexical order, is taken.
///
/// # Errors
///
/// [`Error::NoArtifactProduced`] when neither yields a file.
pub fn locate_built_artifact(folder: &Path, output: Option<&Path>) -> Result<PathBuf> {
    if let Some(output) = output.filter(|p| p.is_file()) {
        return Ok(output.to_path_buf());
    }

    let dist_dir = folder.join(DIST_DIR);
    let dist_str = dist_dir
        .to_str()
        .ok_or_else(|| Error::GenericError("dist path contains non-UTF8 characters".into()))?;
    let pattern = format!("{}/*.apk", glob::Pattern::escape(dist_str));

    let mut candidates: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    match candidates.into_iter().next() {
        Some(artifact) => {
            log::debug!("Found built artifact in dist: {}", artifact.display());
            Ok(artifact)
        }
        None => Err(Error::NoArtifactProduced { dist_dir }),
    }
}
