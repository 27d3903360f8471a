//! zipalign step of the build chain.

use std::path::{Path, PathBuf};
use tokio::fs::{remove_file, rename};

use super::error::{ErrorExt, Result};
use super::message::StatusMessage;
use super::orchestrator::Toolchain;
use super::process::{self, Invocation};
use super::reporter::Level;

/// Byte boundary passed to `zipalign -v`.
pub const ALIGNMENT: &str = "4";

/// Returns `<dir>/<stem>_aligned.apk` for `artifact`.
pub fn aligned_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    artifact.with_file_name(format!("{}_aligned.apk", stem))
}

impl Toolchain {
    /// Aligns `artifact` and swaps the aligned copy into its place.
    ///
    /// Normally reached through [`Toolchain::build`] after a successful
    /// [`Toolchain::sign`]. A failure leaves the signed artifact untouched.
    pub async fn align(&self, artifact: impl AsRef<Path>) -> bool {
        let artifact = self.settings().resolve(artifact);
        let aligned = aligned_path(&artifact);

        log::info!("Aligning {}", artifact.display());
        let invocation = Invocation::new(self.settings().zipalign())
            .args(["-v", ALIGNMENT])
            .arg(&artifact)
            .arg(&aligned);

        let result = match process::execute(&invocation, false, self.reporter()).await {
            Ok(()) => replace_with_aligned(&artifact, &aligned).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.emit(
                    Level::Success,
                    &StatusMessage::new(
                        "Successfully zipaligned.",
                        format!("Successfully zipaligned '{}'.", artifact.display()),
                    ),
                );
                true
            }
            Err(e) => {
                log::warn!("zipalign failed: {}", e);
                self.emit(
                    Level::Error,
                    &StatusMessage::new(
                        "Failed to zipalign APK.",
                        format!("Failed to zipalign APK: {}", e),
                    ),
                );
                false
            }
        }
    }
}

/// Deletes `original` and renames `aligned` to take its name.
async fn replace_with_aligned(original: &Path, aligned: &Path) -> Result<()> {
    remove_file(original)
        .await
        .fs_context("removing unaligned artifact", original)?;
    rename(aligned, original)
        .await
        .fs_context("renaming aligned artifact", aligned)?;
    log::debug!("Replaced {} with aligned copy", original.display());
    Ok(())
}
