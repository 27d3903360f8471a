//! APK signing with apksigner.

use std::path::Path;

use super::error::Error;
use super::message::StatusMessage;
use super::orchestrator::Toolchain;
use super::process::{self, Invocation};
use super::reporter::Level;

impl Toolchain {
    /// Signs `artifact` in place with the configured keystore.
    ///
    /// Normally reached through [`Toolchain::build`]. The same password is
    /// passed for the keystore and the key, and v4 signing is disabled so no
    /// `.idsig` file is written next to the package.
    ///
    /// Returns `false` without running apksigner when the keystore file
    /// does not exist.
    pub async fn sign(&self, artifact: impl AsRef<Path>) -> bool {
        let artifact = self.settings().resolve(artifact);
        let keystore = self.settings().keystore_path();

        if !keystore.is_file() {
            let error = Error::MissingKeystore {
                path: keystore.to_path_buf(),
            };
            log::warn!("{}", error);
            self.emit(
                Level::Error,
                &StatusMessage::new("Keystore not found.", error.to_string()),
            );
            return false;
        }

        log::info!("Signing {}", artifact.display());
        let invocation = self.signer_invocation(&artifact);

        match process::execute(&invocation, false, self.reporter()).await {
            Ok(()) => {
                self.emit(
                    Level::Success,
                    &StatusMessage::new(
                        "Successfully signed.",
                        format!(
                            "Successfully signed '{}' with keystore '{}'.",
                            artifact.display(),
                            keystore.display()
                        ),
                    ),
                );
                true
            }
            Err(e) => {
                log::warn!("apksigner failed: {}", e);
                self.emit(
                    Level::Error,
                    &StatusMessage::new("Failed to sign APK.", format!("Failed to sign APK: {}", e)),
                );
                false
            }
        }
    }

    /// `apksigner sign --ks <ks> --ks-key-alias <alias> --ks-pass pass:<pw>
    /// --key-pass pass:<pw> --v4-signing-enabled false <artifact>`
    pub(super) fn signer_invocation(&self, artifact: &Path) -> Invocation {
        let settings = self.settings();
        let password = format!("pass:{}", settings.keystore_password());

        Invocation::new(settings.apksigner())
            .arg("sign")
            .arg("--ks")
            .arg(settings.keystore_path())
            .arg("--ks-key-alias")
            .arg(settings.keystore_alias())
            .arg("--ks-pass")
            .arg(&password)
            .arg("--key-pass")
            .arg(&password)
            .args(["--v4-signing-enabled", "false"])
            .arg(artifact)
    }
}
