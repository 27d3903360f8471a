//! Core Settings struct.

use std::path::{Path, PathBuf};

/// Resolved configuration for driving apktool, apksigner and zipalign.
///
/// All paths are absolute. There are no setters: build a new value through
/// [`SettingsBuilder`](super::SettingsBuilder) to change anything.
#[derive(Clone)]
pub struct Settings {
    /// apktool executable.
    apktool: PathBuf,

    /// apksigner executable.
    apksigner: PathBuf,

    /// zipalign executable.
    zipalign: PathBuf,

    /// Keystore used for signing. Checked for existence at sign time only.
    keystore_path: PathBuf,

    /// Alias of the signing key.
    keystore_alias: String,

    /// Password for both the keystore and the key.
    keystore_password: String,

    /// Show detailed (path-bearing) messages instead of short ones.
    include_paths_in_messages: bool,

    /// Base for relative paths passed to operations.
    working_dir: PathBuf,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("apktool", &self.apktool)
            .field("apksigner", &self.apksigner)
            .field("zipalign", &self.zipalign)
            .field("keystore_path", &self.keystore_path)
            .field("keystore_alias", &self.keystore_alias)
            .field("keystore_password", &"<redacted>")
            .field("include_paths_in_messages", &self.include_paths_in_messages)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

impl Settings {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        apktool: PathBuf,
        apksigner: PathBuf,
        zipalign: PathBuf,
        keystore_path: PathBuf,
        keystore_alias: String,
        keystore_password: String,
        include_paths_in_messages: bool,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            apktool,
            apksigner,
            zipalign,
            keystore_path,
            keystore_alias,
            keystore_password,
            include_paths_in_messages,
            working_dir,
        }
    }

    /// Returns the apktool executable path.
    pub fn apktool(&self) -> &Path {
        &self.apktool
    }

    /// Returns the apksigner executable path.
    pub fn apksigner(&self) -> &Path {
        &self.apksigner
    }

    /// Returns the zipalign executable path.
    pub fn zipalign(&self) -> &Path {
        &self.zipalign
    }

    /// Returns the keystore path.
    pub fn keystore_path(&self) -> &Path {
        &self.keystore_path
    }

    /// Returns the key alias.
    pub fn keystore_alias(&self) -> &str {
        &self.keystore_alias
    }

    /// Returns the keystore password.
    pub fn keystore_password(&self) -> &str {
        &self.keystore_password
    }

    /// Whether messages are rendered in their detailed form.
    pub fn include_paths_in_messages(&self) -> bool {
        self.include_paths_in_messages
    }

    /// Returns the directory relative operation paths are resolved against.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Makes an operation argument absolute against [`Self::working_dir`].
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        crate::toolchain::tool_detection::normalize_path(path.as_ref(), &self.working_dir)
    }
}
