//! Builder for constructing Settings.

use super::{
    DEFAULT_KEYSTORE_ALIAS, DEFAULT_KEYSTORE_PASSWORD, DEFAULT_KEYSTORE_PATH, Settings,
};
use crate::toolchain::error::{ErrorExt, Result};
use crate::toolchain::tool_detection::{APKSIGNER, APKTOOL, ZIPALIGN, normalize_path, resolve_tool};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Every field is optional. Unset tools are looked up on `PATH`; an unset
/// keystore defaults to `SignKey/debug.keystore` under the working
/// directory.
///
/// # Examples
///
/// ```no_run
/// use apkchain::toolchain::SettingsBuilder;
///
/// # fn example() -> apkchain::toolchain::Result<()> {
/// let settings = SettingsBuilder::new()
///     .apktool("tools/apktool")
///     .keystore("release.keystore")
///     .keystore_alias("release")
///     .keystore_password("hunter2")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default, Clone)]
pub struct SettingsBuilder {
    apktool: Option<PathBuf>,
    apksigner: Option<PathBuf>,
    zipalign: Option<PathBuf>,
    keystore: Option<PathBuf>,
    keystore_alias: Option<String>,
    keystore_password: Option<String>,
    include_paths_in_messages: bool,
    working_dir: Option<PathBuf>,
    search_path: Option<OsString>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the apktool executable.
    ///
    /// Default: looked up on `PATH`
    pub fn apktool<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.apktool = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the apksigner executable.
    ///
    /// Default: looked up on `PATH`
    pub fn apksigner<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.apksigner = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the zipalign executable.
    ///
    /// Default: looked up on `PATH`
    pub fn zipalign<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.zipalign = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the signing keystore.
    ///
    /// Default: `SignKey/debug.keystore`
    pub fn keystore<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.keystore = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the key alias.
    ///
    /// Default: `androiddebugkey`
    pub fn keystore_alias(mut self, alias: impl Into<String>) -> Self {
        self.keystore_alias = Some(alias.into());
        self
    }

    /// Sets the keystore password, also used as the key password.
    ///
    /// Default: `android`
    pub fn keystore_password(mut self, password: impl Into<String>) -> Self {
        self.keystore_password = Some(password.into());
        self
    }

    /// Show full paths in status messages.
    ///
    /// Default: false
    pub fn include_paths_in_messages(mut self, include: bool) -> Self {
        self.include_paths_in_messages = include;
        self
    }

    /// Sets the directory relative paths are resolved against.
    ///
    /// Default: the process working directory
    pub fn working_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.working_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Searches this PATH-style list instead of the process `PATH`.
    pub fn search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }

    /// Resolves every tool and builds the settings.
    ///
    /// # Errors
    ///
    /// [`Error::ToolNotFound`](crate::toolchain::Error::ToolNotFound) for
    /// the first of apktool, apksigner, zipalign that cannot be resolved.
    pub fn build(self) -> Result<Settings> {
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => std::env::current_dir().fs_context("reading current directory", ".")?,
        };
        let search_path = self.search_path.as_deref();

        let apktool = resolve_tool(APKTOOL, self.apktool.as_deref(), &working_dir, search_path)?;
        let apksigner =
            resolve_tool(APKSIGNER, self.apksigner.as_deref(), &working_dir, search_path)?;
        let zipalign = resolve_tool(ZIPALIGN, self.zipalign.as_deref(), &working_dir, search_path)?;

        let keystore_path = normalize_path(
            self.keystore
                .as_deref()
                .unwrap_or(Path::new(DEFAULT_KEYSTORE_PATH)),
            &working_dir,
        );

        Ok(Settings::new(
            apktool,
            apksigner,
            zipalign,
            keystore_path,
            self.keystore_alias
                .unwrap_or_else(|| DEFAULT_KEYSTORE_ALIAS.to_string()),
            self.keystore_password
                .unwrap_or_else(|| DEFAULT_KEYSTORE_PASSWORD.to_string()),
            self.include_paths_in_messages,
            working_dir,
        ))
    }
}
