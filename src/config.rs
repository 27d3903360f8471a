//! Optional TOML configuration file.
//!
//! Values here sit below command line flags and environment variables and
//! above built-in defaults. Every key is optional:
//!
//! ```toml
//! apktool = "tools/apktool"
//! apksigner = "/opt/android/build-tools/34.0.0/apksigner"
//! zipalign = "/opt/android/build-tools/34.0.0/zipalign"
//! keystore = "SignKey/release.keystore"
//! keystore_alias = "release"
//! keystore_password = "secret"
//! include_paths_in_messages = true
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// File looked for in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "apkchain.toml";

/// Contents of an `apkchain.toml` file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// apktool executable
    pub apktool: Option<PathBuf>,
    /// apksigner executable
    pub apksigner: Option<PathBuf>,
    /// zipalign executable
    pub zipalign: Option<PathBuf>,
    /// Signing keystore
    pub keystore: Option<PathBuf>,
    /// Key alias
    pub keystore_alias: Option<String>,
    /// Keystore and key password
    pub keystore_password: Option<String>,
    /// Show detailed messages
    pub include_paths_in_messages: Option<bool>,
}

impl FileConfig {
    /// Parses a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `explicit` if given, else `apkchain.toml` in `working_dir` if
    /// present, else an empty config.
    ///
    /// # Errors
    ///
    /// [`CliError::ConfigNotFound`] when `explicit` names a missing file.
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            let path = working_dir.join(path);
            if !path.is_file() {
                return Err(CliError::ConfigNotFound { path }.into());
            }
            return Self::load(&path);
        }

        let candidate = working_dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
