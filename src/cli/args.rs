//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Tool and keystore
//! options are global and can also come from `APKCHAIN_*` environment
//! variables or an `apkchain.toml` file.

use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::FileConfig;
use crate::toolchain::SettingsBuilder;

/// Decompile, rebuild, sign and align Android packages
#[derive(Parser, Debug)]
#[command(
    name = "apkchain",
    version,
    about = "Decompile, rebuild, sign and align Android packages",
    long_about = "Drives apktool, apksigner and zipalign.

`build` rebuilds a decoded folder, signs the result with the configured keystore
and zipaligns it in place. Each step runs only if the previous one succeeded.

Usage:
  apkchain decompile app.apk -o app
  apkchain build app -o app-patched.apk
  apkchain --keystore release.keystore --ks-alias release build app
  apkchain install-framework framework-res.apk -t vendor

Exit code 0 = the operation (for `build`: build, sign and align) succeeded."
)]
pub struct Args {
    /// Tool, keystore and display options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// apktool executable (default: looked up on PATH)
    #[arg(
        long,
        global = true,
        env = "APKCHAIN_APKTOOL",
        value_name = "PATH",
        value_parser = path_parser()
    )]
    pub apktool: Option<PathBuf>,

    /// apksigner executable (default: looked up on PATH)
    #[arg(
        long,
        global = true,
        env = "APKCHAIN_APKSIGNER",
        value_name = "PATH",
        value_parser = path_parser()
    )]
    pub apksigner: Option<PathBuf>,

    /// zipalign executable (default: looked up on PATH)
    #[arg(
        long,
        global = true,
        env = "APKCHAIN_ZIPALIGN",
        value_name = "PATH",
        value_parser = path_parser()
    )]
    pub zipalign: Option<PathBuf>,

    /// Signing keystore (default: SignKey/debug.keystore)
    #[arg(
        long,
        global = true,
        env = "APKCHAIN_KEYSTORE",
        value_name = "PATH",
        value_parser = path_parser()
    )]
    pub keystore: Option<PathBuf>,

    /// Key alias inside the keystore (default: androiddebugkey)
    #[arg(long = "ks-alias", global = true, env = "APKCHAIN_KS_ALIAS", value_name = "ALIAS")]
    pub keystore_alias: Option<String>,

    /// Keystore and key password (default: android)
    #[arg(
        long = "ks-pass",
        global = true,
        env = "APKCHAIN_KS_PASS",
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub keystore_password: Option<String>,

    /// Include full paths in status messages
    #[arg(long, global = true, overrides_with = "hide_paths")]
    pub show_paths: bool,

    /// Omit paths from status messages, even if the config file asks for them
    #[arg(long, global = true, overrides_with = "show_paths")]
    pub hide_paths: bool,

    /// TOML config file (default: ./apkchain.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Decode an APK into a folder (apktool d)
    Decompile {
        /// APK to decode
        apk: PathBuf,

        /// Output folder (default: chosen by apktool)
        #[arg(short = 'o', long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Do not overwrite an existing output folder
        #[arg(long)]
        no_force: bool,

        /// Stream apktool's log
        #[arg(long)]
        log: bool,
    },

    /// Rebuild a decoded folder, then sign and align the APK (apktool b)
    Build {
        /// Decoded folder
        folder: PathBuf,

        /// Output APK (default: <FOLDER>_Signed.apk)
        #[arg(short = 'o', long, value_name = "APK")]
        output: Option<PathBuf>,

        /// Do not pass -f to apktool
        #[arg(long)]
        no_force: bool,

        /// Stream apktool's log
        #[arg(long)]
        log: bool,
    },

    /// Install framework resources (apktool if)
    InstallFramework {
        /// Framework APK
        apk: PathBuf,

        /// Tag to install the framework under
        #[arg(short = 't', long)]
        tag: Option<String>,

        /// Do not overwrite an existing framework
        #[arg(long)]
        no_force: bool,

        /// Stream apktool's log
        #[arg(long)]
        log: bool,
    },

    /// Delete all installed frameworks (apktool empty-framework-dir)
    EmptyFrameworkDir {
        /// Stream apktool's log
        #[arg(long)]
        log: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Command::InstallFramework { tag: Some(tag), .. } = &self.command {
            if tag.trim().is_empty() {
                return Err("Framework tag cannot be empty".to_string());
            }
        }

        if self
            .global
            .keystore_alias
            .as_deref()
            .is_some_and(str::is_empty)
        {
            return Err("Keystore alias cannot be empty".to_string());
        }

        Ok(())
    }
}

impl GlobalArgs {
    /// Layers these options over `file` into a settings builder.
    ///
    /// Flags and environment variables win over the file. Empty paths from
    /// either source count as unset. Relative paths are resolved against
    /// `working_dir`.
    pub fn settings_builder(&self, file: &FileConfig, working_dir: &Path) -> SettingsBuilder {
        let mut builder = SettingsBuilder::new()
            .working_dir(working_dir)
            .include_paths_in_messages(self.include_paths(file));

        if let Some(path) = layered_path(&self.apktool, &file.apktool) {
            builder = builder.apktool(path);
        }
        if let Some(path) = layered_path(&self.apksigner, &file.apksigner) {
            builder = builder.apksigner(path);
        }
        if let Some(path) = layered_path(&self.zipalign, &file.zipalign) {
            builder = builder.zipalign(path);
        }
        if let Some(path) = layered_path(&self.keystore, &file.keystore) {
            builder = builder.keystore(path);
        }
        if let Some(alias) = self.keystore_alias.as_ref().or(file.keystore_alias.as_ref()) {
            builder = builder.keystore_alias(alias.as_str());
        }
        if let Some(password) = self
            .keystore_password
            .as_ref()
            .or(file.keystore_password.as_ref())
        {
            builder = builder.keystore_password(password.as_str());
        }

        builder
    }

    /// `--show-paths`/`--hide-paths`, else the file setting, else off.
    fn include_paths(&self, file: &FileConfig) -> bool {
        if self.show_paths {
            true
        } else if self.hide_paths {
            false
        } else {
            file.include_paths_in_messages.unwrap_or(false)
        }
    }
}

/// Like clap's path parser, but lets empty values through so an exported
/// empty variable reads as unset.
fn path_parser() -> impl TypedValueParser<Value = PathBuf> {
    OsStringValueParser::new().map(PathBuf::from)
}

fn layered_path<'a>(cli: &'a Option<PathBuf>, file: &'a Option<PathBuf>) -> Option<&'a Path> {
    let non_empty = |path: &'a Option<PathBuf>| {
        path.as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    };
    non_empty(cli).or_else(|| non_empty(file))
}
