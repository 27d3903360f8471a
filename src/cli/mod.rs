//! Command line interface for apkchain.
//!
//! Parses arguments, layers them over the config file, resolves the tools
//! and dispatches to the matching [`Toolchain`] operation.

mod args;
mod output;

pub use args::{Args, Command, GlobalArgs};
pub use output::OutputManager;

use std::sync::Arc;

use crate::config::FileConfig;
use crate::error::{CliError, Result};
use crate::toolchain::Toolchain;

/// Main CLI entry point
///
/// Returns the process exit code: 0 when the operation succeeded, 1 when it
/// was reported as failed.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with(args).await
}

/// Runs already-parsed arguments.
pub async fn run_with(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let working_dir = std::env::current_dir()?;
    let file_config = FileConfig::discover(args.global.config.as_deref(), &working_dir)?;
    let settings = args
        .global
        .settings_builder(&file_config, &working_dir)
        .build()?;
    log::debug!("Resolved settings: {:?}", settings);

    let toolchain = Toolchain::new(settings, Arc::new(OutputManager::default()));
    let succeeded = dispatch(&toolchain, &args.command).await;

    Ok(if succeeded { 0 } else { 1 })
}

/// Runs `command` on `toolchain`.
pub async fn dispatch(toolchain: &Toolchain, command: &Command) -> bool {
    match command {
        Command::Decompile {
            apk,
            output,
            no_force,
            log,
        } => {
            toolchain
                .decompile(apk, output.as_deref(), !no_force, *log)
                .await
        }
        Command::Build {
            folder,
            output,
            no_force,
            log,
        } => {
            toolchain
                .build(folder, output.as_deref(), !no_force, *log)
                .await
        }
        Command::InstallFramework {
            apk,
            tag,
            no_force,
            log,
        } => {
            toolchain
                .install_framework(apk, tag.as_deref(), !no_force, *log)
                .await
        }
        Command::EmptyFrameworkDir { log } => toolchain.empty_framework_dir(*log).await,
    }
}
