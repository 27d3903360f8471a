//! Main toolchain orchestration.
//!
//! This module provides the [`Toolchain`] orchestrator that turns each
//! public operation into apktool/apksigner/zipalign invocations and reports
//! the outcome.

use std::path::Path;
use std::sync::Arc;

use super::artifact::{default_output_path, locate_built_artifact};
use super::error::Error;
use super::message::StatusMessage;
use super::process::{self, Invocation};
use super::reporter::{Level, Reporter};
use super::settings::Settings;

/// Drives apktool, apksigner and zipalign.
///
/// Operations run strictly one after another: each awaits its external
/// process before returning. Failures are reported through the
/// [`Reporter`] and summarized by the returned `bool`; nothing is raised.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use apkchain::toolchain::{NullReporter, SettingsBuilder, Toolchain};
///
/// # async fn example() -> apkchain::toolchain::Result<()> {
/// let settings = SettingsBuilder::new().build()?;
/// let toolchain = Toolchain::new(settings, Arc::new(NullReporter));
///
/// toolchain.decompile("app.apk", None, true, false).await;
/// // edit app/ ...
/// let ok = toolchain.build("app", Some(Path::new("app-patched.apk")), true, false).await;
/// # let _ = ok;
/// # Ok(())
/// # }
/// ```
pub struct Toolchain {
    settings: Settings,
    reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain")
            .field("settings", &self.settings)
            .field("reporter", &"<dyn Reporter>")
            .finish()
    }
}

impl Toolchain {
    /// Creates a toolchain from resolved settings.
    pub fn new(settings: Settings, reporter: Arc<dyn Reporter>) -> Self {
        Self { settings, reporter }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(super) fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    /// Emits `message` in the form selected by the settings.
    pub(super) fn emit(&self, level: Level, message: &StatusMessage) {
        self.reporter
            .report(level, message.render(self.settings.include_paths_in_messages()));
    }

    /// Decodes `package` into a folder.
    ///
    /// Runs `apktool d <package> [-f] [-o <output_dir>]`. `force` overwrites
    /// an existing output folder; `show_log` streams apktool's log. An empty
    /// `output_dir` counts as absent.
    pub async fn decompile(
        &self,
        package: impl AsRef<Path>,
        output_dir: Option<&Path>,
        force: bool,
        show_log: bool,
    ) -> bool {
        let package = self.settings.resolve(package);
        let output_dir = output_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| self.settings.resolve(dir));

        let invocation = Invocation::new(self.settings.apktool())
            .arg("d")
            .arg(&package)
            .flag("-f", force)
            .option("-o", output_dir.as_ref());

        let success = StatusMessage::quoted(format!(
            "Successfully decompiled '{}'",
            package.display()
        ));
        self.run_cmd(&invocation, show_log, Some(success)).await
    }

    /// Rebuilds `folder` into a package, then signs and aligns it.
    ///
    /// Runs `apktool b <folder> [-f] -o <output>`, where `output` defaults to
    /// `<folder>_Signed.apk` (also when `output_package` is empty). The package to sign is `output` if it exists,
    /// else the first `*.apk` in `<folder>/dist`. Each step runs only if the
    /// previous one succeeded; artifacts of an aborted chain stay on disk.
    ///
    /// Returns `true` only if build, sign and align all succeeded.
    pub async fn build(
        &self,
        folder: impl AsRef<Path>,
        output_package: Option<&Path>,
        force: bool,
        show_log: bool,
    ) -> bool {
        let folder = self.settings.resolve(folder);
        let output = match output_package.filter(|path| !path.as_os_str().is_empty()) {
            Some(path) => self.settings.resolve(path),
            None => match default_output_path(&folder) {
                Ok(path) => path,
                Err(e) => {
                    self.emit(
                        Level::Error,
                        &StatusMessage::new("Invalid build folder.", e.to_string()),
                    );
                    return false;
                }
            },
        };

        let invocation = Invocation::new(self.settings.apktool())
            .arg("b")
            .arg(&folder)
            .flag("-f", force)
            .option("-o", Some(&output));

        let success = StatusMessage::quoted(format!("Successfully built '{}'", folder.display()));
        if !self.run_cmd(&invocation, show_log, Some(success)).await {
            log::info!("Build failed; skipping signing and alignment");
            return false;
        }

        let artifact = match locate_built_artifact(&folder, Some(output.as_path())) {
            Ok(artifact) => artifact,
            Err(e) => {
                log::warn!("{}", e);
                self.emit(
                    Level::Error,
                    &StatusMessage::new("No APK file found after build.", e.to_string()),
                );
                return false;
            }
        };

        if !self.sign(&artifact).await {
            log::info!("Signing failed; skipping alignment");
            return false;
        }

        self.align(&artifact).await
    }

    /// Installs framework resources from `framework`.
    ///
    /// Runs `apktool if <framework> [-f] [-t <tag>]`. An empty `tag` counts
    /// as absent.
    pub async fn install_framework(
        &self,
        framework: impl AsRef<Path>,
        tag: Option<&str>,
        force: bool,
        show_log: bool,
    ) -> bool {
        let framework = self.settings.resolve(framework);

        let invocation = Invocation::new(self.settings.apktool())
            .arg("if")
            .arg(&framework)
            .flag("-f", force)
            .option("-t", tag.filter(|tag| !tag.is_empty()));

        let success = StatusMessage::quoted(format!(
            "Successfully installed framework from '{}'",
            framework.display()
        ));
        self.run_cmd(&invocation, show_log, Some(success)).await
    }

    /// Removes every installed framework. Runs `apktool empty-framework-dir`.
    pub async fn empty_framework_dir(&self, show_log: bool) -> bool {
        let invocation = Invocation::new(self.settings.apktool()).arg("empty-framework-dir");

        let success = StatusMessage::plain("Successfully emptied the apktool framework directory");
        self.run_cmd(&invocation, show_log, Some(success)).await
    }

    /// Executes `invocation` and reports success or failure.
    async fn run_cmd(
        &self,
        invocation: &Invocation,
        show_log: bool,
        success: Option<StatusMessage>,
    ) -> bool {
        match process::execute(invocation, show_log, self.reporter()).await {
            Ok(()) => {
                if let Some(message) = success {
                    self.emit(Level::Success, &message);
                }
                true
            }
            Err(e) => {
                let message = match &e {
                    Error::LaunchFailed { .. } => {
                        StatusMessage::new("Error during command execution", e.to_string())
                    }
                    _ => StatusMessage::plain(e.to_string()),
                };
                self.emit(Level::Error, &message);
                false
            }
        }
    }
}
