//! External process execution.
//!
//! Every tool invocation goes through [`execute`], which
//! 1. spawns the program with stdin, stdout and stderr piped,
//! 2. writes a single newline to stdin and closes it, so prompts like
//!    apktool's "Press any key to continue" never block,
//! 3. drains stdout and stderr concurrently as one merged log, relaying
//!    classified lines to the [`Reporter`] when `show_log` is set and
//!    discarding them otherwise,
//! 4. waits for exit and maps a non-zero status to [`Error::CommandFailed`].

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{ChildStdin, Command};

use super::error::{Error, Result};
use super::reporter::{Reporter, classify_line};

/// One external process call: program and ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Invocation {
    /// Starts an invocation of `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Appends `arg` only when `enabled`.
    pub fn flag(self, arg: impl AsRef<OsStr>, enabled: bool) -> Self {
        if enabled { self.arg(arg) } else { self }
    }

    /// Appends `name value` when `value` is present.
    pub fn option<V: AsRef<OsStr>>(self, name: impl AsRef<OsStr>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.arg(name).arg(value),
            None => self,
        }
    }

    /// Program file name, used to label errors.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Command line for logs, with `pass:` secrets masked.
    pub fn display_masked(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.starts_with("pass:") {
                parts.push("pass:****".to_string());
            } else {
                parts.push(arg.into_owned());
            }
        }
        parts.join(" ")
    }
}

/// Runs `invocation` to completion.
///
/// Returns `Ok(())` on exit code 0, [`Error::CommandFailed`] on any other
/// status and [`Error::LaunchFailed`] if the process cannot be spawned or
/// awaited.
pub async fn execute(
    invocation: &Invocation,
    show_log: bool,
    reporter: &dyn Reporter,
) -> Result<()> {
    let command_name = invocation.program_name();
    log::debug!("Running: {}", invocation.display_masked());

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(|error| Error::LaunchFailed {
        command: command_name.clone(),
        error,
    })?;

    if let Some(stdin) = child.stdin.take() {
        dismiss_prompt(stdin, &command_name).await;
    }

    // Separate pipes: lines stay whole, but stdout/stderr interleaving is
    // not preserved.
    tokio::join!(
        relay(child.stdout.take(), show_log, reporter),
        relay(child.stderr.take(), show_log, reporter)
    );

    let status = child.wait().await.map_err(|error| Error::LaunchFailed {
        command: command_name.clone(),
        error,
    })?;

    if status.success() {
        log::debug!("{} exited successfully", command_name);
        Ok(())
    } else {
        let code = status.code().unwrap_or(-1);
        log::debug!("{} exited with code {}", command_name, code);
        Err(Error::CommandFailed {
            command: command_name,
            code,
        })
    }
}

/// Writes one newline to the child's stdin, then closes it.
///
/// A tool that exits without reading stdin closes the pipe first; the
/// resulting broken pipe is expected.
async fn dismiss_prompt(mut stdin: ChildStdin, command_name: &str) {
    let written: std::io::Result<()> = async {
        stdin.write_all(b"\n").await?;
        stdin.flush().await
    }
    .await;

    match written {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            log::debug!("{} closed stdin before the newline was written", command_name);
        }
        Err(e) => {
            log::warn!("Failed to write newline to {} stdin: {}", command_name, e);
        }
    }
}

/// Reads `stream` to the end, reporting classified lines if `show_log`.
async fn relay<R>(stream: Option<R>, show_log: bool, reporter: &dyn Reporter)
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return;
    };

    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if !show_log {
                    continue;
                }
                let line = String::from_utf8_lossy(&buf);
                if let Some((level, text)) = classify_line(&line) {
                    reporter.report(level, text);
                }
            }
            Err(e) => {
                log::warn!("Error while reading logs: {}", e);
                break;
            }
        }
    }
}
