//! Output sink for status messages and relayed tool logs.
//!
//! The toolchain never prints directly. Everything goes through a
//! [`Reporter`], which the binary implements with colored terminal output
//! (see `cli::OutputManager`) and tests implement with an in-memory log.

/// Severity attached to each reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Tool log line prefixed `I:`
    Info,
    /// Tool log line prefixed `W:`
    Warning,
    /// Tool log line prefixed `E:`, or a failure status
    Error,
    /// Successful completion status
    Success,
    /// Unclassified tool output
    Plain,
}

/// Receives `(level, message)` pairs.
pub trait Reporter: Send + Sync {
    /// Emits one line.
    fn report(&self, level: Level, message: &str);
}

/// Prompt echoed by apktool on Windows; swallowed by the newline on stdin.
pub const PROMPT_ECHO: &str = "Press any key to continue";

/// Classifies one line of tool output.
///
/// Returns `None` for the prompt echo, which is never shown. The returned
/// text is the trimmed line with its level prefix kept.
pub fn classify_line(line: &str) -> Option<(Level, &str)> {
    let line = line.trim();

    if line.starts_with("I:") {
        Some((Level::Info, line))
    } else if line.starts_with("W:") {
        Some((Level::Warning, line))
    } else if line.starts_with("E:") {
        Some((Level::Error, line))
    } else if line.contains(PROMPT_ECHO) {
        None
    } else {
        Some((Level::Plain, line))
    }
}

/// Reporter that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _level: Level, _message: &str) {}
}
