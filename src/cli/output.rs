//! Colored terminal output.
//!
//! Terminal coloring is decorative: write and color errors are ignored so
//! a closed or redirected stdout never aborts an operation.

use std::io::{IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::toolchain::{Level, Reporter};

/// Terminal [`Reporter`] printing one colored line per report to stdout.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    color_choice: ColorChoice,
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }
}

impl OutputManager {
    /// Creates an output manager; `color` false disables escape codes.
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self { color_choice }
    }

    /// Foreground color for `level`, `None` for uncolored output.
    pub fn color_for(level: Level) -> Option<Color> {
        match level {
            Level::Info => Some(Color::Blue),
            Level::Warning => Some(Color::Yellow),
            Level::Error => Some(Color::Red),
            Level::Success => Some(Color::Green),
            Level::Plain => None,
        }
    }

    fn print(&self, color: Option<Color>, message: &str) {
        let mut stdout = StandardStream::stdout(self.color_choice);
        if let Some(color) = color {
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)));
        }
        let _ = writeln!(stdout, "{}", message);
        if color.is_some() {
            let _ = stdout.reset();
        }
    }
}

impl Reporter for OutputManager {
    fn report(&self, level: Level, message: &str) {
        self.print(Self::color_for(level), message);
    }
}
