//! Two-form status messages.
//!
//! Every message shown to the user exists in a short form, which never
//! carries filesystem paths, and a detailed form. The settings flag
//! `include_paths_in_messages` picks one at emission time.

use std::fmt;

/// A user-facing message with a redacted and a detailed rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    short: String,
    detailed: String,
}

impl StatusMessage {
    /// Creates a message from explicit short and detailed renderings.
    pub fn new(short: impl Into<String>, detailed: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            detailed: detailed.into(),
        }
    }

    /// Creates a message whose short form is the detailed text cut before
    /// the first `'` and trimmed.
    ///
    /// Templates put paths inside single quotes, so
    /// `Successfully decompiled '/tmp/app.apk'` shortens to
    /// `Successfully decompiled`.
    pub fn quoted(detailed: impl Into<String>) -> Self {
        let detailed = detailed.into();
        let short = detailed
            .split('\'')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        Self { short, detailed }
    }

    /// Creates a message with the same text in both forms.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            short: text.clone(),
            detailed: text,
        }
    }

    /// Returns the rendering selected by `include_paths`.
    pub fn render(&self, include_paths: bool) -> &str {
        if include_paths {
            &self.detailed
        } else {
            &self.short
        }
    }

    /// Path-free rendering.
    pub fn short(&self) -> &str {
        &self.short
    }

    /// Full rendering.
    pub fn detailed(&self) -> &str {
        &self.detailed
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detailed)
    }
}
