//! Toolchain configuration.
//!
//! [`Settings`] is the resolved, immutable configuration shared by every
//! operation. It is only obtainable through [`SettingsBuilder::build`],
//! which fails if any of the three tools cannot be located.

mod builder;
mod core;

pub use builder::SettingsBuilder;
pub use core::Settings;

/// Alias of the key inside the default debug keystore.
pub const DEFAULT_KEYSTORE_ALIAS: &str = "androiddebugkey";

/// Password of the default debug keystore, reused for the key.
pub const DEFAULT_KEYSTORE_PASSWORD: &str = "android";

/// Keystore location relative to the working directory when none is given.
pub const DEFAULT_KEYSTORE_PATH: &str = "SignKey/debug.keystore";
