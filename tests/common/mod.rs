//! Shared fixtures: fake apktool/apksigner/zipalign scripts and a
//! recording reporter.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use apkchain::toolchain::{Level, Reporter, SettingsBuilder};
use tempfile::TempDir;

/// Reporter that keeps every line in memory.
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, m)| m).collect()
    }

    pub fn contains(&self, level: Level, text: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, m)| *l == level && m.contains(text))
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

/// Scratch directory with fake tools in `bin/` and a working dir `work/`.
///
/// Every fake tool appends `<tool> <args...>` to `calls.log` and its stdin
/// to `<tool>.stdin`, then runs its body.
pub struct Fixture {
    pub dir: TempDir,
    pub bin: PathBuf,
    pub work: PathBuf,
}

/// apktool body that writes a package to the `-o` path.
pub const APKTOOL_WRITES_OUTPUT: &str = r#"
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-o" ]; then out="$a"; fi
  prev="$a"
done
if [ -n "$out" ]; then printf 'built' > "$out"; fi
exit 0
"#;

/// zipalign body that writes an aligned copy to its last argument.
pub const ZIPALIGN_COPIES: &str = r#"
printf 'aligned' > "$4"
exit 0
"#;

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        let work = dir.path().join("work");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::create_dir_all(&work).unwrap();

        let fixture = Self { dir, bin, work };
        fixture.script("apktool", "exit 0");
        fixture.script("apksigner", "exit 0");
        fixture.script("zipalign", ZIPALIGN_COPIES);
        fixture
    }

    pub fn tool(&self, name: &str) -> PathBuf {
        self.bin.join(name)
    }

    /// (Re)writes the fake `name` with `body` after the logging preamble.
    pub fn script(&self, name: &str, body: &str) {
        let log = self.dir.path().join("calls.log");
        let stdin = self.dir.path().join(format!("{}.stdin", name));
        let script = format!(
            "#!/bin/sh\n\
             {{ printf '%s' '{name}'; for a in \"$@\"; do printf ' %s' \"$a\"; done; printf '\\n'; }} >> '{log}'\n\
             cat >> '{stdin}'\n\
             {body}\n",
            name = name,
            log = log.display(),
            stdin = stdin.display(),
            body = body,
        );
        let path = self.tool(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Lines of `calls.log`, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Calls made to `tool` only.
    pub fn calls_to(&self, tool: &str) -> Vec<String> {
        let prefix = format!("{} ", tool);
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix) || c == tool)
            .collect()
    }

    /// Everything `tool` read from stdin across all invocations.
    pub fn stdin_of(&self, tool: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(format!("{}.stdin", tool)))
            .unwrap_or_default()
    }

    /// Creates the default keystore `work/SignKey/debug.keystore`.
    pub fn create_keystore(&self) -> PathBuf {
        let keystore = self.work.join("SignKey").join("debug.keystore");
        std::fs::create_dir_all(keystore.parent().unwrap()).unwrap();
        std::fs::write(&keystore, b"keystore").unwrap();
        keystore
    }

    /// Settings with explicit fake tools rooted at `work/`.
    pub fn settings(&self) -> SettingsBuilder {
        SettingsBuilder::new()
            .apktool(self.tool("apktool"))
            .apksigner(self.tool("apksigner"))
            .zipalign(self.tool("zipalign"))
            .working_dir(&self.work)
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work.join(relative)
    }
}

pub fn display(path: &Path) -> String {
    path.display().to_string()
}
