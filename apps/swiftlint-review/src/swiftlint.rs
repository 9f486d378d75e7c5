//! SwiftLint process invocation.
//!
//! Arguments are built from an ordered options list:
//! - `Flag(true)` becomes `--key`, `Flag(false)` becomes `--no-key`
//! - `Value(v)` becomes `--key v`
//! - `Absent` is skipped
//! - underscores in keys become hyphens
//!
//! Free-form extra arguments are appended last. The process always runs with
//! an explicit working directory.

use crate::error::ReviewError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Value of a single SwiftLint option.
pub enum OptionValue {
    Flag(bool),
    Value(String),
    Absent,
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Flag(b)
    }
}

impl From<Option<String>> for OptionValue {
    fn from(v: Option<String>) -> Self {
        v.map(OptionValue::Value).unwrap_or(OptionValue::Absent)
    }
}

/// Ordered option list passed to SwiftLint.
pub type Options = Vec<(String, OptionValue)>;

/// Handle on a SwiftLint executable.
#[derive(Debug, Clone)]
pub struct SwiftLint {
    binary: PathBuf,
}

impl SwiftLint {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Whether the executable exists.
    pub fn is_installed(&self) -> bool {
        self.binary.is_file()
    }

    /// Fail with `NotInstalled` unless the executable exists.
    pub fn ensure_installed(&self) -> Result<(), ReviewError> {
        if self.is_installed() {
            Ok(())
        } else {
            Err(ReviewError::NotInstalled(self.binary.clone()))
        }
    }

    /// Run `swiftlint <cmd> <options> <extra>` in `cwd` and capture stdout.
    ///
    /// A non-zero exit status is expected when violations are found and is
    /// not treated as an error.
    pub fn run(
        &self,
        cmd: &str,
        options: &[(String, OptionValue)],
        extra_args: &str,
        cwd: &Path,
    ) -> Result<String, ReviewError> {
        let args = build_args(options, extra_args);
        debug!(
            "running {} {} {} (cwd {})",
            self.binary.display(),
            cmd,
            args.join(" "),
            cwd.display()
        );
        let output = Command::new(&self.binary)
            .arg(cmd)
            .args(&args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ReviewError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;
        debug!("swiftlint exited with {}", output.status);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Turn options and extra arguments into an argv list.
pub fn build_args(options: &[(String, OptionValue)], extra_args: &str) -> Vec<String> {
    let mut args = Vec::new();
    for (key, value) in options {
        let key = key.replace('_', "-");
        match value {
            OptionValue::Flag(true) => args.push(format!("--{}", key)),
            OptionValue::Flag(false) => args.push(format!("--no-{}", key)),
            OptionValue::Value(v) => {
                args.push(format!("--{}", key));
                args.push(v.clone());
            }
            OptionValue::Absent => {}
        }
    }
    args.extend(split_args(extra_args));
    args
}

/// Split a free-form argument string on whitespace, honoring simple quotes.
///
/// No escapes or variable expansion: quotes only group words.
pub fn split_args(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    for c in s.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => cur.push(c),
            None if c == '\'' || c == '"' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    out.push(std::mem::take(&mut cur));
                    in_word = false;
                }
            }
            None => {
                cur.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        out.push(cur);
    }
    out
}
