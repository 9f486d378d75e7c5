//! Version-control file status used to pick default lint targets.
//!
//! Only consulted when the caller gives no explicit file selection. Paths
//! returned by providers may be relative; the file selector resolves them.

use crate::error::ReviewError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Changed files as seen by version control.
pub trait FileStatusProvider {
    fn modified_files(&self) -> Vec<String>;
    fn deleted_files(&self) -> Vec<String>;
    fn added_files(&self) -> Vec<String>;
}

#[derive(Debug, Default, Clone)]
/// Fixed file lists, for callers that already know what changed.
pub struct StaticStatus {
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub added: Vec<String>,
}

impl FileStatusProvider for StaticStatus {
    fn modified_files(&self) -> Vec<String> {
        self.modified.clone()
    }
    fn deleted_files(&self) -> Vec<String> {
        self.deleted.clone()
    }
    fn added_files(&self) -> Vec<String> {
        self.added.clone()
    }
}

/// Create a `Command` for git that ignores inherited repository overrides.
fn git_cmd() -> Command {
    let mut cmd = Command::new("git");
    cmd.env_remove("GIT_DIR").env_remove("GIT_WORK_TREE");
    cmd
}

fn git_output(repo: &Path, args: &[&str]) -> Result<String, ReviewError> {
    let output = git_cmd()
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| ReviewError::git(format!("failed to run git: {}", e)))?;
    if !output.status.success() {
        return Err(ReviewError::git(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[derive(Debug, Clone, Default)]
/// File status collected from a git work tree against a base revision.
///
/// Paths are absolute (joined onto the repository top level).
pub struct GitStatus {
    modified: Vec<String>,
    deleted: Vec<String>,
    added: Vec<String>,
}

impl GitStatus {
    /// Collect status of the work tree containing `path` relative to `base`.
    ///
    /// Untracked files (respecting ignore rules) count as added.
    pub fn collect(path: &Path, base: &str) -> Result<Self, ReviewError> {
        let top = git_output(path, &["rev-parse", "--show-toplevel"])?;
        let top = PathBuf::from(top.trim());
        let diff = git_output(&top, &["diff", "--name-status", "--no-renames", base])?;
        let untracked = git_output(&top, &["ls-files", "--others", "--exclude-standard"])?;

        let mut status = parse_name_status(&diff, &top);
        status.added.extend(
            untracked
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| top.join(l).to_string_lossy().into_owned()),
        );
        debug!(
            "git status vs {}: {} modified, {} deleted, {} added",
            base,
            status.modified.len(),
            status.deleted.len(),
            status.added.len()
        );
        Ok(status)
    }
}

impl FileStatusProvider for GitStatus {
    fn modified_files(&self) -> Vec<String> {
        self.modified.clone()
    }
    fn deleted_files(&self) -> Vec<String> {
        self.deleted.clone()
    }
    fn added_files(&self) -> Vec<String> {
        self.added.clone()
    }
}

/// Parse `git diff --name-status` output. Unknown status letters are ignored.
fn parse_name_status(text: &str, top: &Path) -> GitStatus {
    let mut status = GitStatus::default();
    for line in text.lines() {
        let mut parts = line.splitn(2, '\t');
        let (Some(code), Some(file)) = (parts.next(), parts.next()) else {
            continue;
        };
        let abs = top.join(file.trim()).to_string_lossy().into_owned();
        match code.chars().next() {
            Some('M') | Some('T') => status.modified.push(abs),
            Some('A') => status.added.push(abs),
            Some('D') => status.deleted.push(abs),
            _ => {}
        }
    }
    status
}
