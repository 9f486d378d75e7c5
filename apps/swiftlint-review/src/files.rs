//! Selection of the Swift files to lint.
//!
//! Candidates come from explicit patterns or from version control. They are
//! then narrowed down in a fixed order:
//! 1. `.swift` extension
//! 2. absolute, existing path that still ends in `.swift` once symlinks are
//!    resolved (first occurrence wins on duplicates)
//! 3. inside the selected directory
//! 4. not under any `excluded` path
//! 5. under an `included` path, when any are configured

use crate::config::PathFilters;
use crate::error::ReviewError;
use crate::vcs::FileStatusProvider;
use glob::glob;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extension of files handed to SwiftLint.
pub const SWIFT_EXTENSION: &str = ".swift";

/// Every file under a set of configured paths, by canonical path.
///
/// A configured regular file contributes just itself. Symlinks are followed
/// so a linked subdirectory is covered by the root it is linked from.
struct PathIndex {
    files: HashSet<PathBuf>,
}

impl PathIndex {
    fn build(roots: &[PathBuf]) -> Self {
        let mut files = HashSet::new();
        for root in roots {
            for entry in WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.into_path());
                files.insert(path);
            }
        }
        Self { files }
    }

    fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

/// Raw candidate list before filtering.
///
/// With `patterns`, each entry is expanded as a glob relative to `cwd`.
/// Otherwise the default is modified files minus deleted ones, plus added.
pub fn candidate_files(
    patterns: Option<&[String]>,
    cwd: &Path,
    vcs: &dyn FileStatusProvider,
) -> Result<Vec<String>, ReviewError> {
    match patterns {
        Some(patterns) => {
            let mut out = Vec::new();
            for pat in patterns {
                out.extend(expand_pattern(pat, cwd)?);
            }
            Ok(out)
        }
        None => {
            let deleted: HashSet<String> = vcs.deleted_files().into_iter().collect();
            let mut out: Vec<String> = vcs
                .modified_files()
                .into_iter()
                .filter(|f| !deleted.contains(f))
                .collect();
            out.extend(vcs.added_files());
            Ok(out)
        }
    }
}

fn expand_pattern(pattern: &str, cwd: &Path) -> Result<Vec<String>, ReviewError> {
    let full = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let base = glob::Pattern::escape(&cwd.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), pattern)
    };
    let entries = glob(&full).map_err(|e| ReviewError::Glob {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(entries
        .filter_map(|e| e.ok())
        .map(|p| p.to_string_lossy().into_owned())
        .collect())
}

fn is_swift(path: &Path) -> bool {
    path.to_string_lossy().ends_with(SWIFT_EXTENSION)
}

/// Narrow `files` down to the final, ordered set of paths to lint.
pub fn select_swift_files(
    files: Vec<String>,
    cwd: &Path,
    directory: &Path,
    filters: &PathFilters,
) -> Vec<PathBuf> {
    let excluded = PathIndex::build(&filters.excluded);
    let included = PathIndex::build(&filters.included);
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let selected: Vec<PathBuf> = files
        .into_iter()
        .filter(|f| f.ends_with(SWIFT_EXTENSION))
        // Resolving also drops files that vanished since they were listed.
        .filter_map(|f| fs::canonicalize(cwd.join(&f)).ok())
        // A `.swift` symlink may point at anything.
        .filter(|p| is_swift(p) && p.is_file())
        .filter(|p| seen.insert(p.clone()))
        .filter(|p| p.starts_with(directory))
        .filter(|p| !excluded.contains(p))
        .filter(|p| filters.included.is_empty() || included.contains(p))
        .collect();

    info!("selected {} Swift file(s) to lint", selected.len());
    debug!("files: {:?}", selected);
    selected
}

/// Candidate discovery followed by filtering.
pub fn find_swift_files(
    patterns: Option<&[String]>,
    cwd: &Path,
    directory: &Path,
    filters: &PathFilters,
    vcs: &dyn FileStatusProvider,
) -> Result<Vec<PathBuf>, ReviewError> {
    let candidates = candidate_files(patterns, cwd, vcs)?;
    Ok(select_swift_files(candidates, cwd, directory, filters))
}
