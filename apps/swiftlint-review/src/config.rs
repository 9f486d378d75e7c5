//! Configuration discovery and effective settings resolution.
//!
//! Two layers are resolved here:
//! - the SwiftLint configuration (`.swiftlint.yml` or an explicit path), of
//!   which only `excluded` and `included` are read, to filter candidate files;
//! - the run settings (`Effective`), merged from CLI flags and defaults.
//!
//! Defaults:
//! - config file: `.swiftlint.yml` in the working directory, unless
//!   lint-all-files mode is on (SwiftLint then discovers it by itself)
//! - directory: the working directory
//! - binary: `/usr/local/bin/swiftlint`
//! - max violations: unlimited
//! - strict, lint-all-files: false
//!
//! Overrides precedence: CLI > defaults. Configuration problems never fail a
//! run; they degrade to "no filters".

use crate::env::expand_env_vars;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Conventional SwiftLint configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".swiftlint.yml";

/// Where the SwiftLint executable is expected when no path is given.
pub const DEFAULT_BINARY: &str = "/usr/local/bin/swiftlint";

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// Subset of `.swiftlint.yml` relevant to file selection.
///
/// All other keys (rules, reporters, ...) belong to SwiftLint and are ignored.
pub struct SwiftLintConfig {
    #[serde(default)]
    pub excluded: Vec<String>,
    #[serde(default)]
    pub included: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Absolute, existing paths used to filter the candidate files.
pub struct PathFilters {
    pub excluded: Vec<PathBuf>,
    pub included: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by the report pipeline.
pub struct Effective {
    /// Base for relative paths and for making inline paths relative.
    pub cwd: PathBuf,
    /// Root directory files must live in; also the SwiftLint process cwd.
    pub directory: PathBuf,
    pub config_file: Option<PathBuf>,
    pub binary: PathBuf,
    pub max_violations: Option<usize>,
    pub strict: bool,
    pub lint_all_files: bool,
}

/// Load `SwiftLintConfig` from `path`.
///
/// Returns an empty configuration when no path is given, the file is missing
/// or unreadable, or its contents are not a YAML mapping. `${VAR}` references
/// are expanded from the environment before parsing.
pub fn load_config(path: Option<&Path>) -> SwiftLintConfig {
    let Some(path) = path else {
        return SwiftLintConfig::default();
    };
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            debug!("config {} not loaded: {}", path.display(), e);
            return SwiftLintConfig::default();
        }
    };
    let expanded = expand_env_vars(&raw);
    match serde_yaml::from_str::<Option<SwiftLintConfig>>(&expanded) {
        Ok(cfg) => cfg.unwrap_or_default(),
        Err(e) => {
            warn!("ignoring unparsable config {}: {}", path.display(), e);
            SwiftLintConfig::default()
        }
    }
}

/// Resolve `paths` relative to the directory holding `config_path`.
///
/// Entries that do not exist on disk are dropped. Surviving entries are
/// canonical absolute paths.
pub fn format_paths(paths: &[String], config_path: &Path) -> Vec<PathBuf> {
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    paths
        .iter()
        .map(|p| base.join(p))
        .filter_map(|p| fs::canonicalize(&p).ok())
        .collect()
}

/// Load the configuration at `config_path` and resolve its path filters.
pub fn resolve_filters(config_path: Option<&Path>) -> PathFilters {
    let Some(path) = config_path else {
        return PathFilters::default();
    };
    let cfg = load_config(Some(path));
    let filters = PathFilters {
        excluded: format_paths(&cfg.excluded, path),
        included: format_paths(&cfg.included, path),
    };
    debug!(
        "path filters: {} excluded, {} included",
        filters.excluded.len(),
        filters.included.len()
    );
    filters
}

/// Resolve `Effective` by merging CLI flags and defaults.
///
/// `cwd` stands in for the process working directory so that callers never
/// need to change it.
pub fn resolve_effective(
    cwd: &Path,
    cli_config: Option<&str>,
    cli_directory: Option<&str>,
    cli_binary: Option<&str>,
    cli_max_violations: Option<usize>,
    cli_strict: Option<bool>,
    cli_lint_all_files: Option<bool>,
) -> Effective {
    let cwd = fs::canonicalize(cwd).unwrap_or_else(|_| cwd.to_path_buf());
    let lint_all_files = cli_lint_all_files.unwrap_or(false);

    let config_file = match cli_config {
        Some(p) => Some(cwd.join(p)),
        None => {
            let default = cwd.join(DEFAULT_CONFIG_FILE);
            if !lint_all_files && default.is_file() {
                Some(default)
            } else {
                None
            }
        }
    };

    let directory = match cli_directory {
        Some(d) => {
            let joined = cwd.join(d);
            fs::canonicalize(&joined).unwrap_or(joined)
        }
        None => cwd.clone(),
    };

    let binary = cli_binary
        .map(|b| cwd.join(b))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY));

    Effective {
        cwd,
        directory,
        config_file,
        binary,
        max_violations: cli_max_violations,
        strict: cli_strict.unwrap_or(false),
        lint_all_files,
    }
}
