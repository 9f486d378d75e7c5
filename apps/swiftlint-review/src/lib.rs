//! swiftlint-review core library.
//!
//! Runs SwiftLint over a selection of Swift files and reports the violations
//! to a code-review host, either inline (one annotation per violation) or as
//! a single markdown summary.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: `.swiftlint.yml` path filters and effective run settings.
//! - `env`: `${VAR}` expansion for configuration contents.
//! - `files`: Selection of the Swift files to lint.
//! - `vcs`: Changed-file status from git.
//! - `swiftlint`: Argument building and process invocation.
//! - `aggregate`: JSON output parsing, merging and capping.
//! - `filter`: Caller predicates and severity partitioning.
//! - `host`: Review host seam and an in-memory host.
//! - `lint`: The end-to-end pipeline and the reporting decisions.
//! - `models`: Issues, severities, summaries and tool output shapes.
//! - `output`: Markdown rendering and console/JSON printers.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod files;
pub mod filter;
pub mod host;
pub mod lint;
pub mod models;
pub mod output;
pub mod swiftlint;
pub mod vcs;

pub use error::ReviewError;
pub use lint::{run_lint, ReportRequest};
