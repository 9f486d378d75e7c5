//! Error types for the review pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a review run.
///
/// Configuration problems are not represented here: a missing or unreadable
/// `.swiftlint.yml` degrades to an empty configuration instead.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The SwiftLint executable does not exist at the resolved path.
    #[error("swiftlint is not installed (looked at '{}')", .0.display())]
    NotInstalled(PathBuf),

    /// The SwiftLint process could not be started.
    #[error("failed to run '{}': {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An invocation produced output that is neither of the known JSON shapes.
    #[error("malformed SwiftLint output for {invocation}: {reason}")]
    MalformedOutput { invocation: String, reason: String },

    /// An explicit file pattern could not be expanded.
    #[error("invalid file pattern '{pattern}': {reason}")]
    Glob { pattern: String, reason: String },

    /// Version control status could not be collected.
    #[error("git error: {0}")]
    Git(String),
}

impl ReviewError {
    /// Creates a malformed-output error for the given invocation label.
    pub fn malformed(invocation: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedOutput {
            invocation: invocation.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a git error.
    pub fn git(message: impl Into<String>) -> Self {
        Self::Git(message.into())
    }
}
