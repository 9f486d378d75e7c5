//! Shared data models for parsed issues, run summaries and tool output.

pub mod tool_output;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Severity reported by SwiftLint for a single violation.
///
/// Parsing is case-insensitive so both `Warning` (legacy reporter) and
/// `warning` map to the same variant. Anything else is kept verbatim.
pub enum Severity {
    Warning,
    Error,
    Unknown(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Unknown(s) => s.as_str(),
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            _ => Severity::Unknown(s.to_string()),
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        Severity::from(s.as_str())
    }
}

impl From<Severity> for String {
    fn from(s: Severity) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single SwiftLint violation with its location.
///
/// `line` is 0 when the tool reported a file-level violation without a line.
pub struct Issue {
    pub file: String,
    pub line: u32,
    pub message: String,
    pub severity: Severity,
    pub rule: String,
}

impl Issue {
    /// Last path component of `file`, as shown in summary tables.
    pub fn file_name(&self) -> &str {
        self.file.rsplit('/').next().unwrap_or(&self.file)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Counts used by printers and the JSON report.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub others: usize,
    pub other_issues: usize,
    pub files: usize,
}

/// Fixed message used when a run fails the check.
pub const FAILURE_MESSAGE: &str = "Failed due to SwiftLint errors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
/// Terminal state of a review run.
pub enum CheckOutcome {
    /// No issues, or issues that do not fail the check.
    Passed,
    Failed(String),
}

impl CheckOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, CheckOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize)]
/// Result of a review run, returned to callers and printed as JSON.
pub struct LintReport {
    /// Reported issues, after capping and filtering.
    pub issues: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub errors: Vec<Issue>,
    pub others: Vec<Issue>,
    pub summary: Summary,
    pub outcome: CheckOutcome,
}
