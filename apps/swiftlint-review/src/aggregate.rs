//! Parsing and merging of SwiftLint JSON output.
//!
//! Each invocation's stdout is parsed on its own. The JSON shape is detected
//! per invocation: a top-level array is the legacy reporter, an object with a
//! `files` key is the file-scoped reporter, anything else is rejected.

use crate::error::ReviewError;
use crate::models::tool_output::{FileScopedReport, LegacyViolation};
use crate::models::Issue;
use serde_json::Value as Json;
use tracing::debug;

/// Captured stdout of one SwiftLint invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Human-readable label used in error messages (file path or directory).
    pub label: String,
    /// File the invocation linted, used when records omit their path.
    pub file: Option<String>,
    pub stdout: String,
}

/// Parse one invocation's output into issues, in JSON order.
pub fn parse_output(inv: &Invocation) -> Result<Vec<Issue>, ReviewError> {
    let doc: Json =
        serde_json::from_str(&inv.stdout).map_err(|e| ReviewError::malformed(&inv.label, e))?;
    if doc.is_array() {
        let records: Vec<LegacyViolation> =
            serde_json::from_value(doc).map_err(|e| ReviewError::malformed(&inv.label, e))?;
        Ok(records
            .into_iter()
            .map(|r| r.into_issue(inv.file.as_deref()))
            .collect())
    } else if doc.get("files").is_some() {
        let report: FileScopedReport =
            serde_json::from_value(doc).map_err(|e| ReviewError::malformed(&inv.label, e))?;
        Ok(report.into_issues())
    } else {
        Err(ReviewError::malformed(
            &inv.label,
            "expected a JSON array of violations or an object with a `files` key",
        ))
    }
}

/// Parse every non-empty invocation and flatten the results.
///
/// Stops at the first malformed output.
pub fn aggregate(invocations: &[Invocation]) -> Result<Vec<Issue>, ReviewError> {
    let mut issues = Vec::new();
    for inv in invocations.iter().filter(|i| !i.stdout.trim().is_empty()) {
        let found = parse_output(inv)?;
        debug!("{}: {} issue(s)", inv.label, found.len());
        issues.extend(found);
    }
    Ok(issues)
}

/// Issues kept after capping, plus how many were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capped {
    pub issues: Vec<Issue>,
    pub other_issues: usize,
}

/// Truncate `issues` to at most `max` entries.
pub fn cap(mut issues: Vec<Issue>, max: Option<usize>) -> Capped {
    let other_issues = match max {
        Some(max) if issues.len() > max => {
            let dropped = issues.len() - max;
            issues.truncate(max);
            dropped
        }
        _ => 0,
    };
    Capped {
        issues,
        other_issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    const FILE_SCOPED: &str = r#"{"files":[{"path":"/a/Foo.swift","violations":[{"message":"Line too long","rule":"line_length","location":{"line":12},"severity":"warning"}]}]}"#;

    fn inv(label: &str, stdout: &str) -> Invocation {
        Invocation {
            label: label.to_string(),
            file: Some(label.to_string()),
            stdout: stdout.to_string(),
        }
    }

    #[test]
    fn parses_file_scoped_shape() {
        let issues = parse_output(&inv("/a/Foo.swift", FILE_SCOPED)).unwrap();
        assert_eq!(
            issues,
            vec![Issue {
                file: "/a/Foo.swift".into(),
                line: 12,
                message: "Line too long".into(),
                severity: Severity::Warning,
                rule: "line_length".into(),
            }]
        );
    }

    #[test]
    fn parses_legacy_shape() {
        let raw = r#"[
            {"file":"/a/Foo.swift","line":3,"character":5,"reason":"Force cast","rule_id":"force_cast","severity":"Error","type":"Force Cast"},
            {"line":9,"reason":"Todo","rule_id":"todo","severity":"Warning"}
        ]"#;
        let issues = parse_output(&inv("/a/Bar.swift", raw)).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].rule, "force_cast");
        assert_eq!(issues[1].file, "/a/Bar.swift");
    }

    #[test]
    fn rejects_unknown_shape_naming_invocation() {
        let err = parse_output(&inv("/a/Foo.swift", r#"{"violations":[]}"#)).unwrap_err();
        assert!(err.to_string().contains("/a/Foo.swift"));
        let err = parse_output(&inv("/a/Baz.swift", "not json")).unwrap_err();
        assert!(matches!(err, ReviewError::MalformedOutput { .. }));
    }

    #[test]
    fn aggregate_skips_empty_and_keeps_order() {
        let second = r#"[{"file":"/b.swift","line":1,"reason":"r","rule_id":"x","severity":"Error"}]"#;
        let invs = vec![inv("/a/Foo.swift", FILE_SCOPED), inv("/c.swift", "  \n"), inv("/b.swift", second)];
        let first = aggregate(&invs).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].file, "/a/Foo.swift");
        assert_eq!(first[1].file, "/b.swift");
        assert_eq!(aggregate(&invs).unwrap(), first);
    }

    #[test]
    fn aggregate_aborts_on_malformed_output() {
        let invs = vec![inv("/a/Foo.swift", FILE_SCOPED), inv("/bad.swift", "{")];
        assert!(aggregate(&invs).is_err());
    }

    fn issues(n: usize) -> Vec<Issue> {
        (0..n)
            .map(|i| Issue {
                file: format!("/f{}.swift", i),
                line: i as u32,
                message: "m".into(),
                severity: Severity::Warning,
                rule: "r".into(),
            })
            .collect()
    }

    #[test]
    fn cap_truncates_and_counts() {
        let c = cap(issues(3), Some(1));
        assert_eq!(c.issues.len(), 1);
        assert_eq!(c.issues[0].file, "/f0.swift");
        assert_eq!(c.other_issues, 2);
    }

    #[test]
    fn cap_is_noop_when_unset_or_not_exceeded() {
        assert_eq!(cap(issues(3), None).other_issues, 0);
        let c = cap(issues(3), Some(3));
        assert_eq!((c.issues.len(), c.other_issues), (3, 0));
    }
}
