//! JSON shapes emitted by `swiftlint lint --reporter json`.
//!
//! Two shapes exist in the wild:
//! - legacy: a flat array of violations, each carrying its own `file`;
//! - file-scoped: `{ "files": [ { "path", "violations": [...] } ] }`, where a
//!   violation may omit `path` and inherits it from the enclosing entry.

use super::{Issue, Severity};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
/// Legacy reporter record.
pub struct LegacyViolation {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    pub reason: String,
    pub rule_id: String,
    pub severity: Severity,
}

impl LegacyViolation {
    pub fn into_issue(self, fallback_file: Option<&str>) -> Issue {
        Issue {
            file: self
                .file
                .or_else(|| fallback_file.map(str::to_string))
                .unwrap_or_default(),
            line: self.line.unwrap_or(0),
            message: self.reason,
            severity: self.severity,
            rule: self.rule_id,
        }
    }
}

#[derive(Debug, Deserialize)]
/// Root of the file-scoped shape.
pub struct FileScopedReport {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FileEntry {
    pub path: String,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

#[derive(Debug, Deserialize)]
pub struct Violation {
    #[serde(default)]
    pub path: Option<String>,
    pub message: String,
    pub rule: String,
    #[serde(default)]
    pub location: Location,
    pub severity: Severity,
}

#[derive(Debug, Default, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub line: Option<u32>,
}

impl FileScopedReport {
    /// Flatten entries into issues, backfilling each violation's path.
    pub fn into_issues(self) -> Vec<Issue> {
        let mut out = Vec::new();
        for entry in self.files {
            for v in entry.violations {
                out.push(Issue {
                    file: v.path.unwrap_or_else(|| entry.path.clone()),
                    line: v.location.line.unwrap_or(0),
                    message: v.message,
                    severity: v.severity,
                    rule: v.rule,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_scoped_backfills_path() {
        let raw = r#"{"files":[{"path":"/a/Foo.swift","violations":[
            {"message":"m1","rule":"r1","location":{"line":1},"severity":"warning"},
            {"path":"/b/Bar.swift","message":"m2","rule":"r2","location":{"line":2},"severity":"error"}
        ]}]}"#;
        let rep: FileScopedReport = serde_json::from_str(raw).unwrap();
        let issues = rep.into_issues();
        assert_eq!(issues[0].file, "/a/Foo.swift");
        assert_eq!(issues[1].file, "/b/Bar.swift");
        assert_eq!(issues[1].severity, Severity::Error);
    }

    #[test]
    fn legacy_null_line_maps_to_zero() {
        let raw = r#"{"file":null,"line":null,"reason":"r","rule_id":"file_length","severity":"Warning"}"#;
        let v: LegacyViolation = serde_json::from_str(raw).unwrap();
        let is = v.into_issue(Some("/x/Y.swift"));
        assert_eq!(is.line, 0);
        assert_eq!(is.file, "/x/Y.swift");
        assert_eq!(is.severity, Severity::Warning);
    }
}
