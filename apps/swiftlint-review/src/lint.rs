//! Review pipeline: select files, run SwiftLint, aggregate, filter, report.
//!
//! One synchronous pass per call. The only fatal precondition is a missing
//! SwiftLint executable; malformed tool output aborts the run with an error
//! naming the offending invocation.

use crate::aggregate::{aggregate, cap, Invocation};
use crate::config::{resolve_filters, Effective};
use crate::error::ReviewError;
use crate::files::find_swift_files;
use crate::filter::{partition, select, IssuePredicate, Partitioned};
use crate::host::{AnnotationLevel, ReviewHost};
use crate::models::{CheckOutcome, Issue, LintReport, Summary, FAILURE_MESSAGE};
use crate::output::{host_path, inline_message, other_issues_message, render_summary};
use crate::swiftlint::{OptionValue, Options, SwiftLint};
use crate::vcs::FileStatusProvider;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Non-fatal notice attached to the check when issues were reported.
pub const NOTICE_MESSAGE: &str = "SwiftLint found issues";

/// Per-call parameters of a review run.
#[derive(Default)]
pub struct ReportRequest<'a> {
    /// Glob patterns or paths; `None` lints files changed in version control.
    pub files: Option<Vec<String>>,
    /// Post one annotation per issue instead of a markdown summary.
    pub inline_mode: bool,
    pub fail_on_error: bool,
    /// Appended verbatim (split on whitespace) to every SwiftLint call.
    pub extra_args: String,
    /// Collect issues without posting anything.
    pub no_comment: bool,
    pub filter: Option<IssuePredicate<'a>>,
}

/// Options shared by every SwiftLint invocation of a run.
pub fn base_options(eff: &Effective) -> Options {
    vec![
        (
            "config".to_string(),
            OptionValue::from(
                eff.config_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            ),
        ),
        ("reporter".to_string(), OptionValue::Value("json".into())),
        ("quiet".to_string(), OptionValue::Flag(true)),
        ("force_exclude".to_string(), OptionValue::Flag(true)),
        (
            "strict".to_string(),
            if eff.strict {
                OptionValue::Flag(true)
            } else {
                OptionValue::Absent
            },
        ),
    ]
}

/// Run SwiftLint once per file, or once over `directory` in lint-all mode.
fn collect_invocations(
    swiftlint: &SwiftLint,
    eff: &Effective,
    files: Option<&[PathBuf]>,
    extra_args: &str,
) -> Result<Vec<Invocation>, ReviewError> {
    let options = base_options(eff);
    let mut out = Vec::new();
    match files {
        None => {
            let stdout = swiftlint.run("lint", &options, extra_args, &eff.directory)?;
            out.push(Invocation {
                label: format!("directory {}", eff.directory.display()),
                file: None,
                stdout,
            });
        }
        Some(files) => {
            for file in files {
                let path = file.to_string_lossy().into_owned();
                let mut opts = options.clone();
                opts.push(("path".to_string(), OptionValue::Value(path.clone())));
                let stdout = swiftlint.run("lint", &opts, extra_args, &eff.directory)?;
                out.push(Invocation {
                    label: path.clone(),
                    file: Some(path),
                    stdout,
                });
            }
        }
    }
    Ok(out)
}

/// Lint, then report through `host`.
///
/// `summary.files` counts files handed to SwiftLint one by one; it is 0 in
/// lint-all-files mode.
pub fn run_lint(
    eff: &Effective,
    req: &ReportRequest<'_>,
    vcs: &dyn FileStatusProvider,
    host: &mut dyn ReviewHost,
) -> Result<LintReport, ReviewError> {
    let swiftlint = SwiftLint::new(&eff.binary);
    swiftlint.ensure_installed()?;

    match eff.config_file.as_ref() {
        Some(p) => info!("using config file {}", p.display()),
        None => info!("no config file; SwiftLint defaults apply"),
    }
    info!("SwiftLint will be run from {}", eff.directory.display());

    let (invocations, files_count) = if eff.lint_all_files {
        (
            collect_invocations(&swiftlint, eff, None, &req.extra_args)?,
            0,
        )
    } else {
        let filters = resolve_filters(eff.config_file.as_deref());
        let files = find_swift_files(
            req.files.as_deref(),
            &eff.cwd,
            &eff.directory,
            &filters,
            vcs,
        )?;
        (
            collect_invocations(&swiftlint, eff, Some(files.as_slice()), &req.extra_args)?,
            files.len(),
        )
    };

    let all = aggregate(&invocations)?;
    info!("SwiftLint reported {} issue(s)", all.len());

    let capped = cap(all, eff.max_violations);
    if capped.other_issues > 0 {
        debug!("{} issue(s) dropped by the cap", capped.other_issues);
    }
    let issues = select(capped.issues, req.filter);
    let parts = partition(&issues);

    if req.no_comment {
        return Ok(build_report(
            issues,
            parts,
            capped.other_issues,
            files_count,
            CheckOutcome::Passed,
        ));
    }

    let outcome = if req.inline_mode {
        report_inline(
            host,
            &parts,
            capped.other_issues,
            req.fail_on_error,
            eff.strict,
            &eff.cwd,
        )
    } else {
        report_batch(
            host,
            &parts,
            capped.other_issues,
            req.fail_on_error,
            eff.strict,
        )
    };
    Ok(build_report(
        issues,
        parts,
        capped.other_issues,
        files_count,
        outcome,
    ))
}

fn build_report(
    issues: Vec<Issue>,
    parts: Partitioned,
    other_issues: usize,
    files: usize,
    outcome: CheckOutcome,
) -> LintReport {
    let summary = Summary {
        errors: parts.errors.len(),
        warnings: parts.warnings.len(),
        others: parts.others.len(),
        other_issues,
        files,
    };
    LintReport {
        issues,
        warnings: parts.warnings,
        errors: parts.errors,
        others: parts.others,
        summary,
        outcome,
    }
}

/// One annotation per issue, then the truncation note.
///
/// Fatal annotations fail the check by themselves, so `fail_check` is not
/// called in this mode.
pub fn report_inline(
    host: &mut dyn ReviewHost,
    parts: &Partitioned,
    other_issues: usize,
    fail_on_error: bool,
    strict: bool,
    cwd: &Path,
) -> CheckOutcome {
    let warning_level = if strict {
        AnnotationLevel::Fail
    } else {
        AnnotationLevel::Warn
    };
    let error_level = if fail_on_error || strict {
        AnnotationLevel::Fail
    } else {
        AnnotationLevel::Warn
    };
    let groups = [
        (&parts.warnings, warning_level),
        (&parts.errors, error_level),
        (&parts.others, AnnotationLevel::Warn),
    ];
    let mut failed = false;
    for (issues, level) in groups {
        for is in issues.iter() {
            let file = host_path(&is.file, cwd);
            host.annotate(&inline_message(is), Some((file.as_str(), is.line)), level);
            failed |= level == AnnotationLevel::Fail;
        }
    }
    if other_issues > 0 {
        host.annotate(
            &other_issues_message(other_issues),
            None,
            AnnotationLevel::Warn,
        );
    }
    if failed {
        CheckOutcome::Failed(FAILURE_MESSAGE.to_string())
    } else {
        CheckOutcome::Passed
    }
}

/// One markdown summary, then the check verdict. Nothing is posted when
/// there is nothing to report.
pub fn report_batch(
    host: &mut dyn ReviewHost,
    parts: &Partitioned,
    other_issues: usize,
    fail_on_error: bool,
    strict: bool,
) -> CheckOutcome {
    if parts.is_empty() {
        return CheckOutcome::Passed;
    }
    host.post_summary(&render_summary(
        &parts.warnings,
        &parts.errors,
        &parts.others,
        other_issues,
    ));
    let fail_by_errors = fail_on_error && !parts.errors.is_empty();
    let fail_by_strict = strict && (!parts.errors.is_empty() || !parts.warnings.is_empty());
    if fail_by_errors || fail_by_strict {
        host.fail_check(FAILURE_MESSAGE);
        CheckOutcome::Failed(FAILURE_MESSAGE.to_string())
    } else {
        host.warn_check(NOTICE_MESSAGE);
        CheckOutcome::Passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostEvent, MemoryHost};
    use crate::models::Severity;

    fn issue(name: &str, sev: &str) -> Issue {
        Issue {
            file: format!("/work/Sources/{}.swift", name),
            line: 4,
            message: format!("{} message", name),
            severity: Severity::from(sev),
            rule: format!("{}_rule", name),
        }
    }

    fn parts(v: &[Issue]) -> Partitioned {
        partition(v)
    }

    #[test]
    fn batch_empty_posts_nothing() {
        let mut host = MemoryHost::new();
        let out = report_batch(&mut host, &Partitioned::default(), 3, true, true);
        assert_eq!(out, CheckOutcome::Passed);
        assert!(host.events.is_empty());
    }

    #[test]
    fn batch_fails_on_error_regardless_of_warnings() {
        let v = vec![issue("A", "warning"), issue("B", "error"), issue("C", "warning")];
        let mut host = MemoryHost::new();
        let out = report_batch(&mut host, &parts(&v), 0, true, false);
        assert_eq!(out, CheckOutcome::Failed("Failed due to SwiftLint errors".into()));
        assert_eq!(host.failure(), Some("Failed due to SwiftLint errors"));
        assert_eq!(host.summaries().len(), 1);
    }

    #[test]
    fn batch_without_fail_on_error_only_warns() {
        let v = vec![issue("B", "error")];
        let mut host = MemoryHost::new();
        let out = report_batch(&mut host, &parts(&v), 0, false, false);
        assert_eq!(out, CheckOutcome::Passed);
        assert!(host.failure().is_none());
        assert!(host.events.contains(&HostEvent::Warned {
            message: NOTICE_MESSAGE.into()
        }));
    }

    #[test]
    fn batch_strict_fails_on_warnings() {
        let v = vec![issue("A", "warning")];
        let mut host = MemoryHost::new();
        assert!(report_batch(&mut host, &parts(&v), 0, false, true).is_failed());
    }

    #[test]
    fn batch_unknown_severity_never_fails() {
        let v = vec![issue("X", "info")];
        let mut host = MemoryHost::new();
        let out = report_batch(&mut host, &parts(&v), 0, true, true);
        assert_eq!(out, CheckOutcome::Passed);
        assert!(host.summaries()[0].contains("#### Other"));
    }

    #[test]
    fn inline_levels_and_truncation_note() {
        let v = vec![issue("A", "warning"), issue("B", "error")];
        let mut host = MemoryHost::new();
        let out = report_inline(&mut host, &parts(&v), 2, true, false, Path::new("/work"));
        assert!(out.is_failed());
        let anns: Vec<_> = host.annotations().cloned().collect();
        assert_eq!(anns.len(), 3);
        assert_eq!(
            anns[0],
            HostEvent::Annotation {
                message: "A message\n`A_rule` `A.swift:4`".into(),
                file: Some("Sources/A.swift".into()),
                line: Some(4),
                level: AnnotationLevel::Warn,
            }
        );
        assert!(matches!(
            &anns[1],
            HostEvent::Annotation { level: AnnotationLevel::Fail, .. }
        ));
        assert_eq!(
            anns[2],
            HostEvent::Annotation {
                message: "SwiftLint also found 2 more violations with this PR.".into(),
                file: None,
                line: None,
                level: AnnotationLevel::Warn,
            }
        );
        assert!(host.failure().is_none());
    }

    #[test]
    fn inline_errors_are_warnings_without_fail_on_error() {
        let v = vec![issue("B", "error")];
        let mut host = MemoryHost::new();
        let out = report_inline(&mut host, &parts(&v), 0, false, false, Path::new("/work"));
        assert_eq!(out, CheckOutcome::Passed);
        assert!(host
            .annotations()
            .all(|a| matches!(a, HostEvent::Annotation { level: AnnotationLevel::Warn, .. })));
    }

    #[test]
    fn inline_strict_fails_on_a_single_warning() {
        let v = vec![issue("A", "warning")];
        let mut host = MemoryHost::new();
        let out = report_inline(&mut host, &parts(&v), 0, false, true, Path::new("/work"));
        assert_eq!(out, CheckOutcome::Failed(FAILURE_MESSAGE.into()));
        let anns: Vec<_> = host.annotations().cloned().collect();
        assert_eq!(anns.len(), 1);
        assert!(matches!(
            &anns[0],
            HostEvent::Annotation { level: AnnotationLevel::Fail, .. }
        ));
        assert!(host.failure().is_none());
    }

    #[cfg(unix)]
    mod pipeline {
        use super::*;
        use crate::config::resolve_effective;
        use crate::vcs::StaticStatus;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        const FAKE: &str = r#"#!/bin/sh
p=""
while [ $# -gt 0 ]; do
  if [ "$1" = "--path" ]; then shift; p="$1"; fi
  shift
done
printf '{"files":[{"path":"%s","violations":[{"message":"Line too long","rule":"line_length","location":{"line":12},"severity":"warning"},{"message":"Force cast","rule":"force_cast","location":{"line":3},"severity":"error"}]}]}' "$p"
"#;

        fn workspace() -> TempDir {
            let dir = tempfile::tempdir().unwrap();
            let root = dir.path();
            let bin = root.join("bin/swiftlint");
            fs::create_dir_all(root.join("bin")).unwrap();
            fs::write(&bin, FAKE).unwrap();
            fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
            fs::create_dir_all(root.join("Sources")).unwrap();
            fs::create_dir_all(root.join("Pods")).unwrap();
            fs::write(root.join("Sources/A.swift"), "").unwrap();
            fs::write(root.join("Sources/B.swift"), "").unwrap();
            fs::write(root.join("Pods/P.swift"), "").unwrap();
            fs::write(root.join(".swiftlint.yml"), "excluded:\n  - Pods\n").unwrap();
            dir
        }

        fn effective(dir: &TempDir, max: Option<usize>) -> Effective {
            resolve_effective(dir.path(), None, None, Some("bin/swiftlint"), max, None, None)
        }

        fn all_files() -> Vec<String> {
            vec!["**/*.swift".to_string()]
        }

        #[test]
        fn batch_report_with_cap_and_exclusion() {
            let dir = workspace();
            let eff = effective(&dir, Some(1));
            let req = ReportRequest {
                files: Some(all_files()),
                ..Default::default()
            };
            let mut host = MemoryHost::new();
            let report = run_lint(&eff, &req, &StaticStatus::default(), &mut host).unwrap();

            assert_eq!(report.summary.files, 2);
            assert_eq!(report.issues.len(), 1);
            assert_eq!(report.summary.other_issues, 3);
            assert_eq!(report.outcome, CheckOutcome::Passed);
            let md = host.summaries()[0];
            assert!(md.contains("A.swift | 12 | Line too long (line_length)"));
            assert!(md.contains("SwiftLint also found 3 more violations with this PR."));
            assert!(!md.contains("P.swift"));
        }

        #[test]
        fn fail_on_error_fails_check() {
            let dir = workspace();
            let eff = effective(&dir, None);
            let req = ReportRequest {
                files: Some(vec!["Sources/A.swift".to_string()]),
                fail_on_error: true,
                ..Default::default()
            };
            let mut host = MemoryHost::new();
            let report = run_lint(&eff, &req, &StaticStatus::default(), &mut host).unwrap();
            assert_eq!(report.summary.errors, 1);
            assert_eq!(report.summary.warnings, 1);
            assert_eq!(host.failure(), Some(FAILURE_MESSAGE));
        }

        #[test]
        fn predicate_applies_after_cap() {
            let dir = workspace();
            let eff = effective(&dir, Some(2));
            let keep = |i: &Issue| i.rule != "line_length";
            let req = ReportRequest {
                files: Some(all_files()),
                filter: Some(&keep),
                ..Default::default()
            };
            let mut host = MemoryHost::new();
            let report = run_lint(&eff, &req, &StaticStatus::default(), &mut host).unwrap();
            assert_eq!(report.issues.len(), 1);
            assert_eq!(report.issues[0].rule, "force_cast");
            assert_eq!(report.summary.other_issues, 2);
        }

        #[test]
        fn vcs_default_and_no_comment() {
            let dir = workspace();
            let eff = effective(&dir, Some(1));
            let vcs = StaticStatus {
                modified: vec!["Sources/A.swift".into(), "Sources/B.swift".into()],
                deleted: vec!["Sources/B.swift".into()],
                added: vec![],
            };
            let req = ReportRequest {
                no_comment: true,
                ..Default::default()
            };
            let mut host = MemoryHost::new();
            let report = run_lint(&eff, &req, &vcs, &mut host).unwrap();
            assert_eq!(report.summary.files, 1);
            assert_eq!(report.issues.len(), 1);
            assert_eq!(report.summary.other_issues, 1);
            assert_eq!(report.outcome, CheckOutcome::Passed);
            assert!(host.events.is_empty());
        }

        const RECORDING: &str = r#"#!/bin/sh
echo "$(pwd -P)|$*" >> "@LOG@"
printf '[{"file":"%s/Pods/P.swift","line":2,"reason":"Trailing whitespace","rule_id":"trailing_whitespace","severity":"Warning"}]' "$(pwd -P)"
"#;

        #[test]
        fn lint_all_files_runs_once() {
            let dir = workspace();
            let log = dir.path().join("calls.log");
            let bin = dir.path().join("bin/swiftlint");
            fs::write(&bin, RECORDING.replace("@LOG@", &log.to_string_lossy())).unwrap();

            let eff = resolve_effective(
                dir.path(),
                None,
                None,
                Some("bin/swiftlint"),
                None,
                None,
                Some(true),
            );
            assert!(eff.config_file.is_none());
            let req = ReportRequest {
                files: Some(all_files()),
                ..Default::default()
            };
            let mut host = MemoryHost::new();
            let report = run_lint(&eff, &req, &StaticStatus::default(), &mut host).unwrap();

            let calls = fs::read_to_string(&log).unwrap();
            let calls: Vec<&str> = calls.lines().collect();
            assert_eq!(calls.len(), 1);
            let (pwd, args) = calls[0].split_once('|').unwrap();
            assert_eq!(Path::new(pwd), eff.directory);
            assert!(args.starts_with("lint "));
            assert!(!args.contains("--path"));
            assert!(!args.contains("--config"));

            // .swiftlint.yml excludes Pods, but that filter is not applied here
            assert_eq!(report.summary.files, 0);
            assert_eq!(report.issues.len(), 1);
            assert!(report.issues[0].file.ends_with("Pods/P.swift"));
            assert_eq!(host.summaries().len(), 1);
        }

        #[test]
        fn missing_binary_aborts_before_linting() {
            let dir = workspace();
            let eff = resolve_effective(dir.path(), None, None, Some("bin/nope"), None, None, None);
            let mut host = MemoryHost::new();
            let err = run_lint(&eff, &ReportRequest::default(), &StaticStatus::default(), &mut host)
                .unwrap_err();
            assert!(matches!(err, ReviewError::NotInstalled(_)));
            assert!(host.events.is_empty());
        }
    }
}
