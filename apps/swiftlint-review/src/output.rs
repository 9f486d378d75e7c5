//! Rendering of review comments and console/JSON printers.
//!
//! Markdown and inline messages are composed by pure functions so they can
//! be posted by any `ReviewHost`. `ConsoleHost` prints them to a terminal;
//! `compose_report_json` gives the machine-readable form.

use crate::host::{AnnotationLevel, HostEvent, ReviewHost};
use crate::models::{Issue, LintReport, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

/// Heading of the batch summary.
pub const SUMMARY_HEADING: &str = "### SwiftLint found issues";

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Escape characters that would break a markdown table cell.
fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Note about violations dropped by the cap.
pub fn other_issues_message(count: usize) -> String {
    let violations = if count == 1 { "violation" } else { "violations" };
    format!(
        "SwiftLint also found {} more {} with this PR.",
        count, violations
    )
}

/// One markdown table of issues under a `####` heading.
pub fn markdown_issues(issues: &[Issue], heading: &str) -> String {
    let mut out = format!("#### {}\n\n", heading);
    out.push_str("File | Line | Reason |\n");
    out.push_str("| --- | ----- | ----- |\n");
    for is in issues {
        out.push_str(&format!(
            "{} | {} | {} ({})\n",
            escape_md(is.file_name()),
            is.line,
            escape_md(&is.message),
            escape_md(&is.rule)
        ));
    }
    out
}

/// Full batch summary: heading, one table per non-empty severity group and
/// the truncation note.
pub fn render_summary(
    warnings: &[Issue],
    errors: &[Issue],
    others: &[Issue],
    other_issues: usize,
) -> String {
    let mut out = format!("{}\n\n", SUMMARY_HEADING);
    if !warnings.is_empty() {
        out.push_str(&markdown_issues(warnings, "Warnings"));
    }
    if !errors.is_empty() {
        out.push_str(&markdown_issues(errors, "Errors"));
    }
    if !others.is_empty() {
        out.push_str(&markdown_issues(others, "Other"));
    }
    if other_issues > 0 {
        out.push('\n');
        out.push_str(&other_issues_message(other_issues));
        out.push('\n');
    }
    out
}

/// Path shown to the host for inline comments: relative to `cwd` when the
/// file lives under it, unchanged otherwise.
pub fn host_path(file: &str, cwd: &Path) -> String {
    match pathdiff::diff_paths(file, cwd) {
        Some(rel) if !rel.starts_with("..") && Path::new(file).is_absolute() => {
            rel.to_string_lossy().into_owned()
        }
        _ => file.to_string(),
    }
}

/// Inline comment body: reason, then rule id and `file:line` for quick open.
pub fn inline_message(is: &Issue) -> String {
    format!(
        "{}\n`{}` `{}:{}`",
        is.message,
        is.rule,
        is.file_name(),
        is.line
    )
}

/// Host printing annotations and summaries to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleHost;

impl ReviewHost for ConsoleHost {
    fn annotate(&mut self, message: &str, location: Option<(&str, u32)>, level: AnnotationLevel) {
        let color = use_colors();
        let (icon, tag) = match level {
            AnnotationLevel::Fail => {
                if color {
                    ("✖".red().to_string(), "⟦fail⟧".red().bold().to_string())
                } else {
                    ("✖".to_string(), "⟦fail⟧".to_string())
                }
            }
            AnnotationLevel::Warn => {
                if color {
                    ("▲".yellow().to_string(), "⟦warn⟧".yellow().bold().to_string())
                } else {
                    ("▲".to_string(), "⟦warn⟧".to_string())
                }
            }
        };
        let body = message.replace('\n', " ");
        match location {
            Some((file, line)) => {
                let loc = format!("{}:{}", file, line);
                let loc = if color { loc.bold().to_string() } else { loc };
                println!("{} {} {} — {}", icon, tag, loc, body);
            }
            None => println!("{} {} {}", icon, tag, body),
        }
    }

    fn post_summary(&mut self, markdown: &str) {
        println!("{}", markdown);
    }

    fn fail_check(&mut self, message: &str) {
        eprintln!("{} {}", error_prefix(), message);
    }

    fn warn_check(&mut self, message: &str) {
        eprintln!("{} {}", note_prefix(), message);
    }
}

/// Print issues one per line, for runs that post nothing.
pub fn print_issues(issues: &[Issue]) {
    let color = use_colors();
    for is in issues {
        let sev = match is.severity {
            Severity::Error if color => "⟦error⟧".red().bold().to_string(),
            Severity::Warning if color => "⟦warn⟧".yellow().bold().to_string(),
            Severity::Unknown(_) if color => format!("⟦{}⟧", is.severity).blue().bold().to_string(),
            _ => format!("⟦{}⟧", is.severity),
        };
        println!("{} {}:{} ❲{}❳ — {}", sev, is.file, is.line, is.rule, is.message);
    }
}

/// Compose the JSON report (pure) for printing and tests.
pub fn compose_report_json(report: &LintReport, events: &[HostEvent]) -> JsonVal {
    json!({
        "issues": report.issues,
        "summary": report.summary,
        "outcome": report.outcome,
        "events": events,
    })
}

/// Print the JSON report to stdout.
pub fn print_report_json(report: &LintReport, events: &[HostEvent]) {
    let out = compose_report_json(report, events);
    match serde_json::to_string_pretty(&out) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", error_prefix(), e),
    }
}
