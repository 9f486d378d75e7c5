//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "swiftlint-review",
    version,
    about = "Run SwiftLint and report violations as review comments",
    long_about = "swiftlint-review — run SwiftLint over changed (or selected) Swift files and report the violations inline or as a markdown summary.\n\nConfiguration precedence: CLI > defaults. Filters come from .swiftlint.yml (excluded/included).",
    after_help = "Examples:\n  swiftlint-review report\n  swiftlint-review report 'Sources/**/*.swift' --inline --fail-on-error\n  swiftlint-review report --lint-all-files --max-violations 20 --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, short, global = true, action = clap::ArgAction::SetTrue, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current version.")]
    Version,
    /// Lint and report
    #[command(
        about = "Lint Swift files and report violations",
        long_about = "Select Swift files (explicit patterns, or files changed in git), run SwiftLint on each, and report the violations. Exits 1 when the check fails.",
        after_help = "Examples:\n  swiftlint-review report --base origin/main\n  swiftlint-review report App/*.swift --strict"
    )]
    Report {
        #[arg(help = "Glob patterns or paths to lint (default: files changed in git)")]
        files: Vec<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Annotate each violation instead of posting a summary")]
        inline: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Fail the check when errors are found")]
        fail_on_error: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Treat warnings as errors (also passes --strict to SwiftLint)")]
        strict: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Collect violations without reporting them")]
        no_comment: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Run SwiftLint once over the directory instead of per file")]
        lint_all_files: bool,
        #[arg(long, help = "Path to the SwiftLint config (default: .swiftlint.yml)")]
        config: Option<String>,
        #[arg(long, help = "Directory to lint from (default: current dir)")]
        directory: Option<String>,
        #[arg(long, help = "Path to the swiftlint executable")]
        binary: Option<String>,
        #[arg(long, help = "Report at most this many violations")]
        max_violations: Option<usize>,
        #[arg(long, default_value = "", allow_hyphen_values = true, help = "Extra arguments appended to every SwiftLint call")]
        extra_args: String,
        #[arg(long = "ignore-rule", help = "Drop violations of this rule (repeatable)")]
        ignore_rules: Vec<String>,
        #[arg(long, default_value = "HEAD", help = "Git revision changed files are compared against")]
        base: String,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
