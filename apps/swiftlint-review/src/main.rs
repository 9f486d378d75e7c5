//! swiftlint-review CLI binary entry point.
//! Resolves settings, runs the review pipeline and maps the outcome to an
//! exit code: 0 passed, 1 check failed, 2 runtime error.

use clap::Parser;
use std::process::ExitCode;
use swiftlint_review::cli::{Cli, Commands};
use swiftlint_review::host::{MemoryHost, ReviewHost};
use swiftlint_review::lint::{run_lint, ReportRequest};
use swiftlint_review::output::{self, ConsoleHost};
use swiftlint_review::vcs::{FileStatusProvider, GitStatus, StaticStatus};
use swiftlint_review::{config, filter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::Report {
            files,
            inline,
            fail_on_error,
            strict,
            no_comment,
            lint_all_files,
            config,
            directory,
            binary,
            max_violations,
            extra_args,
            ignore_rules,
            base,
            output,
        } => {
            let cwd = match std::env::current_dir() {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("{} cannot read working directory: {}", output::error_prefix(), e);
                    return ExitCode::from(2);
                }
            };
            let eff = config::resolve_effective(
                &cwd,
                config.as_deref(),
                directory.as_deref(),
                binary.as_deref(),
                max_violations,
                Some(strict),
                Some(lint_all_files),
            );
            let json = output.as_deref() == Some("json");

            // Git is only asked when nothing else selects the files
            let vcs: Box<dyn FileStatusProvider> = if files.is_empty() && !lint_all_files {
                match GitStatus::collect(&eff.directory, &base) {
                    Ok(st) => Box::new(st),
                    Err(e) => {
                        eprintln!("{} {}", output::error_prefix(), e);
                        return ExitCode::from(2);
                    }
                }
            } else {
                Box::new(StaticStatus::default())
            };

            let keep = filter::ignore_rules(&ignore_rules);
            let req = ReportRequest {
                files: (!files.is_empty()).then_some(files),
                inline_mode: inline,
                fail_on_error,
                extra_args,
                no_comment,
                filter: if ignore_rules.is_empty() {
                    None
                } else {
                    Some(&keep)
                },
            };

            let mut memory = MemoryHost::new();
            let mut console = ConsoleHost::default();
            let host: &mut dyn ReviewHost = if json { &mut memory } else { &mut console };
            let report = match run_lint(&eff, &req, vcs.as_ref(), host) {
                Ok(r) => r,
                Err(e) => {
                    debug!("{:?}", e);
                    eprintln!("{} {}", output::error_prefix(), e);
                    return ExitCode::from(2);
                }
            };

            if json {
                output::print_report_json(&report, &memory.events);
            } else if no_comment {
                output::print_issues(&report.issues);
            }
            if report.outcome.is_failed() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
