//! Run-mode glue: validate input, discover targets, drive the engine, and
//! format the result.

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::discovery::{DirectoryWalker, WalkConfig};
use crate::engine::{ConvertEngine, ConvertOptions, RunSummary};
use crate::reporter::json::JsonReporter;
use crate::reporter::terminal::TerminalReporter;
use crate::reporter::{Reporter, RunResult};
use chrono::Utc;
use std::process::ExitCode;

/// Execute a full run for the given CLI invocation.
///
/// Exit codes: 0 on success (even with per-file errors), 1 when `--check`
/// found files needing conversion, 2 on input validation failure.
pub fn run(cli: &Cli) -> ExitCode {
    let result = match execute(cli) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let output = format_result(cli, &result);
    print!("{}", output);

    if cli.check && !result.summary.is_clean() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Discover targets and process them, assembling the reportable result.
pub fn execute(cli: &Cli) -> crate::error::Result<RunResult> {
    // Config defaults come from the first target's directory
    let project_root = cli.paths.first().and_then(|p| {
        if p.is_dir() {
            Some(p.as_path())
        } else {
            p.parent().filter(|parent| !parent.as_os_str().is_empty())
        }
    });
    let config = Config::load(project_root);

    let extensions = if cli.extensions.is_empty() {
        config.extensions.clone()
    } else {
        cli.extensions.clone()
    };

    let walk_config = WalkConfig::new()
        .with_extensions(extensions)
        .with_all_files(cli.all)
        .with_max_depth(cli.max_depth)
        .with_follow_symlinks(cli.follow_symlinks || config.follow_symlinks);

    let files = DirectoryWalker::new(walk_config).collect(&cli.paths)?;

    let engine = ConvertEngine::new(ConvertOptions {
        check_only: cli.check,
        threads: cli.threads.or(config.threads),
    });
    let reports = engine.run(&files);
    let summary = RunSummary::from_reports(&reports);

    Ok(RunResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        scanned_at: Utc::now().to_rfc3339(),
        targets: cli.paths.iter().map(|p| p.display().to_string()).collect(),
        check_only: cli.check,
        summary,
        files: reports,
    })
}

pub fn format_result(cli: &Cli, result: &RunResult) -> String {
    match cli.format {
        OutputFormat::Terminal => TerminalReporter::new(cli.verbose, cli.quiet).report(result),
        OutputFormat::Json => JsonReporter::new().report(result),
    }
}
