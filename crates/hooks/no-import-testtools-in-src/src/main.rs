//! No test tool imports in source hook.
//!
//! Fails on Python modules outside the test suite that import `pytest`,
//! `unittest`, `mock` and friends.

use clap::Parser;
use hook_common::prelude::*;
use regex::Regex;
use std::process::ExitCode;

const HOOK_NAME: &str = "no-import-testtools-in-src";

const TEST_TOOLS: &[&str] = &["pytest", "unittest", "mock", "hypothesis", "pytest_mock"];
const TEST_DIRS: &[&str] = &["test", "tests"];

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Detect test tool imports in src files")]
struct Cli {
    #[command(flatten)]
    files: FileArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => report.exit_code(),
        Err(error) => fatal(HOOK_NAME, &error),
    }
}

fn run(cli: &Cli) -> Result<HookReport> {
    let pattern = import_pattern()?;
    let mut report = HookReport::new(HOOK_NAME);

    for file in cli.files.resolve()?.iter().filter(|f| is_source_module(f)) {
        let outcome = process_file(file, &pattern)
            .unwrap_or_else(|e| FileOutcome::Failed(format!("{e:#}")));
        report.record(file, outcome);
    }

    Ok(report)
}

fn import_pattern() -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"^\s*(?:import|from)\s+({})\b",
        TEST_TOOLS.join("|")
    ))?)
}

/// A `.py` file that is not part of the test suite.
fn is_source_module(path: &Utf8Path) -> bool {
    if path.extension() != Some("py") {
        return false;
    }
    let name = path.file_name().unwrap_or_default();
    if name == "conftest.py" || name.starts_with("test_") || name.ends_with("_test.py") {
        return false;
    }
    !path
        .parent()
        .into_iter()
        .flat_map(Utf8Path::components)
        .any(|component| TEST_DIRS.iter().any(|dir| *dir == component.as_str()))
}

fn find_imports(lines: &[String], pattern: &Regex) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let caps = pattern.captures(line)?;
            Some(format!("{}: imports test tool '{}'", index + 1, &caps[1]))
        })
        .collect()
}

fn process_file(path: &Utf8Path, pattern: &Regex) -> Result<FileOutcome> {
    let source = SourceText::read(path)?;
    let violations = find_imports(&source.lines, pattern);

    if violations.is_empty() {
        Ok(FileOutcome::Unchanged)
    } else {
        Ok(FileOutcome::Violation(violations))
    }
}
