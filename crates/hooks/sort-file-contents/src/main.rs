//! Sort file contents hook.
//!
//! Sorts the lines of each section of a file (`.gitignore`, requirement lists
//! and the like), where sections are separated by blank lines and may start
//! with a comment header.

mod sections;

use clap::Parser;
use hook_common::prelude::*;
use sections::sort_sections;
use std::process::ExitCode;

const HOOK_NAME: &str = "sort-file-contents";

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Sort lines within each section of a file")]
struct Cli {
    /// Drop repeated lines within a section
    #[arg(short, long)]
    unique: bool,

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
    let mut report = HookReport::new(HOOK_NAME);

    for file in &cli.files.resolve()? {
        let outcome = process_file(file, cli.unique, &report)
            .unwrap_or_else(|e| FileOutcome::Failed(format!("{e:#}")));
        report.record(file, outcome);
    }

    Ok(report)
}

fn process_file(path: &Utf8Path, unique: bool, report: &HookReport) -> Result<FileOutcome> {
    let source = SourceText::read(path)?;
    let marker = style_or_hash(path).leading();

    let sorted = sort_sections(&source.lines, unique, marker);
    for warning in &sorted.warnings {
        report.warn(path, warning);
    }
    if !sorted.changed {
        return Ok(FileOutcome::Unchanged);
    }

    source
        .with_lines(sorted.lines)
        .write(path)
        .with_context(|| format!("failed to write {path}"))?;
    Ok(FileOutcome::Modified)
}
