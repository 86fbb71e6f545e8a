//! Update copyright hook.
//!
//! Advances the end year of existing copyright notices to the current year.
//! Files without a notice are left alone; use `add-copyright` to insert one.

use clap::Parser;
use hook_common::git;
use hook_common::prelude::*;
use hook_copyright::transform::update_copyright;
use std::process::ExitCode;

const HOOK_NAME: &str = "update-copyright";

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Bring copyright notices up to the current year")]
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
    let mut report = HookReport::new(HOOK_NAME);
    let files = cli.files.resolve()?;
    if files.is_empty() {
        return Ok(report);
    }

    let context = InvocationContext::detect()?;
    context.require_repo()?;

    for file in &files {
        let outcome = process_file(file, context.current_year, &report)
            .unwrap_or_else(|e| FileOutcome::Failed(format!("{e:#}")));
        report.record(file, outcome);
    }

    Ok(report)
}

fn process_file(path: &Utf8Path, current_year: i32, report: &HookReport) -> Result<FileOutcome> {
    let language =
        language_for_path(path).ok_or_else(|| HookError::UnsupportedFileType(path.to_path_buf()))?;
    let source = SourceText::read(path)?;

    // Untracked files have no history yet; treat them as created this year.
    let first_commit_year = git::first_commit_year(path)?.unwrap_or(current_year);
    if first_commit_year > current_year {
        report.warn(
            path,
            &format!(
                "first commit year {first_commit_year} is after the current year {current_year}; leaving the notice as it is"
            ),
        );
    }

    let edit = update_copyright(&source.lines, &language, first_commit_year, current_year)?;
    for warning in &edit.warnings {
        report.warn(path, &warning.to_string());
    }
    if !edit.changed {
        return Ok(FileOutcome::Unchanged);
    }

    if let Some(notice) = &edit.notice {
        for index in notice.lines.clone() {
            let (old, new) = (&source.lines[index], &edit.lines[index]);
            if old != new {
                report.note(
                    path,
                    &format!(
                        "updated {} notice of {}\n{}",
                        notice.marker.describe(),
                        notice.holder,
                        format_diff(old, new)
                    ),
                );
            }
        }
    }

    source
        .with_lines(edit.lines)
        .write(path)
        .with_context(|| format!("failed to write {path}"))?;
    Ok(FileOutcome::Modified)
}
