//! Add copyright hook.
//!
//! Inserts a copyright notice into every file that lacks one. The holder and
//! template come from the command line, a config file, the project's
//! `[tool.add_copyright]` section or git, in that order.

use clap::Parser;
use hook_common::prelude::*;
use hook_copyright::notice::preamble_len;
use hook_copyright::settings::{PartialConfig, ResolvedConfig, load_file_config};
use hook_copyright::transform::add_copyright;
use std::process::ExitCode;

const HOOK_NAME: &str = "add-copyright";

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Add a copyright notice to files that lack one")]
struct Cli {
    /// Copyright holder (defaults to git user.name)
    #[arg(short, long, conflicts_with = "config")]
    name: Option<String>,

    /// Notice template; must contain {name} and {year}
    #[arg(short, long, conflicts_with = "config")]
    format: Option<String>,

    /// Read settings from this file instead of .add-copyright-hook-config.yaml
    #[arg(short, long, value_name = "PATH")]
    config: Option<Utf8PathBuf>,

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
    let from_cli = PartialConfig {
        name: cli.name.clone(),
        format: cli.format.clone(),
        ..Default::default()
    };
    let from_files = load_file_config(cli.config.as_deref(), context.config_root())?;
    let config = ResolvedConfig::resolve(from_cli, from_files, context.identity.as_deref())?;

    for file in &files {
        let outcome = process_file(file, &config, context.current_year, &report)
            .unwrap_or_else(|e| FileOutcome::Failed(format!("{e:#}")));
        report.record(file, outcome);
    }

    Ok(report)
}

fn process_file(
    path: &Utf8Path,
    config: &ResolvedConfig,
    current_year: i32,
    report: &HookReport,
) -> Result<FileOutcome> {
    let language =
        language_for_path(path).ok_or_else(|| HookError::UnsupportedFileType(path.to_path_buf()))?;
    let source = SourceText::read(path)?;

    let edit = add_copyright(
        &source.lines,
        &config.for_language(&language),
        &language,
        current_year,
    )?;
    for warning in &edit.warnings {
        report.warn(path, &warning.to_string());
    }
    if !edit.changed {
        return Ok(FileOutcome::Unchanged);
    }

    let added: Vec<&str> = edit
        .lines
        .iter()
        .filter(|line| !line.is_empty() && !source.lines.contains(*line))
        .map(String::as_str)
        .collect();
    report.note(path, &format!("added {}", added.join(" / ")));

    let mut updated = source.with_lines(edit.lines);
    // A file holding nothing but the notice still ends with one newline.
    if source.lines[preamble_len(&source.lines)..]
        .iter()
        .all(|line| line.trim().is_empty())
    {
        updated.trailing_newline = true;
    }
    updated
        .write(path)
        .with_context(|| format!("failed to write {path}"))?;
    Ok(FileOutcome::Modified)
}
